//! Padding and sizing helpers.

/// Smallest power of two `>= n`; `0` maps to `1`.
///
/// Saturates at the largest representable power of two. Callers that can
/// receive sizes that large use [`checked_next_power_of_two`].
pub fn next_power_of_two(n: usize) -> usize {
    checked_next_power_of_two(n).unwrap_or(1 << (usize::BITS - 1))
}

/// Smallest power of two `>= n`, or `None` if it does not fit in `usize`.
pub fn checked_next_power_of_two(n: usize) -> Option<usize> {
    n.max(1).checked_next_power_of_two()
}

/// Whether repeated halving of `side` stays even until it drops to `cutoff`
/// or below.
pub fn halves_down_to(side: usize, cutoff: usize) -> bool {
    first_odd_above(side, cutoff).is_none()
}

/// The first odd side met while halving `side` and still above `cutoff`.
pub(crate) fn first_odd_above(side: usize, cutoff: usize) -> Option<usize> {
    let mut s = side;
    while s > cutoff.max(1) {
        if s % 2 != 0 {
            return Some(s);
        }
        s /= 2;
    }
    None
}

/// Sides visited by the recursion from `side` down to the base case,
/// top level first. A side at or below `cutoff` is a leaf and is included.
pub fn recursion_sides(side: usize, cutoff: usize) -> Vec<usize> {
    let mut sides = vec![side];
    let mut s = side;
    while s > cutoff.max(1) && s % 2 == 0 {
        s /= 2;
        sides.push(s);
    }
    sides
}
