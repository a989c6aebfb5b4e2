#![no_main]

use libfuzzer_sys::fuzz_target;

use strassen_core::{multiply_padded, Matrix, MultiplyMode};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // First byte picks the side (capped at 24 for speed), second the cutoff
    let side = usize::from(data[0] % 24) + 1;
    let cutoff = usize::from(data[1] % 32) + 1;
    let entries = &data[2..];

    let value = |i: usize| entries.get(i).map_or(0, |&x| i64::from(x) - 128);
    let mut a: Matrix<i64> = match Matrix::allocate(side) {
        Ok(m) => m,
        Err(_) => return,
    };
    let mut b = a.clone();
    for i in 0..side * side {
        a.as_mut_slice()[i] = value(i);
        b.as_mut_slice()[i] = value(side * side + i);
    }

    let expected = multiply_padded(&a, &b, MultiplyMode::Conventional).unwrap();
    let strassen = multiply_padded(&a, &b, MultiplyMode::Strassen).unwrap();
    let hybrid = multiply_padded(&a, &b, MultiplyMode::Hybrid { cutoff }).unwrap();
    assert_eq!(expected, strassen, "Strassen != conventional at side={side}");
    assert_eq!(expected, hybrid, "Hybrid != conventional at side={side} cutoff={cutoff}");
});
