//! Numeric element bound for matrix entries.

use std::fmt::{Debug, Display};

use num_traits::{FromPrimitive, Num, NumAssign};

/// Numeric type usable as a matrix element.
///
/// Arithmetic is assumed exact: overflow for the chosen width is the
/// caller's concern, as is rounding for floating-point elements.
pub trait Element:
    Copy + Debug + Display + PartialEq + Num + NumAssign + FromPrimitive + Send + Sync + 'static
{
}

impl<T> Element for T where
    T: Copy
        + Debug
        + Display
        + PartialEq
        + Num
        + NumAssign
        + FromPrimitive
        + Send
        + Sync
        + 'static
{
}
