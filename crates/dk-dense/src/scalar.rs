use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt::{self, Debug, Display};
use std::ops::{AddAssign, Neg, Sub, SubAssign};

/// Scalar domains supported by the containers and the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Real, double precision.
    Real,
    /// Complex, double precision real and imaginary parts.
    Complex,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Real => write!(f, "f64"),
            ScalarKind::Complex => write!(f, "c64"),
        }
    }
}

/// Element type of a dense matrix or vector.
///
/// The arithmetic bounds are exactly what the kernel needs: ring operations,
/// in-place accumulation and negation (for the `b == -1` scale).
pub trait Scalar:
    Copy
    + Debug
    + Display
    + PartialEq
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
{
    /// The scalar domain tag for this type.
    const KIND: ScalarKind;
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Real;
}

impl Scalar for Complex64 {
    const KIND: ScalarKind = ScalarKind::Complex;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(<f64 as Scalar>::KIND.to_string(), "f64");
        assert_eq!(<Complex64 as Scalar>::KIND.to_string(), "c64");
    }
}
