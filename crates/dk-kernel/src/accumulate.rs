//! Write-versus-accumulate semantics of the scale pair `(a, b)`.
//!
//! A raw product value `c` is combined with the destination element `d` as:
//!
//! | `b`   | stored value   |
//! |-------|----------------|
//! | `0`   | `a·c`          |
//! | `1`   | `d + a·c`      |
//! | `-1`  | `d - a·c`      |
//! | other | `b·d + a·c`    |

use dk_dense::Scalar;

/// Which combination rule a scale pair selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blend {
    Overwrite,
    Add,
    Subtract,
    General,
}

impl Blend {
    fn of<T: Scalar>(b: T) -> Blend {
        if b == T::zero() {
            Blend::Overwrite
        } else if b == T::one() {
            Blend::Add
        } else if b == -T::one() {
            Blend::Subtract
        } else {
            Blend::General
        }
    }
}

/// The scalar pair `(a, b)` of `C = a·product + b·C`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePair<T: Scalar> {
    a: T,
    b: T,
    blend: Blend,
}

impl<T: Scalar> ScalePair<T> {
    pub fn new(a: T, b: T) -> Self {
        ScalePair {
            a,
            b,
            blend: Blend::of(b),
        }
    }

    /// `(1, 0)`: store the plain product.
    pub fn assign() -> Self {
        ScalePair::new(T::one(), T::zero())
    }

    pub fn blend(&self) -> Blend {
        self.blend
    }

    /// True when the previous destination contents are irrelevant.
    pub fn overwrites(&self) -> bool {
        self.blend == Blend::Overwrite
    }

    /// Combine one product value into `dst`.
    #[inline]
    pub fn apply(&self, product: T, dst: &mut T) {
        match self.blend {
            Blend::Overwrite => *dst = self.a * product,
            Blend::Add => *dst += self.a * product,
            Blend::Subtract => *dst -= self.a * product,
            Blend::General => *dst = self.b * *dst + self.a * product,
        }
    }

    /// Combine `src` elementwise into `dst`.
    ///
    /// # Panics
    /// Panics if the slices differ in length.
    pub fn apply_slice(&self, src: &[T], dst: &mut [T]) {
        assert_eq!(src.len(), dst.len(), "apply_slice: length mismatch");
        for (d, &s) in dst.iter_mut().zip(src) {
            self.apply(s, d);
        }
    }

    /// The `(alpha, beta)` to hand a GEMM primitive so that its native
    /// `alpha·product + beta·C` matches [`ScalePair::apply`].
    ///
    /// `b == -1` subtracts the product, so it maps to `(-a, 1)`.
    pub fn gemm_coefficients(&self) -> (T, T) {
        match self.blend {
            Blend::Subtract => (-self.a, T::one()),
            _ => (self.a, self.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_dense::Complex64;

    #[test]
    fn test_blend_classification() {
        assert_eq!(ScalePair::new(2.0, 0.0).blend(), Blend::Overwrite);
        assert_eq!(ScalePair::new(2.0, 1.0).blend(), Blend::Add);
        assert_eq!(ScalePair::new(2.0, -1.0).blend(), Blend::Subtract);
        assert_eq!(ScalePair::new(2.0, 0.5).blend(), Blend::General);
        assert_eq!(
            ScalePair::new(Complex64::new(1.0, 0.0), Complex64::new(-1.0, 0.0)).blend(),
            Blend::Subtract
        );
        assert_eq!(
            ScalePair::new(Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)).blend(),
            Blend::General
        );
    }

    #[test]
    fn test_apply_rules() {
        let mut d = 10.0;
        ScalePair::new(2.0, 0.0).apply(3.0, &mut d);
        assert_eq!(d, 6.0);

        let mut d = 10.0;
        ScalePair::new(2.0, 1.0).apply(3.0, &mut d);
        assert_eq!(d, 16.0);

        let mut d = 10.0;
        ScalePair::new(2.0, -1.0).apply(3.0, &mut d);
        assert_eq!(d, 4.0);

        let mut d = 10.0;
        ScalePair::new(2.0, 0.5).apply(3.0, &mut d);
        assert_eq!(d, 11.0);
    }

    #[test]
    fn test_overwrite_ignores_nan() {
        let mut d = f64::NAN;
        ScalePair::new(1.0, 0.0).apply(4.0, &mut d);
        assert_eq!(d, 4.0);
    }

    #[test]
    fn test_gemm_coefficients_match_apply() {
        for &(a, b) in &[(2.0, 0.0), (2.0, 1.0), (2.0, -1.0), (-3.0, 0.25)] {
            let pair = ScalePair::new(a, b);
            let (alpha, beta) = pair.gemm_coefficients();
            let (c, d0) = (1.5, 7.0);
            let mut d = d0;
            pair.apply(c, &mut d);
            assert_eq!(d, alpha * c + beta * d0);
        }
    }

    #[test]
    fn test_apply_slice_general_blend() {
        let mut dst = vec![1.0, 2.0, 3.0];
        ScalePair::new(1.0, 2.0).apply_slice(&[1.0, 1.0, 1.0], &mut dst);
        assert_eq!(dst, vec![3.0, 5.0, 7.0]);

        let mut dst = vec![1.0, 2.0];
        ScalePair::new(1.0, -1.0).apply_slice(&[5.0, 5.0], &mut dst);
        assert_eq!(dst, vec![-4.0, -3.0]);
    }

    #[test]
    #[should_panic]
    fn test_apply_slice_length_mismatch_panics() {
        let mut dst = vec![0.0; 2];
        ScalePair::<f64>::assign().apply_slice(&[1.0], &mut dst);
    }
}
