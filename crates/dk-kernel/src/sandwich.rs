use dk_dense::{DenseMatrix, Shape2};

use crate::engine::{GemmEngine, KernelScalar};
use crate::error::{Failure, KernelError, Result};
use crate::multiply::Kernel;

impl<E: GemmEngine> Kernel<E> {
    /// `C = a·Aᵀ·B·A + b·C`, projecting the operator `B` through `A`.
    ///
    /// `atb` receives the intermediate `Aᵀ·B`. It is supplied by the caller
    /// so repeated projections can reuse its storage; its previous contents
    /// are ignored.
    ///
    /// The second product `(Aᵀ·B)·op(A)` goes through the shape resolver like
    /// any `mat_mult`. For a square `B` that is the sandwich. If `B` is not
    /// square and `cols(B) == cols(A)`, the resolver picks `Aᵀ` and the
    /// result is `Aᵀ·B·Aᵀ`, of shape `cols(A) x rows(A)`.
    ///
    /// # Errors
    /// Soft `DimensionMismatch` if `rows(A) != rows(B)`; `C` is not touched.
    pub fn mat_mult_aba<T, A, B, C, W>(
        &self,
        a: &A,
        b: &B,
        c: &mut C,
        atb: &mut W,
        alpha: T,
        beta: T,
    ) -> Result<Shape2>
    where
        T: KernelScalar,
        A: DenseMatrix<T> + ?Sized,
        B: DenseMatrix<T> + ?Sized,
        C: DenseMatrix<T> + ?Sized,
        W: DenseMatrix<T> + ?Sized,
    {
        if a.rows() != b.rows() {
            return Err(
                KernelError::mismatch("mat_mult_aba", a.shape(), b.shape(), Failure::Soft).report(),
            );
        }
        atb.resize(a.cols(), b.rows());
        self.mat_trans_mult(a, b, atb, T::one(), T::zero())?;
        self.mat_mult(&*atb, a, c, alpha, beta)
    }
}

/// [`Kernel::mat_mult_aba`] on the default engine.
pub fn mat_mult_aba<T, A, B, C, W>(
    a: &A,
    b: &B,
    c: &mut C,
    atb: &mut W,
    alpha: T,
    beta: T,
) -> Result<Shape2>
where
    T: KernelScalar,
    A: DenseMatrix<T> + ?Sized,
    B: DenseMatrix<T> + ?Sized,
    C: DenseMatrix<T> + ?Sized,
    W: DenseMatrix<T> + ?Sized,
{
    Kernel::new().mat_mult_aba(a, b, c, atb, alpha, beta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manual::ManualEngine;
    use crate::multiply::{mat_mult, mat_trans_mult};
    use approx::assert_abs_diff_eq;
    use dk_dense::{Matrix, SmallMatrix};

    fn m(rows: Vec<Vec<f64>>) -> Matrix<f64> {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_matches_two_step_product() {
        let a = m(vec![vec![1.0, 0.0], vec![2.0, 1.0], vec![0.0, 3.0]]);
        let b = m(vec![
            vec![2.0, -1.0, 0.0],
            vec![-1.0, 2.0, -1.0],
            vec![0.0, -1.0, 2.0],
        ]);

        let mut c = Matrix::new(0, 0);
        let mut atb = Matrix::new(0, 0);
        let shape = mat_mult_aba(&a, &b, &mut c, &mut atb, 1.0, 0.0).unwrap();
        assert_eq!(shape, Shape2::new(2, 2));

        let mut t = Matrix::new(0, 0);
        mat_trans_mult(&a, &b, &mut t, 1.0, 0.0).unwrap();
        let mut expected = Matrix::new(0, 0);
        mat_mult(&t, &a, &mut expected, 1.0, 0.0).unwrap();

        assert_eq!(atb.shape(), Shape2::new(2, 3));
        for i in 0..2 {
            for j in 0..2 {
                assert_abs_diff_eq!(c[(i, j)], expected[(i, j)], epsilon = 1e-12);
            }
        }
        // Aᵀ·B·A for this tridiagonal B.
        assert_abs_diff_eq!(c[(0, 0)], 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[(0, 1)], -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[(1, 0)], -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[(1, 1)], 14.0, epsilon = 1e-12);
    }

    #[test]
    fn test_accumulates_into_c() {
        let kernel = Kernel::with_engine(ManualEngine::new());
        let a = SmallMatrix::identity(2);
        let b = SmallMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        let mut c = SmallMatrix::from_vec(vec![1.0, 1.0, 1.0, 1.0], 2, 2).unwrap();
        let mut atb = SmallMatrix::new(5, 5);
        kernel
            .mat_mult_aba(&a, &b, &mut c, &mut atb, 2.0, -1.0)
            .unwrap();
        // C - 2·B
        assert_eq!(c.as_slice(), &[-1.0, -3.0, -5.0, -7.0]);
    }

    #[test]
    fn test_non_square_b_falls_back_to_transposed_a() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        let b = m(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]);
        let mut c = Matrix::new(0, 0);
        let mut atb = Matrix::new(0, 0);
        let shape = mat_mult_aba(&a, &b, &mut c, &mut atb, 1.0, 0.0).unwrap();
        assert_eq!(shape, Shape2::new(2, 3));

        // Aᵀ·B = [6,8;8,10], then times Aᵀ.
        let mut expected = Matrix::new(0, 0);
        mat_mult(&atb, &a.transpose(), &mut expected, 1.0, 0.0).unwrap();
        assert_eq!(expected.shape(), Shape2::new(2, 3));
        for i in 0..2 {
            for j in 0..3 {
                assert_abs_diff_eq!(c[(i, j)], expected[(i, j)], epsilon = 1e-12);
            }
        }
        assert_abs_diff_eq!(c[(0, 0)], 22.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c[(1, 2)], 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_row_mismatch_is_soft_and_leaves_c() {
        let _ = env_logger::builder().is_test(true).try_init();
        let a = m(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let b = Matrix::identity(3);
        let mut c = m(vec![vec![4.0]]);
        let mut atb = Matrix::new(0, 0);
        let err = mat_mult_aba(&a, &b, &mut c, &mut atb, 1.0, 0.0).unwrap_err();
        assert!(err.is_soft());
        assert_eq!(c, m(vec![vec![4.0]]));
    }
}
