//! Matrix-vector products and the in-place transpose-add.
//!
//! `mult`, `mult_range`, `trans_mult` and the accumulating `*_into` variants
//! fail hard on a length mismatch. `trans_add` fails soft: the mismatch is
//! logged and the destination is left as it was.

use dk_dense::vector::dot;
use dk_dense::{DenseMatrix, Scalar, Shape2, Vector};

use crate::accumulate::ScalePair;
use crate::error::{Failure, KernelError, Result};

fn hard(op: &'static str, a: Shape2, len: usize) -> KernelError {
    KernelError::mismatch(op, a, Shape2::vector(len), Failure::Hard)
}

/// `A·x`. Requires `len(x) == cols(A)`; the result has `rows(A)` elements.
pub fn mult<T, M>(a: &M, x: &Vector<T>) -> Result<Vector<T>>
where
    T: Scalar,
    M: DenseMatrix<T> + ?Sized,
{
    if x.len() != a.cols() {
        return Err(hard("mult", a.shape(), x.len()));
    }
    Ok(product(a, x.as_slice()))
}

fn product<T, M>(a: &M, x: &[T]) -> Vector<T>
where
    T: Scalar,
    M: DenseMatrix<T> + ?Sized,
{
    (0..a.rows()).map(|i| dot(a.row(i), x)).collect::<Vec<_>>().into()
}

/// `A·x[start..end]`: the columns of `A` are laid over the window
/// `[start, end)` of `x`.
///
/// The window must cover exactly `cols(A)` elements of `x`; a narrower or
/// wider window is an error, never a partial dot product.
pub fn mult_range<T, M>(a: &M, x: &Vector<T>, start: usize, end: usize) -> Result<Vector<T>>
where
    T: Scalar,
    M: DenseMatrix<T> + ?Sized,
{
    if start > end || end - start != a.cols() {
        return Err(hard("mult_range", a.shape(), end.saturating_sub(start)));
    }
    if end > x.len() {
        return Err(hard("mult_range", a.shape(), x.len()));
    }
    Ok(product(a, &x.as_slice()[start..end]))
}

/// `Aᵀ·y`. Requires `len(y) == rows(A)`; the result has `cols(A)` elements.
pub fn trans_mult<T, M>(a: &M, y: &Vector<T>) -> Result<Vector<T>>
where
    T: Scalar,
    M: DenseMatrix<T> + ?Sized,
{
    if y.len() != a.rows() {
        return Err(hard("trans_mult", a.shape(), y.len()));
    }
    Ok(trans_product(a, y.as_slice()))
}

fn trans_product<T, M>(a: &M, y: &[T]) -> Vector<T>
where
    T: Scalar,
    M: DenseMatrix<T> + ?Sized,
{
    let mut ret = Vector::zeros(a.cols());
    for (i, &yi) in y.iter().enumerate() {
        for (r, &v) in ret.as_mut_slice().iter_mut().zip(a.row(i)) {
            *r += v * yi;
        }
    }
    ret
}

/// `y = a·A·x + b·y`.
///
/// `y` is resized (and zeroed) only when its length differs from `rows(A)`.
pub fn mult_into<T, M>(a: &M, x: &Vector<T>, y: &mut Vector<T>, alpha: T, beta: T) -> Result<()>
where
    T: Scalar,
    M: DenseMatrix<T> + ?Sized,
{
    let p = mult(a, x)?;
    y.resize(p.len());
    ScalePair::new(alpha, beta).apply_slice(p.as_slice(), y.as_mut_slice());
    Ok(())
}

/// `y = a·Aᵀ·x + b·y`.
///
/// `y` is resized (and zeroed) only when its length differs from `cols(A)`.
pub fn trans_mult_into<T, M>(
    a: &M,
    x: &Vector<T>,
    y: &mut Vector<T>,
    alpha: T,
    beta: T,
) -> Result<()>
where
    T: Scalar,
    M: DenseMatrix<T> + ?Sized,
{
    let p = trans_mult(a, x)?;
    y.resize(p.len());
    ScalePair::new(alpha, beta).apply_slice(p.as_slice(), y.as_mut_slice());
    Ok(())
}

/// In place `A += Bᵀ`.
///
/// # Errors
/// Soft `DimensionMismatch` unless `rows(A) == cols(B)` and
/// `cols(A) == rows(B)`; `A` is left untouched.
pub fn trans_add<T, A, B>(a: &mut A, b: &B) -> Result<()>
where
    T: Scalar,
    A: DenseMatrix<T> + ?Sized,
    B: DenseMatrix<T> + ?Sized,
{
    if a.shape() != b.shape().transposed() {
        return Err(KernelError::mismatch("trans_add", a.shape(), b.shape(), Failure::Soft).report());
    }
    for i in 0..a.rows() {
        for (j, v) in a.row_mut(i).iter_mut().enumerate() {
            *v += b.get(j, i);
        }
    }
    Ok(())
}
