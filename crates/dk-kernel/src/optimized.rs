//! GEMM engine backed by the `matrixmultiply` crate.
//!
//! Operands are marshalled into contiguous row-major buffers, the product is
//! computed by a single GEMM call and the result buffer is copied back into
//! the destination.

use dk_dense::{Complex64, DenseMatrix, Scalar};
use matrixmultiply::CGemmOption;

use crate::accumulate::ScalePair;
use crate::engine::{GemmEngine, KernelScalar};
use crate::error::{Failure, KernelError, Result};
use crate::resolve::{Op, Plan};

/// Engine that hands every product to an optimized GEMM kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizedEngine;

impl OptimizedEngine {
    pub fn new() -> Self {
        OptimizedEngine
    }
}

/// A row-major GEMM call, `C = alpha·op(A)·op(B) + beta·C`, described the
/// way CBLAS takes it: a transpose flag per operand and a leading dimension
/// per buffer (the stored row stride).
///
/// `op(A)` is `m x k`, `op(B)` is `k x n` and `C` is `m x n`.
#[derive(Debug)]
pub struct RowMajorGemm<'a, T> {
    pub trans_a: Op,
    pub trans_b: Op,
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub alpha: T,
    pub a: &'a [T],
    pub lda: usize,
    pub b: &'a [T],
    pub ldb: usize,
    pub beta: T,
    pub c: &'a mut [T],
    pub ldc: usize,
}

/// Number of elements a stored `rows x cols` block with row stride `ld` spans.
fn span(rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 {
        0
    } else {
        (rows - 1) * ld + cols
    }
}

/// Stored `(rows, cols)` of an operand whose logical shape is `rows x cols`.
fn stored(op: Op, rows: usize, cols: usize) -> (usize, usize) {
    match op {
        Op::AsIs => (rows, cols),
        Op::Transposed => (cols, rows),
    }
}

fn strides(op: Op, ld: usize) -> (isize, isize) {
    match op {
        Op::AsIs => (ld as isize, 1),
        Op::Transposed => (1, ld as isize),
    }
}

impl<T: Scalar> RowMajorGemm<'_, T> {
    /// Check every buffer covers the extent the strides will touch.
    ///
    /// # Panics
    /// Panics on a leading dimension smaller than the stored row length or
    /// a buffer shorter than its span.
    fn validate(&self) {
        let (ar, ac) = stored(self.trans_a, self.m, self.k);
        let (br, bc) = stored(self.trans_b, self.k, self.n);
        assert!(self.lda >= ac, "gemm: lda {} < {}", self.lda, ac);
        assert!(self.ldb >= bc, "gemm: ldb {} < {}", self.ldb, bc);
        assert!(self.ldc >= self.n, "gemm: ldc {} < {}", self.ldc, self.n);
        assert!(self.a.len() >= span(ar, ac, self.lda), "gemm: A buffer too short");
        assert!(self.b.len() >= span(br, bc, self.ldb), "gemm: B buffer too short");
        assert!(
            self.c.len() >= span(self.m, self.n, self.ldc),
            "gemm: C buffer too short"
        );
    }

    /// `C = beta·C`, the whole product when the inner dimension is empty.
    fn scale_c(&mut self) {
        for i in 0..self.m {
            for v in &mut self.c[i * self.ldc..i * self.ldc + self.n] {
                *v = if self.beta == T::zero() {
                    T::zero()
                } else {
                    self.beta * *v
                };
            }
        }
    }

    /// Validates the call and returns the strides `[rsa, csa, rsb, csb, rsc, csc]`,
    /// or `None` when there is nothing left for the kernel to do.
    fn prepare(&mut self) -> Option<[isize; 6]> {
        self.validate();
        if self.m == 0 || self.n == 0 {
            return None;
        }
        if self.k == 0 {
            self.scale_c();
            return None;
        }
        let (rsa, csa) = strides(self.trans_a, self.lda);
        let (rsb, csb) = strides(self.trans_b, self.ldb);
        Some([rsa, csa, rsb, csb, self.ldc as isize, 1])
    }
}

pub(crate) fn dgemm(mut call: RowMajorGemm<'_, f64>) {
    let Some([rsa, csa, rsb, csb, rsc, csc]) = call.prepare() else {
        return;
    };
    // SAFETY: `prepare` checked that every buffer covers the strided extent
    // of its operand, and `c` is exclusively borrowed.
    unsafe {
        matrixmultiply::dgemm(
            call.m,
            call.k,
            call.n,
            call.alpha,
            call.a.as_ptr(),
            rsa,
            csa,
            call.b.as_ptr(),
            rsb,
            csb,
            call.beta,
            call.c.as_mut_ptr(),
            rsc,
            csc,
        );
    }
}

pub(crate) fn zgemm(mut call: RowMajorGemm<'_, Complex64>) {
    let Some([rsa, csa, rsb, csb, rsc, csc]) = call.prepare() else {
        return;
    };
    // SAFETY: as for `dgemm`; `Complex64` is `repr(C)` with the same layout
    // as `[f64; 2]`.
    unsafe {
        matrixmultiply::zgemm(
            CGemmOption::Standard,
            CGemmOption::Standard,
            call.m,
            call.k,
            call.n,
            [call.alpha.re, call.alpha.im],
            call.a.as_ptr() as *const [f64; 2],
            rsa,
            csa,
            call.b.as_ptr() as *const [f64; 2],
            rsb,
            csb,
            [call.beta.re, call.beta.im],
            call.c.as_mut_ptr() as *mut [f64; 2],
            rsc,
            csc,
        );
    }
}

/// Row-major copies of the three operands of one call. Dropped on every
/// exit path of [`OptimizedEngine::gemm`].
struct Marshalled<T> {
    a: Vec<T>,
    b: Vec<T>,
    c: Vec<T>,
}

impl<T: Scalar> Marshalled<T> {
    fn dump<M: DenseMatrix<T> + ?Sized>(m: &M) -> Vec<T> {
        let mut buf = vec![T::zero(); m.shape().numel()];
        m.dump_data(&mut buf);
        buf
    }
}

impl GemmEngine for OptimizedEngine {
    fn name(&self) -> &str {
        "optimized"
    }

    fn gemm<T, A, B, C>(
        &self,
        plan: &Plan,
        a: &A,
        b: &B,
        scale: ScalePair<T>,
        c: &mut C,
    ) -> Result<()>
    where
        T: KernelScalar,
        A: DenseMatrix<T> + ?Sized,
        B: DenseMatrix<T> + ?Sized,
        C: DenseMatrix<T> + ?Sized,
    {
        if c.shape() != plan.output() {
            return Err(KernelError::mismatch(
                "gemm",
                c.shape(),
                plan.output(),
                Failure::Hard,
            ));
        }

        let mut buffers = Marshalled {
            a: Marshalled::<T>::dump(a),
            b: Marshalled::<T>::dump(b),
            c: Marshalled::<T>::dump(&*c),
        };
        let (alpha, beta) = scale.gemm_coefficients();

        T::gemm_row_major(RowMajorGemm {
            trans_a: plan.op_a,
            trans_b: plan.op_b,
            m: plan.m,
            n: plan.n,
            k: plan.k,
            alpha,
            a: &buffers.a,
            lda: a.cols(),
            b: &buffers.b,
            ldb: b.cols(),
            beta,
            c: &mut buffers.c,
            ldc: plan.n,
        });

        c.from_data(&buffers.c, plan.m, plan.n)?;
        Ok(())
    }
}
