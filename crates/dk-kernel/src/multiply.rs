use dk_dense::{DenseMatrix, Shape2};
use log::{debug, trace};

use crate::accumulate::ScalePair;
use crate::engine::{DefaultEngine, GemmEngine, KernelScalar};
use crate::error::Result;
use crate::resolve::{resolve_roles, resolve_target, Family, Plan, Target};

/// Generalized, scaled, accumulating matrix-matrix products on top of a
/// [`GemmEngine`].
///
/// The engine is fixed when the kernel is built; `Kernel::default()` uses
/// the engine selected by the enabled cargo features.
#[derive(Debug, Clone, Default)]
pub struct Kernel<E: GemmEngine = DefaultEngine> {
    engine: E,
}

impl Kernel<DefaultEngine> {
    /// Create a kernel running on the default engine.
    pub fn new() -> Self {
        Kernel {
            engine: DefaultEngine::default(),
        }
    }
}

impl<E: GemmEngine> Kernel<E> {
    /// Create a kernel running on `engine`.
    pub fn with_engine(engine: E) -> Self {
        Kernel { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// `C = a·A·op(B) + b·C`, where `op(B)` is `B` or `Bᵀ`, whichever matches
    /// the columns of `A` (plain first).
    ///
    /// Returns the shape of the product. `C` is resized only when its shape
    /// differs from the product's.
    ///
    /// # Errors
    /// Soft `DimensionMismatch` when neither reading of `B` fits; the error
    /// is logged and `C` is not touched.
    pub fn mat_mult<T, A, B, C>(&self, a: &A, b: &B, c: &mut C, alpha: T, beta: T) -> Result<Shape2>
    where
        T: KernelScalar,
        A: DenseMatrix<T> + ?Sized,
        B: DenseMatrix<T> + ?Sized,
        C: DenseMatrix<T> + ?Sized,
    {
        let plan =
            resolve_roles(a.shape(), b.shape(), Family::Mult).map_err(|e| e.report())?;
        self.run(Family::Mult, &plan, a, b, c, ScalePair::new(alpha, beta))
    }

    /// `C = a·Aᵀ·op(B) + b·C`, where `op(B)` is `B` or `Bᵀ`, whichever matches
    /// the rows of `A` (plain first).
    ///
    /// When `b != 0` and `C` already has the shape of the mirrored product
    /// `op(B)ᵀ·A`, the call is re-issued with `A` and `B` swapped so that the
    /// existing contents of `C` are blended rather than discarded.
    ///
    /// # Errors
    /// Hard `DimensionMismatch` when neither reading of `B` fits.
    pub fn mat_trans_mult<T, A, B, C>(
        &self,
        a: &A,
        b: &B,
        c: &mut C,
        alpha: T,
        beta: T,
    ) -> Result<Shape2>
    where
        T: KernelScalar,
        A: DenseMatrix<T> + ?Sized,
        B: DenseMatrix<T> + ?Sized,
        C: DenseMatrix<T> + ?Sized,
    {
        let scale = ScalePair::new(alpha, beta);
        let plan = resolve_roles(a.shape(), b.shape(), Family::TransMult)?;

        if resolve_target(&plan, Family::TransMult, c.shape(), scale.overwrites())
            == Target::Mirror
        {
            debug!(
                "mat_trans_mult: destination {} matches the mirrored product, swapping operands",
                c.shape()
            );
            return self.mat_trans_mult(b, a, c, alpha, beta);
        }
        self.run(Family::TransMult, &plan, a, b, c, scale)
    }

    fn run<T, A, B, C>(
        &self,
        family: Family,
        plan: &Plan,
        a: &A,
        b: &B,
        c: &mut C,
        scale: ScalePair<T>,
    ) -> Result<Shape2>
    where
        T: KernelScalar,
        A: DenseMatrix<T> + ?Sized,
        B: DenseMatrix<T> + ?Sized,
        C: DenseMatrix<T> + ?Sized,
    {
        let out = plan.output();
        if c.shape() != out {
            c.resize(out.rows, out.cols);
        }
        trace!(
            "{}: {} engine, {} m={} k={} n={} op_b={:?}",
            family.op_name(),
            self.engine.name(),
            T::KIND,
            plan.m,
            plan.k,
            plan.n,
            plan.op_b
        );
        self.engine.gemm(plan, a, b, scale, c)?;
        Ok(out)
    }
}

/// [`Kernel::mat_mult`] on the default engine.
pub fn mat_mult<T, A, B, C>(a: &A, b: &B, c: &mut C, alpha: T, beta: T) -> Result<Shape2>
where
    T: KernelScalar,
    A: DenseMatrix<T> + ?Sized,
    B: DenseMatrix<T> + ?Sized,
    C: DenseMatrix<T> + ?Sized,
{
    Kernel::new().mat_mult(a, b, c, alpha, beta)
}

/// [`Kernel::mat_trans_mult`] on the default engine.
pub fn mat_trans_mult<T, A, B, C>(a: &A, b: &B, c: &mut C, alpha: T, beta: T) -> Result<Shape2>
where
    T: KernelScalar,
    A: DenseMatrix<T> + ?Sized,
    B: DenseMatrix<T> + ?Sized,
    C: DenseMatrix<T> + ?Sized,
{
    Kernel::new().mat_trans_mult(a, b, c, alpha, beta)
}
