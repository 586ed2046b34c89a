use dk_dense::DenseMatrix;

use crate::accumulate::ScalePair;
use crate::engine::{GemmEngine, KernelScalar};
use crate::error::{Failure, KernelError, Result};
use crate::resolve::{Op, Plan};

/// Pure-Rust triple-loop engine.
///
/// Works directly on the matrices' native indexing without marshalling and
/// applies the scale pair per output element. Intended as the reference
/// implementation and fallback, not as a performance path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualEngine;

impl ManualEngine {
    pub fn new() -> Self {
        ManualEngine
    }
}

#[inline]
fn at<T, M>(m: &M, op: Op, i: usize, j: usize) -> T
where
    T: KernelScalar,
    M: DenseMatrix<T> + ?Sized,
{
    match op {
        Op::AsIs => m.get(i, j),
        Op::Transposed => m.get(j, i),
    }
}

impl GemmEngine for ManualEngine {
    fn name(&self) -> &str {
        "manual"
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

        for i in 0..plan.m {
            for j in 0..plan.n {
                let mut sum = T::zero();
                for p in 0..plan.k {
                    sum += at::<T, _>(a, plan.op_a, i, p) * at::<T, _>(b, plan.op_b, p, j);
                }
                scale.apply(sum, &mut c.row_mut(i)[j]);
            }
        }
        Ok(())
    }
}
