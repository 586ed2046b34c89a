use std::fmt::{self, Debug};

use dk_dense::{Complex64, DenseMatrix, Scalar};

use crate::accumulate::ScalePair;
use crate::error::Result;
#[cfg(feature = "matrixmultiply")]
use crate::optimized::{self, OptimizedEngine, RowMajorGemm};
use crate::resolve::Plan;

/// Strategy for executing a resolved matrix-matrix product.
///
/// Implementations compute `C = a·op(A)·op(B) + b·C` with the accumulation
/// semantics of [`ScalePair`]. The caller has already resolved the operand
/// roles and sized `C` to `plan.output()`.
pub trait GemmEngine: Send + Sync + Debug {
    /// Returns the name of this engine (e.g., "manual", "optimized").
    fn name(&self) -> &str;

    /// Execute `plan`, writing into `c`.
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
        C: DenseMatrix<T> + ?Sized;
}

/// Scalars every engine can multiply.
pub trait KernelScalar: Scalar {
    /// Row-major GEMM on marshalled buffers.
    #[cfg(feature = "matrixmultiply")]
    fn gemm_row_major(call: RowMajorGemm<'_, Self>);
}

impl KernelScalar for f64 {
    #[cfg(feature = "matrixmultiply")]
    fn gemm_row_major(call: RowMajorGemm<'_, Self>) {
        optimized::dgemm(call)
    }
}

impl KernelScalar for Complex64 {
    #[cfg(feature = "matrixmultiply")]
    fn gemm_row_major(call: RowMajorGemm<'_, Self>) {
        optimized::zgemm(call)
    }
}

/// The engine compiled in as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Manual,
    Optimized,
}

impl EngineKind {
    /// The engine selected by the enabled cargo features.
    pub const fn active() -> Self {
        if cfg!(feature = "matrixmultiply") {
            EngineKind::Optimized
        } else {
            EngineKind::Manual
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Manual => write!(f, "manual"),
            EngineKind::Optimized => write!(f, "optimized"),
        }
    }
}

#[cfg(feature = "matrixmultiply")]
pub type DefaultEngine = OptimizedEngine;

#[cfg(not(feature = "matrixmultiply"))]
pub type DefaultEngine = crate::manual::ManualEngine;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manual::ManualEngine;

    #[test]
    fn test_active_matches_default_engine() {
        let engine = DefaultEngine::default();
        assert_eq!(engine.name(), EngineKind::active().to_string());
    }

    #[test]
    fn test_manual_always_available() {
        assert_eq!(ManualEngine::new().name(), "manual");
    }
}
