//! `dk-kernel` - Dense matrix-matrix and matrix-vector products.
//!
//! This crate provides:
//! - Generalized, scaled, accumulating products `C = a·op(A)·op(B) + b·C`
//!   with the transposed operand inferred from the shapes (`Kernel::mat_mult`,
//!   `Kernel::mat_trans_mult`)
//! - The sandwich transform `C = a·Aᵀ·B·A + b·C` (`Kernel::mat_mult_aba`)
//! - Matrix-vector products, plain, windowed and transposed, and the
//!   in-place transpose-add (`matvec`)
//! - A `GemmEngine` trait with a reference `ManualEngine` and, with the
//!   `matrixmultiply` feature, an `OptimizedEngine`

pub mod accumulate;
pub mod engine;
pub mod error;
pub mod manual;
pub mod matvec;
pub mod multiply;
#[cfg(feature = "matrixmultiply")]
pub mod optimized;
pub mod resolve;
pub mod sandwich;

// Re-export primary types at the crate root for convenience.
pub use accumulate::{Blend, ScalePair};
pub use engine::{DefaultEngine, EngineKind, GemmEngine, KernelScalar};
pub use error::{Failure, KernelError, Result};
pub use manual::ManualEngine;
pub use multiply::{mat_mult, mat_trans_mult, Kernel};
#[cfg(feature = "matrixmultiply")]
pub use optimized::OptimizedEngine;
pub use resolve::{resolve_roles, Family, Op, Plan};
pub use sandwich::mat_mult_aba;
