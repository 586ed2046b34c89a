//! `dk-dense` - Dense matrix and vector containers for the dense-kernel workspace.
//!
//! This crate provides:
//! - A `Scalar` trait covering real (`f64`) and complex (`Complex64`) elements
//! - A `DenseMatrix` trait describing the shape, indexing and bulk-copy contract
//!   the kernel relies on
//! - Two matrix representations: the row-vector `Matrix` and the contiguous
//!   row-major `SmallMatrix`
//! - An owned `Vector` type and the `Shape2` shape pair

pub mod error;
pub mod matrix;
pub mod scalar;
pub mod shape;
pub mod small;
pub mod vector;

// Re-export primary types at the crate root for convenience.
pub use error::{DenseError, Result};
pub use matrix::{DenseMatrix, Matrix};
pub use num_complex::Complex64;
pub use scalar::{Scalar, ScalarKind};
pub use shape::Shape2;
pub use small::SmallMatrix;
pub use vector::Vector;
