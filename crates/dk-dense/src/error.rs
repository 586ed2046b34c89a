use crate::shape::Shape2;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenseError {
    #[error("data length {len} does not match shape {shape}")]
    DataLength { len: usize, shape: Shape2 },
    #[error("ragged rows: row {row} has {got} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
}

pub type Result<T> = std::result::Result<T, DenseError>;
