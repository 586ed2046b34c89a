use dk_dense::{DenseError, Shape2};
use thiserror::Error;

/// How a dimension mismatch is surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    /// Logged at error level; the destination is left untouched and the
    /// caller may choose to ignore the error.
    Soft,
    /// The computation is aborted; there is no partial result.
    Hard,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("{op}: dimension mismatch {lhs} vs {rhs}")]
    DimensionMismatch {
        op: &'static str,
        lhs: Shape2,
        rhs: Shape2,
        policy: Failure,
    },
    #[error("container error: {0}")]
    Dense(#[from] DenseError),
}

impl KernelError {
    pub(crate) fn mismatch(op: &'static str, lhs: Shape2, rhs: Shape2, policy: Failure) -> Self {
        KernelError::DimensionMismatch {
            op,
            lhs,
            rhs,
            policy,
        }
    }

    /// Returns true for soft failures, where the destination was left unmodified.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            KernelError::DimensionMismatch {
                policy: Failure::Soft,
                ..
            }
        )
    }

    /// Emits the error record for a soft failure. Hard failures pass through.
    pub(crate) fn report(self) -> Self {
        if self.is_soft() {
            log::error!("{}", self);
        }
        self
    }
}

pub type Result<T> = std::result::Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = KernelError::mismatch(
            "mat_mult",
            Shape2::new(2, 3),
            Shape2::new(4, 5),
            Failure::Soft,
        );
        assert_eq!(e.to_string(), "mat_mult: dimension mismatch [2 x 3] vs [4 x 5]");
        assert!(e.is_soft());
    }

    #[test]
    fn test_hard_is_not_soft() {
        let e = KernelError::mismatch("mult", Shape2::new(2, 3), Shape2::vector(2), Failure::Hard);
        assert!(!e.is_soft());
        assert!(!KernelError::from(DenseError::DataLength {
            len: 1,
            shape: Shape2::new(2, 2)
        })
        .is_soft());
    }
}
