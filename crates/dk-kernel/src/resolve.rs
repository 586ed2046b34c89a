//! Shape-driven operand-role inference.
//!
//! Given the shapes of `A` and `B` and the product family, decides whether
//! `B` is used as given or transposed so that the inner dimensions agree.
//! The as-given interpretation is always tried first: for a square `B` both
//! readings are consistent and the plain one wins. Callers that need `Bᵀ`
//! for a square `B` must materialize the transpose themselves.

use crate::error::{Failure, KernelError, Result};
use dk_dense::Shape2;

/// Which product is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// `A·op(B)`
    Mult,
    /// `Aᵀ·op(B)`
    TransMult,
}

impl Family {
    pub fn op_name(&self) -> &'static str {
        match self {
            Family::Mult => "mat_mult",
            Family::TransMult => "mat_trans_mult",
        }
    }

    /// `mat_mult` mismatches are soft, `mat_trans_mult` mismatches are hard.
    pub fn policy(&self) -> Failure {
        match self {
            Family::Mult => Failure::Soft,
            Family::TransMult => Failure::Hard,
        }
    }
}

/// The role of one operand in a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    AsIs,
    Transposed,
}

/// A resolved product `C(m x n) = op(A)(m x k) · op(B)(k x n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Plan {
    pub op_a: Op,
    pub op_b: Op,
    pub m: usize,
    pub k: usize,
    pub n: usize,
}

impl Plan {
    /// Shape of the product.
    pub fn output(&self) -> Shape2 {
        Shape2::new(self.m, self.n)
    }
}

/// Where the product is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Write `op(A)·op(B)` into the destination, resizing it if needed.
    Direct,
    /// The destination holds the mirrored product; re-issue with `A` and `B`
    /// swapped so its contents can be blended instead of discarded.
    Mirror,
}

/// Decide the operand roles for `family` given the shapes of `A` and `B`.
pub fn resolve_roles(a: Shape2, b: Shape2, family: Family) -> Result<Plan> {
    let (op_a, m, k) = match family {
        Family::Mult => (Op::AsIs, a.rows, a.cols),
        Family::TransMult => (Op::Transposed, a.cols, a.rows),
    };

    let (op_b, n) = if k == b.rows {
        (Op::AsIs, b.cols)
    } else if k == b.cols {
        (Op::Transposed, b.rows)
    } else {
        return Err(KernelError::mismatch(
            family.op_name(),
            a,
            b,
            family.policy(),
        ));
    };

    Ok(Plan {
        op_a,
        op_b,
        m,
        k,
        n,
    })
}

/// Decide whether the destination of a resolved product is written directly
/// or through the mirrored `Bᵀ·A` product.
///
/// Only `TransMult` with an as-given `B` is eligible, and only when the
/// destination must be blended (`overwrite == false`) and its current shape
/// is the transpose of the natural output.
pub fn resolve_target(plan: &Plan, family: Family, dest: Shape2, overwrite: bool) -> Target {
    let output = plan.output();
    if family == Family::TransMult
        && plan.op_b == Op::AsIs
        && !overwrite
        && dest != output
        && dest == output.transposed()
    {
        Target::Mirror
    } else {
        Target::Direct
    }
}
