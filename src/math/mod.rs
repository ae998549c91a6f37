//! Numerical core: rate normalization and the StableSwap solvers.
//!
//! All solver arithmetic runs on 512-bit intermediates
//! (`primitive_types::U512`) so that products of 256-bit operands never
//! overflow silently; results narrow back to `U256` with an explicit
//! overflow check. Integer division truncates toward zero everywhere,
//! and the truncation direction is part of the accounting contract.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`RateTable`] | Maps native-precision balances into the 18-decimal x-space |
//! | [`compute_d`] | Invariant solver D(x₀, x₁, x₂; A) |
//! | [`compute_y`] | Inverse solver: output reserve preserving D after a swap |
//! | [`compute_y_from_d`] | Inverse solver: reserve at index i for a target D |

mod invariant;
mod rates;
mod solver;

pub use invariant::compute_d;
pub use rates::{precision, RateTable};
pub use solver::{compute_y, compute_y_from_d};

use primitive_types::{U256, U512};

use crate::error::PoolError;

/// Narrows a 512-bit intermediate back to 256 bits.
pub(crate) fn narrow(value: U512, context: &'static str) -> Result<U256, PoolError> {
    U256::try_from(value).map_err(|_| PoolError::Overflow(context))
}
