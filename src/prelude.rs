//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use tripool::prelude::*;
//! ```
//!
//! This re-exports the domain types, capability traits, configuration,
//! error types, and the pool itself so that consumers don't need to
//! import from individual submodules.

// Re-export domain types
pub use crate::domain::{
    Address, Amount, AssetIndex, Decimals, PoolEvent, PoolFee, Rounding, FEE_DENOMINATOR,
    MAX_ADMIN_FEE, MAX_FEE,
};

// Re-export capability traits
pub use crate::traits::{
    AssetToken, Clock, EventSink, NullSink, ShareToken, SystemClock, TracingSink,
};

// Re-export the solvers and normalizer
pub use crate::math::{compute_d, compute_y, compute_y_from_d, precision, RateTable};

// Re-export configuration
pub use crate::config::StablePoolConfig;

// Re-export error types
pub use crate::error::{PoolError, Result};

// Re-export the pool and ramp machinery
pub use crate::pool::{AmpRamp, StablePool, MAX_AMP, MAX_AMP_CHANGE, MIN_RAMP_TIME};

pub use crate::N_COINS;
