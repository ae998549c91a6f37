//! Fundamental domain value types used throughout the engine.
//!
//! This module contains the core value types that model the pool domain:
//! addresses, raw amounts, asset indices, fee fractions, and event
//! payloads. All types use newtypes with validated constructors to
//! enforce invariants at the boundary.

mod address;
mod amount;
mod asset_index;
mod decimals;
mod event;
mod fee;
mod rounding;

pub use address::Address;
pub use amount::Amount;
pub use asset_index::AssetIndex;
pub use decimals::Decimals;
pub use event::PoolEvent;
pub use fee::{PoolFee, FEE_DENOMINATOR, MAX_ADMIN_FEE, MAX_FEE};
pub use rounding::Rounding;
