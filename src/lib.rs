//! # Tripool
//!
//! A constant-function market-maker engine for three assets whose
//! intrinsic values are nominally equal (a stable basket, conventionally
//! DAI/USDC/USDT).
//!
//! The engine implements the StableSwap invariant: a hybrid between a
//! constant-sum and a constant-product curve that concentrates liquidity
//! near the equal-balance point while degrading gracefully to constant
//! product in the tails. It holds reserves of the three assets, issues
//! and redeems pool shares proportional to the invariant, charges a
//! swap/imbalance fee split between liquidity providers and an
//! administrator, and lets the administrator ramp the amplification
//! coefficient linearly over time.
//!
//! # Invariant (n = 3 tokens)
//!
//! ```text
//! A · n^n · Σx + D = A · n^n · D + D^(n+1) / (n^n · Πx)
//! ```
//!
//! where:
//! - `A` is the amplification coefficient (1 to 1,000,000),
//! - `D` is the invariant (total virtual liquidity at the peg),
//! - `x` are the reserves normalized to a common 18-decimal unit.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  builds StablePoolConfig, injects capabilities
//! └──────┬───────┘
//!        │ StablePool::new(config, assets, shares, clock, sink)
//!        ▼
//! ┌──────────────┐
//! │  StablePool   │  swap, add/remove liquidity, admin ops (pool)
//! └──────┬───────┘
//!        │ normalized reserves
//!        ▼
//! ┌──────────────┐
//! │    Solvers    │  compute_d, compute_y, compute_y_from_d (math)
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │ Capabilities  │  AssetToken, ShareToken, Clock, EventSink (traits)
//! └──────────────┘
//! ```
//!
//! # Quick Start
//!
//! The numerical core is usable on its own. Reserves are first scaled to
//! a common 18-decimal unit, then fed to the invariant solver:
//!
//! ```rust
//! use primitive_types::U256;
//! use tripool::math::compute_d;
//!
//! // A balanced pool of 1,000 units of each asset, 18-decimal scale.
//! let xp = [U256::exp10(21), U256::exp10(21), U256::exp10(21)];
//! let d = compute_d(&xp, 200).expect("solver converges");
//!
//! // At the peg the invariant equals the total of the reserves.
//! assert!(d > U256::exp10(21) * U256::from(3u64) - U256::from(2u64));
//! assert!(d < U256::exp10(21) * U256::from(3u64) + U256::from(2u64));
//! ```
//!
//! Driving the full engine requires the four capability seams defined in
//! [`traits`]: an [`AssetToken`](traits::AssetToken) per basket asset, a
//! [`ShareToken`](traits::ShareToken) for pool shares, a
//! [`Clock`](traits::Clock), and an [`EventSink`](traits::EventSink).
//! See `tests/integration.rs` for a complete in-memory wiring.
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`AssetIndex`](domain::AssetIndex), [`PoolFee`](domain::PoolFee), [`PoolEvent`](domain::PoolEvent) |
//! | [`traits`] | Capability seams: [`AssetToken`](traits::AssetToken), [`ShareToken`](traits::ShareToken), [`Clock`](traits::Clock), [`EventSink`](traits::EventSink) |
//! | [`config`] | [`StablePoolConfig`](config::StablePoolConfig) validated construction parameters |
//! | [`math`] | Rate normalizer and the D/y Newton solvers |
//! | [`pool`] | [`StablePool`](pool::StablePool) accounting engine, amplification ramp, reentrancy guard |
//! | [`error`] | [`PoolError`](error::PoolError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;

#[cfg(test)]
mod mock;

/// Number of assets in the basket. The engine is specialized to exactly
/// three; reserve vectors, rate tables, and fee vectors all have this
/// length.
pub const N_COINS: usize = 3;
