//! Notification payloads emitted by pool operations.

use super::{Address, Amount};
use crate::N_COINS;

/// A fire-and-forget notification describing a completed pool operation.
///
/// Events are pushed into the [`EventSink`](crate::traits::EventSink)
/// capability after the operation's state changes and external transfers
/// have succeeded; they are never consumed by the engine itself.
///
/// Liquidity events carry the post-operation invariant and share supply
/// so observers can track the virtual price without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    /// A swap of asset `sold_id` for asset `bought_id`.
    TokenSwap {
        /// The account that initiated the swap.
        buyer: Address,
        /// Index of the asset sold to the pool.
        sold_id: usize,
        /// Amount of the sold asset, native precision.
        tokens_sold: Amount,
        /// Index of the asset bought from the pool.
        bought_id: usize,
        /// Amount of the bought asset after fees, native precision.
        tokens_bought: Amount,
    },

    /// A deposit of up to three assets in exchange for pool shares.
    AddLiquidity {
        /// The depositing account.
        provider: Address,
        /// Deposited amounts, native precision per asset.
        amounts: [Amount; N_COINS],
        /// Imbalance fees charged per asset (all zero on first deposit).
        fees: [Amount; N_COINS],
        /// Invariant D after the deposit.
        invariant: Amount,
        /// Share supply after minting.
        share_supply: Amount,
    },

    /// A balanced, pro-rata withdrawal.
    RemoveLiquidity {
        /// The withdrawing account.
        provider: Address,
        /// Withdrawn amounts, native precision per asset.
        amounts: [Amount; N_COINS],
        /// Share supply after burning.
        share_supply: Amount,
    },

    /// A withdrawal paid out entirely in one asset.
    RemoveLiquidityOne {
        /// The withdrawing account.
        provider: Address,
        /// Shares burned.
        shares_burned: Amount,
        /// Amount of the single asset paid out, native precision.
        amount_out: Amount,
    },

    /// A withdrawal of caller-chosen amounts, shares burned to match.
    RemoveLiquidityImbalance {
        /// The withdrawing account.
        provider: Address,
        /// Withdrawn amounts, native precision per asset.
        amounts: [Amount; N_COINS],
        /// Imbalance fees charged per asset.
        fees: [Amount; N_COINS],
        /// Invariant D after the withdrawal.
        invariant: Amount,
        /// Share supply after burning.
        share_supply: Amount,
    },

    /// The amplification coefficient started ramping.
    RampAmp {
        /// A at the moment the ramp started.
        old_amp: u64,
        /// Target A at the deadline.
        new_amp: u64,
        /// Ramp start, seconds.
        initial_time: u64,
        /// Ramp deadline, seconds.
        future_time: u64,
    },

    /// An in-progress ramp was frozen at the current A.
    StopRampAmp {
        /// A at the moment the ramp stopped.
        current_amp: u64,
        /// Stop time, seconds.
        time: u64,
    },
}
