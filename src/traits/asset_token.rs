//! Basket-asset transfer capability.

use crate::domain::{Address, Amount};

/// Transfer capability for one basket asset.
///
/// The pool holds three independent instances, one per asset, and uses
/// them to pull deposits from callers and push withdrawals out. The
/// trait models the asset from the pool's point of view: `transfer`
/// moves funds out of the pool's own balance, `transfer_from` moves
/// funds between third-party accounts (caller to pool on deposit).
///
/// # Failure Contract
///
/// A `false` return from [`transfer`](AssetToken::transfer) or
/// [`transfer_from`](AssetToken::transfer_from) is fatal to the calling
/// operation and surfaces as
/// [`PoolError::TransferFailed`](crate::error::PoolError::TransferFailed).
/// Returning `true` while moving less than the requested amount is not
/// tolerated; assets with fee-on-transfer or rebasing behavior must be
/// rejected at construction rather than wrapped.
pub trait AssetToken {
    /// Returns the asset's address. The all-zero address marks a null
    /// asset and is rejected at pool construction.
    fn address(&self) -> Address;

    /// Returns the balance held by `holder`.
    fn balance_of(&self, holder: &Address) -> Amount;

    /// Moves `amount` from the pool's balance to `to`.
    ///
    /// Returns `false` if the transfer cannot be completed in full.
    #[must_use]
    fn transfer(&mut self, to: &Address, amount: Amount) -> bool;

    /// Moves `amount` from `from` to `to` on the caller's authority.
    ///
    /// Returns `false` if the transfer cannot be completed in full.
    #[must_use]
    fn transfer_from(&mut self, from: &Address, to: &Address, amount: Amount) -> bool;
}
