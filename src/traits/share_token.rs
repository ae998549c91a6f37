//! Pool-share token capability.

use crate::domain::{Address, Amount};

/// Mint/burn capability for the pool-share token.
///
/// A single instance backs the pool. Supply only changes through
/// [`mint`](ShareToken::mint) and [`burn`](ShareToken::burn), and the
/// engine invokes both exclusively under its reentrancy lock, so the
/// supply observed by [`total_supply`](ShareToken::total_supply) is
/// always consistent with completed operations.
///
/// The share token is conventionally an ERC-20; a host may implement
/// this trait directly on the pool's own token contract.
pub trait ShareToken {
    /// Human-readable token name.
    fn name(&self) -> &str {
        "Curve.fi DAI/USDC/USDT"
    }

    /// Ticker symbol.
    fn symbol(&self) -> &str {
        "3CRV"
    }

    /// Creates `amount` new shares owned by `to`.
    ///
    /// Returns `false` if the mint cannot be completed.
    #[must_use]
    fn mint(&mut self, to: &Address, amount: Amount) -> bool;

    /// Destroys `amount` shares owned by `from`.
    ///
    /// Returns `false` if `from` holds fewer than `amount` shares.
    #[must_use]
    fn burn(&mut self, from: &Address, amount: Amount) -> bool;

    /// Returns the share balance of `holder`.
    fn balance_of(&self, holder: &Address) -> Amount;

    /// Returns the total outstanding share supply.
    fn total_supply(&self) -> Amount;
}
