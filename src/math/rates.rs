//! Rate normalization between native asset precisions and x-space.

use primitive_types::{U256, U512};

use super::narrow;
use crate::domain::{Amount, Decimals};
use crate::error::PoolError;
use crate::N_COINS;

/// Returns `10^18`, the common virtual unit of the normalized x-space.
#[must_use]
pub fn precision() -> U256 {
    U256::exp10(18)
}

/// Fixed per-asset rate constants mapping native balances into a common
/// 18-decimal virtual unit.
///
/// For an asset with `d` decimals the rate is `10^(36 − d)`, chosen so
/// that `balance · rate / 10^18` is an 18-decimal amount. The canonical
/// DAI/USDC/USDT basket (18, 6, 6 decimals) yields rates
/// `(10^18, 10^30, 10^30)`.
///
/// Every solver input and every fee calculation goes through this table;
/// normalized and native quantities are never mixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: [U256; N_COINS],
}

impl RateTable {
    /// Builds the table from per-asset decimals.
    #[must_use]
    pub fn from_decimals(decimals: &[Decimals; N_COINS]) -> Self {
        let rates =
            core::array::from_fn(|i| U256::exp10(36 - usize::from(decimals[i].get())));
        Self { rates }
    }

    /// The canonical DAI/USDC/USDT table: decimals (18, 6, 6).
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            rates: [U256::exp10(18), U256::exp10(30), U256::exp10(30)],
        }
    }

    /// Returns the raw rate for asset `i`.
    #[must_use]
    pub fn rate(&self, i: usize) -> U256 {
        self.rates[i]
    }

    /// Maps a full native-precision balance vector into x-space:
    /// `xp[i] = balances[i] · rate[i] / 10^18`, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Overflow`] if a normalized component exceeds
    /// 256 bits.
    pub fn normalize(&self, balances: &[Amount; N_COINS]) -> Result<[U256; N_COINS], PoolError> {
        let mut xp = [U256::zero(); N_COINS];
        for (i, balance) in balances.iter().enumerate() {
            xp[i] = self.to_normalized(i, balance)?;
        }
        Ok(xp)
    }

    /// Maps a single native amount of asset `i` into x-space.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Overflow`] if the result exceeds 256 bits.
    pub fn to_normalized(&self, i: usize, amount: &Amount) -> Result<U256, PoolError> {
        let wide = U512::from(amount.get()) * U512::from(self.rates[i]);
        narrow(wide / U512::from(precision()), "rate normalization")
    }

    /// Maps an x-space value back to the native precision of asset `i`:
    /// `value · 10^18 / rate[i]`, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Overflow`] if the result exceeds 256 bits.
    pub fn from_normalized(&self, i: usize, value: U256) -> Result<Amount, PoolError> {
        let wide = U512::from(value) * U512::from(precision());
        let native = narrow(wide / U512::from(self.rates[i]), "rate denormalization")?;
        Ok(Amount::new(native))
    }
}
