//! Fee fractions over a fixed 10^10 denominator.

use core::fmt;

use primitive_types::{U256, U512};

use super::Amount;
use crate::N_COINS;

/// Denominator of all fee fractions: a fee of `n` means `n / 10^10`.
pub const FEE_DENOMINATOR: u64 = 10_000_000_000;

/// Maximum trade fee: 50% of the denominator.
pub const MAX_FEE: u64 = FEE_DENOMINATOR / 2;

/// Maximum admin fee: the full denominator (the admin may take the
/// entire trade fee).
pub const MAX_ADMIN_FEE: u64 = FEE_DENOMINATOR;

/// A fee fraction with denominator [`FEE_DENOMINATOR`].
///
/// Used both for the trade fee (taken from swap output and from
/// imbalance deviations) and for the admin fee (the fraction of the
/// trade fee diverted from liquidity providers to the administrator).
///
/// # Examples
///
/// ```
/// use tripool::domain::{Amount, PoolFee};
///
/// // 0.04% trade fee, the conventional stable-basket setting.
/// let fee = PoolFee::new(4_000_000).expect("in range");
/// let cut = fee.apply_to(&Amount::from_u128(10_000_000_000)).expect("no overflow");
/// assert_eq!(cut, Amount::from_u128(4_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PoolFee(u64);

impl PoolFee {
    /// Zero fee.
    pub const ZERO: Self = Self(0);

    /// Creates a fee fraction after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PoolError::InvalidFee`] if `raw` exceeds
    /// [`FEE_DENOMINATOR`].
    pub const fn new(raw: u64) -> Result<Self, crate::error::PoolError> {
        if raw > FEE_DENOMINATOR {
            return Err(crate::error::PoolError::InvalidFee(
                "fee exceeds the 10^10 denominator",
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the raw numerator.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the fee is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes `amount · fee / FEE_DENOMINATOR`, truncating.
    ///
    /// The product widens through 512 bits; the quotient always fits
    /// because the fee numerator never exceeds the denominator.
    #[must_use]
    pub fn apply_to(&self, amount: &Amount) -> Option<Amount> {
        let wide = U512::from(amount.get()) * U512::from(self.0);
        let q = wide / U512::from(FEE_DENOMINATOR);
        U256::try_from(q).ok().map(Amount::new)
    }

    /// Derives the imbalance fee `fee · n / (4 · (n − 1))` applied to
    /// the deviation of a deposit or withdrawal from the pool's current
    /// composition.
    ///
    /// For three assets this is `fee · 3 / 8`, which prices a maximally
    /// imbalanced deposit identically to the swap that would rebalance
    /// it.
    #[must_use]
    pub const fn imbalance(&self) -> Self {
        Self(self.0 * N_COINS as u64 / (4 * (N_COINS as u64 - 1)))
    }
}

impl fmt::Display for PoolFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, FEE_DENOMINATOR)
    }
}
