//! Raw token amount with checked 256-bit arithmetic.

use core::fmt;

use primitive_types::{U256, U512};

use super::Rounding;

/// A raw token amount in the smallest unit of its asset, 256 bits wide.
///
/// `Amount` never interprets decimals; scaling between native precisions
/// and the common 18-decimal unit is the job of the rate table in
/// [`math`](crate::math). All `U256` values are valid amounts.
///
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking. Products that
/// can exceed 256 bits widen through `U512` internally.
///
/// # Examples
///
/// ```
/// use tripool::domain::Amount;
///
/// let a = Amount::from_u128(100);
/// let b = Amount::from_u128(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::from_u128(300)));
/// assert_eq!(b.checked_sub(&a), Some(Amount::from_u128(100)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(U256);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// Maximum representable amount.
    pub const MAX: Self = Self(U256([u64::MAX, u64::MAX, u64::MAX, u64::MAX]));

    /// Creates a new `Amount` from a raw `U256` value.
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Creates an `Amount` from a `u128`, widening losslessly.
    pub fn from_u128(value: u128) -> Self {
        Self(U256::from(value))
    }

    /// Returns the underlying `U256` value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        self.0.checked_mul(other.0).map(Self)
    }

    /// Checked division with explicit rounding direction.
    ///
    /// - [`Rounding::Down`]: floor division (round towards zero).
    /// - [`Rounding::Up`]: ceiling division.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0.is_zero() {
            return None;
        }
        let q = self.0 / divisor.0;
        match rounding {
            Rounding::Down => Some(Self(q)),
            Rounding::Up => {
                if (self.0 % divisor.0).is_zero() {
                    Some(Self(q))
                } else {
                    // q + 1 cannot overflow: a remainder exists, so the
                    // quotient is strictly below U256::MAX.
                    Some(Self(q + U256::one()))
                }
            }
        }
    }

    /// Computes `self · mul / div` with a 512-bit intermediate product,
    /// truncating the quotient.
    ///
    /// Returns `None` if `div` is zero or the quotient exceeds 256 bits.
    #[must_use]
    pub fn mul_div(&self, mul: &Self, div: &Self) -> Option<Self> {
        if div.0.is_zero() {
            return None;
        }
        let wide = U512::from(self.0) * U512::from(mul.0);
        let q = wide / U512::from(div.0);
        U256::try_from(q).ok().map(Self)
    }

    /// Returns the absolute difference `|self − other|`.
    #[must_use]
    pub fn abs_diff(&self, other: &Self) -> Self {
        if self.0 >= other.0 {
            Self(self.0 - other.0)
        } else {
            Self(other.0 - self.0)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}
