//! Validated index into the three-asset basket.

use core::fmt;

use crate::error::PoolError;
use crate::N_COINS;

/// An index into the pool's asset basket, guaranteed to be in `[0, 3)`.
///
/// Constructing an `AssetIndex` is the only bounds check in the engine:
/// every operation that takes an asset position accepts this type, so
/// out-of-range indices are rejected before any math runs.
///
/// # Examples
///
/// ```
/// use tripool::domain::AssetIndex;
///
/// let i = AssetIndex::new(0).expect("in range");
/// assert_eq!(i.get(), 0);
/// assert!(AssetIndex::new(3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetIndex(usize);

impl AssetIndex {
    /// Creates an `AssetIndex` after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidToken`] with the offending index if
    /// `index >= 3`.
    pub const fn new(index: usize) -> Result<Self, PoolError> {
        if index >= N_COINS {
            return Err(PoolError::InvalidToken(index));
        }
        Ok(Self(index))
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for AssetIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
