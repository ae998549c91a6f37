//! Configuration for the three-asset StableSwap pool.

use crate::domain::{Address, Decimals, PoolFee, MAX_FEE};
use crate::error::PoolError;
use crate::pool::MAX_AMP;
use crate::N_COINS;

/// Immutable construction parameters for a
/// [`StablePool`](crate::pool::StablePool).
///
/// Capabilities (assets, shares, clock, sink) are injected separately at
/// construction; the config carries only plain parameters so it can be
/// built, validated, and logged independently of any host wiring.
///
/// # Validation
///
/// - `owner` and `pool_address` must be non-null and distinct.
/// - `initial_amp` must lie in `[1, 10^6]`.
/// - The trade fee must not exceed half the denominator; the admin fee
///   may take up to the whole trade fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StablePoolConfig {
    owner: Address,
    pool_address: Address,
    decimals: [Decimals; N_COINS],
    initial_amp: u64,
    fee: PoolFee,
    admin_fee: PoolFee,
}

impl StablePoolConfig {
    /// Creates a new `StablePoolConfig`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidAddress`] if `owner` or `pool_address` is
    ///   null, or if they coincide.
    /// - [`PoolError::InvalidConfiguration`] if `initial_amp` is outside
    ///   `[1, 10^6]`.
    /// - [`PoolError::InvalidFee`] if the trade fee exceeds half the
    ///   denominator.
    pub fn new(
        owner: Address,
        pool_address: Address,
        decimals: [Decimals; N_COINS],
        initial_amp: u64,
        fee: PoolFee,
        admin_fee: PoolFee,
    ) -> Result<Self, PoolError> {
        let config = Self {
            owner,
            pool_address,
            decimals,
            initial_amp,
            fee,
            admin_fee,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`StablePoolConfig::new`].
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.owner.is_zero() {
            return Err(PoolError::InvalidAddress("owner address is null"));
        }
        if self.pool_address.is_zero() {
            return Err(PoolError::InvalidAddress("pool address is null"));
        }
        if self.owner == self.pool_address {
            return Err(PoolError::InvalidAddress(
                "owner and pool address coincide",
            ));
        }
        if self.initial_amp == 0 || self.initial_amp > MAX_AMP {
            return Err(PoolError::InvalidConfiguration(
                "amplification must lie in [1, 10^6]",
            ));
        }
        if self.fee.get() > MAX_FEE {
            return Err(PoolError::InvalidFee(
                "trade fee exceeds half the denominator",
            ));
        }
        Ok(())
    }

    /// Returns the owner address.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Returns the pool's own address, the holder of the reserves.
    #[must_use]
    pub const fn pool_address(&self) -> Address {
        self.pool_address
    }

    /// Returns the per-asset decimals.
    #[must_use]
    pub const fn decimals(&self) -> &[Decimals; N_COINS] {
        &self.decimals
    }

    /// Returns the initial amplification coefficient.
    #[must_use]
    pub const fn initial_amp(&self) -> u64 {
        self.initial_amp
    }

    /// Returns the trade fee.
    #[must_use]
    pub const fn fee(&self) -> PoolFee {
        self.fee
    }

    /// Returns the admin fee, the fraction of the trade fee diverted to
    /// the administrator.
    #[must_use]
    pub const fn admin_fee(&self) -> PoolFee {
        self.admin_fee
    }
}
