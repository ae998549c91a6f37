//! The three-asset StableSwap pool: reserves, shares, fees, and admin
//! operations.
//!
//! [`StablePool`] owns the reserve vector and the amplification
//! schedule, and drives the solvers in [`math`](crate::math) through the
//! rate normalizer so that every calculation happens in the common
//! 18-decimal x-space. External effects go through the capability seams
//! in [`traits`](crate::traits).
//!
//! # Operations
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`swap`](StablePool::swap) | Exchange `dx` of asset i for asset j |
//! | [`add_liquidity`](StablePool::add_liquidity) | Deposit up to three assets, mint shares |
//! | [`remove_liquidity`](StablePool::remove_liquidity) | Burn shares for a pro-rata basket |
//! | [`remove_liquidity_one_token`](StablePool::remove_liquidity_one_token) | Burn shares for a single asset |
//! | [`remove_liquidity_imbalance`](StablePool::remove_liquidity_imbalance) | Withdraw chosen amounts, burn to match |
//! | [`ramp_amp`](StablePool::ramp_amp) | Owner: start a linear A ramp |
//! | [`stop_ramp_amp`](StablePool::stop_ramp_amp) | Owner: freeze A mid-ramp |
//! | [`withdraw_admin_fees`](StablePool::withdraw_admin_fees) | Owner: sweep the admin fee reserve |
//!
//! # Fee Accounting
//!
//! Swap fees are taken from the output; imbalance fees are taken from
//! the deviation of a deposit or withdrawal against the pool's current
//! composition, scaled by `n / (4·(n−1))`. The liquidity providers'
//! share of every fee stays in the reserves (raising the virtual
//! price); the admin share is left *outside* the accounted `balances`,
//! so the admin reserve of asset i is exactly
//! `token.balance_of(pool) − balances[i]`.
//!
//! # External-Call Ordering
//!
//! Swaps and single-asset withdrawals commit accounting state before any
//! token moves; deposits pull funds before committing; withdrawals
//! commit and burn before pushing. If an external call reports failure
//! the operation restores the pool's accounting state, reverses any
//! share mint/burn, and returns the previously moved funds on a best
//! effort basis before propagating the error.

mod guard;
pub mod ramp;

#[cfg(test)]
mod proptest_properties;

pub use ramp::{AmpRamp, MAX_AMP, MAX_AMP_CHANGE, MIN_RAMP_TIME};

use core::fmt;

use primitive_types::U256;

use crate::config::StablePoolConfig;
use crate::domain::{Address, Amount, AssetIndex, PoolEvent, PoolFee};
use crate::error::PoolError;
use crate::math::{compute_d, compute_y, compute_y_from_d, precision, RateTable};
use crate::traits::{AssetToken, Clock, EventSink, ShareToken};
use crate::N_COINS;

use guard::ReentrancyGuard;

/// A StableSwap market maker over three nominally equal assets.
///
/// The pool is a single-threaded, serialized state machine: every
/// operation runs to completion under a scoped reentrancy lock before
/// the next begins. Reserves are tracked in `balances` in each asset's
/// native precision; the difference between an asset's on-ledger balance
/// and its accounted reserve is the admin fee awaiting sweep.
pub struct StablePool<A, S, C, E> {
    assets: [A; N_COINS],
    shares: S,
    clock: C,
    events: E,
    address: Address,
    owner: Address,
    balances: [Amount; N_COINS],
    rates: RateTable,
    fee: PoolFee,
    admin_fee: PoolFee,
    ramp: AmpRamp,
    guard: ReentrancyGuard,
}

impl<A, S, C, E> StablePool<A, S, C, E>
where
    A: AssetToken,
    S: ShareToken,
    C: Clock,
    E: EventSink,
{
    /// Creates a pool from a validated configuration and the host
    /// capabilities.
    ///
    /// The pool starts empty; the first deposit defines the reference
    /// composition.
    ///
    /// # Errors
    ///
    /// - Any validation error from [`StablePoolConfig::validate`].
    /// - [`PoolError::InvalidAddress`] if an asset address is null or
    ///   two assets share an address.
    pub fn new(
        config: StablePoolConfig,
        assets: [A; N_COINS],
        shares: S,
        clock: C,
        events: E,
    ) -> Result<Self, PoolError> {
        config.validate()?;
        for asset in &assets {
            if asset.address().is_zero() {
                return Err(PoolError::InvalidAddress("asset address is null"));
            }
        }
        for i in 0..N_COINS {
            for j in (i + 1)..N_COINS {
                if assets[i].address() == assets[j].address() {
                    return Err(PoolError::InvalidAddress("duplicate asset address"));
                }
            }
        }

        let now = clock.now();
        Ok(Self {
            address: config.pool_address(),
            owner: config.owner(),
            balances: [Amount::ZERO; N_COINS],
            rates: RateTable::from_decimals(config.decimals()),
            fee: config.fee(),
            admin_fee: config.admin_fee(),
            ramp: AmpRamp::flat(config.initial_amp(), now),
            guard: ReentrancyGuard::new(),
            assets,
            shares,
            clock,
            events,
        })
    }

    // -- accessors -----------------------------------------------------------

    /// Returns the accounted reserves, native precision per asset.
    #[must_use]
    pub const fn balances(&self) -> &[Amount; N_COINS] {
        &self.balances
    }

    /// Returns the trade fee.
    #[must_use]
    pub const fn fee(&self) -> PoolFee {
        self.fee
    }

    /// Returns the admin fee fraction.
    #[must_use]
    pub const fn admin_fee(&self) -> PoolFee {
        self.admin_fee
    }

    /// Returns the pool owner.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Returns the pool's own address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the amplification schedule.
    #[must_use]
    pub const fn ramp(&self) -> &AmpRamp {
        &self.ramp
    }

    /// Returns the amplification coefficient at the current time.
    #[must_use]
    pub fn current_amp(&self) -> u64 {
        self.ramp.current(self.clock.now())
    }

    /// Returns the asset capability at index `i`.
    #[must_use]
    pub fn asset(&self, i: AssetIndex) -> &A {
        &self.assets[i.get()]
    }

    /// Returns the share-token capability.
    #[must_use]
    pub const fn share_token(&self) -> &S {
        &self.shares
    }

    // -- swap ----------------------------------------------------------------

    /// Exchanges `dx` of asset `i` for asset `j`.
    ///
    /// The output is priced by the invariant at the current A, the trade
    /// fee is deducted from the output, and the admin share of that fee
    /// is left outside the accounted reserves. Fails without effect if
    /// the net output falls below `min_dy`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::CantSwapSameToken`] if `i == j`.
    /// - [`PoolError::AmountZero`] if `dx` is zero.
    /// - [`PoolError::SlippageTooHigh`] if the output is below `min_dy`.
    /// - [`PoolError::TransferFailed`] if a token capability fails.
    /// - [`PoolError::Reentrancy`] if called back into mid-operation.
    /// - Solver and arithmetic errors from the invariant machinery.
    pub fn swap(
        &mut self,
        caller: Address,
        i: AssetIndex,
        j: AssetIndex,
        dx: Amount,
        min_dy: Amount,
    ) -> Result<Amount, PoolError> {
        self.guard.enter()?;
        let result = self.swap_locked(caller, i.get(), j.get(), dx, min_dy);
        self.guard.release();
        result
    }

    fn swap_locked(
        &mut self,
        caller: Address,
        i: usize,
        j: usize,
        dx: Amount,
        min_dy: Amount,
    ) -> Result<Amount, PoolError> {
        if i == j {
            return Err(PoolError::CantSwapSameToken);
        }
        if dx.is_zero() {
            return Err(PoolError::AmountZero);
        }

        let amp = self.current_amp();
        let xp = self.rates.normalize(&self.balances)?;
        let x_new = xp[i]
            .checked_add(self.rates.to_normalized(i, &dx)?)
            .ok_or(PoolError::Overflow("swap input"))?;
        let y_new = compute_y(i, j, x_new, &xp, amp)?;

        let dy_gross_norm = xp[j]
            .checked_sub(y_new)
            .ok_or(PoolError::Underflow("swap output"))?;
        let dy_gross = self.rates.from_normalized(j, dy_gross_norm)?;
        let fee_amount = self
            .fee
            .apply_to(&dy_gross)
            .ok_or(PoolError::Overflow("swap fee"))?;
        let dy = dy_gross
            .checked_sub(&fee_amount)
            .ok_or(PoolError::Underflow("swap fee deduction"))?;
        let admin_cut = self
            .admin_fee
            .apply_to(&fee_amount)
            .ok_or(PoolError::Overflow("swap admin fee"))?;

        if dy < min_dy {
            return Err(PoolError::SlippageTooHigh);
        }

        let previous = self.balances;
        self.balances[i] = previous[i]
            .checked_add(&dx)
            .ok_or(PoolError::Overflow("reserve growth"))?;
        let outflow = dy
            .checked_add(&admin_cut)
            .ok_or(PoolError::Overflow("reserve outflow"))?;
        self.balances[j] = previous[j]
            .checked_sub(&outflow)
            .ok_or(PoolError::InsufficientBalance)?;

        let pool_address = self.address;
        if !self.assets[i].transfer_from(&caller, &pool_address, dx) {
            self.balances = previous;
            return Err(PoolError::TransferFailed("swap input pull"));
        }
        if !self.assets[j].transfer(&caller, dy) {
            let _ = self.assets[i].transfer(&caller, dx);
            self.balances = previous;
            return Err(PoolError::TransferFailed("swap output push"));
        }

        self.events.emit(PoolEvent::TokenSwap {
            buyer: caller,
            sold_id: i,
            tokens_sold: dx,
            bought_id: j,
            tokens_bought: dy,
        });
        Ok(dy)
    }

    // -- add liquidity ---------------------------------------------------------

    /// Deposits `amounts` (zero entries allowed once the pool is seeded)
    /// and mints shares proportional to the invariant growth.
    ///
    /// A deposit that deviates from the pool's current composition pays
    /// the imbalance fee on the deviation, so depositing one-sided and
    /// swapping back out cannot dodge the swap fee. The first deposit
    /// pays no fee but must supply all three assets.
    ///
    /// # Errors
    ///
    /// - [`PoolError::AmountZero`] on a first deposit with a zero entry.
    /// - [`PoolError::InvariantDMustIncrease`] if the deposit has no
    ///   effect.
    /// - [`PoolError::SlippageTooHigh`] if fewer than `min_mint` shares
    ///   result.
    /// - [`PoolError::TransferFailed`] if a pull or the mint fails.
    pub fn add_liquidity(
        &mut self,
        caller: Address,
        amounts: [Amount; N_COINS],
        min_mint: Amount,
    ) -> Result<Amount, PoolError> {
        self.guard.enter()?;
        let result = self.add_liquidity_locked(caller, amounts, min_mint);
        self.guard.release();
        result
    }

    fn add_liquidity_locked(
        &mut self,
        caller: Address,
        amounts: [Amount; N_COINS],
        min_mint: Amount,
    ) -> Result<Amount, PoolError> {
        let amp = self.current_amp();
        let supply = self.shares.total_supply();
        let old = self.balances;
        let d0 = self.invariant_for(&old, amp)?;

        if supply.is_zero() {
            // An empty pool cannot price a zero-reserve asset; the first
            // deposit fixes the reference composition with all three.
            for amount in &amounts {
                if amount.is_zero() {
                    return Err(PoolError::AmountZero);
                }
            }
        }

        let mut new_balances = old;
        for i in 0..N_COINS {
            new_balances[i] = old[i]
                .checked_add(&amounts[i])
                .ok_or(PoolError::Overflow("deposit balance"))?;
        }
        let d1 = self.invariant_for(&new_balances, amp)?;
        if d1 <= d0 {
            return Err(PoolError::InvariantDMustIncrease);
        }

        let mut fees = [Amount::ZERO; N_COINS];
        let mut committed = new_balances;
        let minted;
        if supply.is_zero() {
            minted = Amount::new(d1);
        } else {
            if d0.is_zero() {
                return Err(PoolError::DivisionByZero);
            }
            let imbalance_fee = self.fee.imbalance();
            for i in 0..N_COINS {
                let ideal = old[i]
                    .mul_div(&Amount::new(d1), &Amount::new(d0))
                    .ok_or(PoolError::Overflow("ideal balance"))?;
                let deviation = new_balances[i].abs_diff(&ideal);
                let fee_i = imbalance_fee
                    .apply_to(&deviation)
                    .ok_or(PoolError::Overflow("imbalance fee"))?;
                let admin_i = self
                    .admin_fee
                    .apply_to(&fee_i)
                    .ok_or(PoolError::Overflow("admin fee"))?;
                committed[i] = new_balances[i]
                    .checked_sub(&admin_i)
                    .ok_or(PoolError::Underflow("admin fee deduction"))?;
                new_balances[i] = new_balances[i]
                    .checked_sub(&fee_i)
                    .ok_or(PoolError::Underflow("fee deduction"))?;
                fees[i] = fee_i;
            }
            let d2 = self.invariant_for(&new_balances, amp)?;
            let gain = d2
                .checked_sub(d0)
                .ok_or(PoolError::Underflow("invariant gain"))?;
            minted = supply
                .mul_div(&Amount::new(gain), &Amount::new(d0))
                .ok_or(PoolError::Overflow("share mint amount"))?;
        }

        if minted < min_mint {
            return Err(PoolError::SlippageTooHigh);
        }

        let pool_address = self.address;
        for i in 0..N_COINS {
            if amounts[i].is_zero() {
                continue;
            }
            if !self.assets[i].transfer_from(&caller, &pool_address, amounts[i]) {
                for k in 0..i {
                    if !amounts[k].is_zero() {
                        let _ = self.assets[k].transfer(&caller, amounts[k]);
                    }
                }
                return Err(PoolError::TransferFailed("deposit pull"));
            }
        }

        self.balances = committed;
        if !self.shares.mint(&caller, minted) {
            self.balances = old;
            for k in 0..N_COINS {
                if !amounts[k].is_zero() {
                    let _ = self.assets[k].transfer(&caller, amounts[k]);
                }
            }
            return Err(PoolError::TransferFailed("share mint"));
        }

        self.events.emit(PoolEvent::AddLiquidity {
            provider: caller,
            amounts,
            fees,
            invariant: Amount::new(d1),
            share_supply: self.shares.total_supply(),
        });
        Ok(minted)
    }

    // -- balanced remove -------------------------------------------------------

    /// Burns `burn` shares for a pro-rata slice of every reserve.
    ///
    /// No fee applies; the payout is exactly proportional. Fails without
    /// effect if any component falls below its entry in `min_amounts`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::BurnAmountZero`] if `burn` is zero.
    /// - [`PoolError::InsufficientBalance`] if the caller holds fewer
    ///   than `burn` shares.
    /// - [`PoolError::SlippageTooHigh`] if a payout misses its floor.
    /// - [`PoolError::TransferFailed`] if the burn or a push fails.
    pub fn remove_liquidity(
        &mut self,
        caller: Address,
        burn: Amount,
        min_amounts: [Amount; N_COINS],
    ) -> Result<[Amount; N_COINS], PoolError> {
        self.guard.enter()?;
        let result = self.remove_liquidity_locked(caller, burn, min_amounts);
        self.guard.release();
        result
    }

    fn remove_liquidity_locked(
        &mut self,
        caller: Address,
        burn: Amount,
        min_amounts: [Amount; N_COINS],
    ) -> Result<[Amount; N_COINS], PoolError> {
        if burn.is_zero() {
            return Err(PoolError::BurnAmountZero);
        }
        if self.shares.balance_of(&caller) < burn {
            return Err(PoolError::InsufficientBalance);
        }
        let supply = self.shares.total_supply();

        let mut amounts = [Amount::ZERO; N_COINS];
        for i in 0..N_COINS {
            amounts[i] = self.balances[i]
                .mul_div(&burn, &supply)
                .ok_or(PoolError::Overflow("pro-rata payout"))?;
            if amounts[i] < min_amounts[i] {
                return Err(PoolError::SlippageTooHigh);
            }
        }

        let old = self.balances;
        for i in 0..N_COINS {
            self.balances[i] = old[i]
                .checked_sub(&amounts[i])
                .ok_or(PoolError::InsufficientBalance)?;
        }

        if !self.shares.burn(&caller, burn) {
            self.balances = old;
            return Err(PoolError::TransferFailed("share burn"));
        }

        let pool_address = self.address;
        for i in 0..N_COINS {
            if amounts[i].is_zero() {
                continue;
            }
            if !self.assets[i].transfer(&caller, amounts[i]) {
                for k in 0..i {
                    if !amounts[k].is_zero() {
                        let _ = self.assets[k].transfer_from(&caller, &pool_address, amounts[k]);
                    }
                }
                let _ = self.shares.mint(&caller, burn);
                self.balances = old;
                return Err(PoolError::TransferFailed("withdrawal push"));
            }
        }

        self.events.emit(PoolEvent::RemoveLiquidity {
            provider: caller,
            amounts,
            share_supply: self.shares.total_supply(),
        });
        Ok(amounts)
    }

    // -- single-asset remove ---------------------------------------------------

    /// Burns `burn` shares and pays the whole withdrawal in asset `i`.
    ///
    /// The payout is the reserve drop that returns the invariant to its
    /// post-burn target, less the imbalance fee on the deviation from a
    /// pro-rata exit.
    ///
    /// # Errors
    ///
    /// - [`PoolError::BurnAmountZero`] if `burn` is zero.
    /// - [`PoolError::InsufficientBalance`] if the caller holds fewer
    ///   than `burn` shares.
    /// - [`PoolError::SlippageTooHigh`] if the payout is below
    ///   `min_amount`.
    /// - [`PoolError::TransferFailed`] if the burn or the push fails.
    pub fn remove_liquidity_one_token(
        &mut self,
        caller: Address,
        burn: Amount,
        i: AssetIndex,
        min_amount: Amount,
    ) -> Result<Amount, PoolError> {
        self.guard.enter()?;
        let result = self.remove_one_locked(caller, burn, i.get(), min_amount);
        self.guard.release();
        result
    }

    fn remove_one_locked(
        &mut self,
        caller: Address,
        burn: Amount,
        i: usize,
        min_amount: Amount,
    ) -> Result<Amount, PoolError> {
        if burn.is_zero() {
            return Err(PoolError::BurnAmountZero);
        }
        if self.shares.balance_of(&caller) < burn {
            return Err(PoolError::InsufficientBalance);
        }

        let (dy, _fee_amount, admin_cut) = self.one_token_withdrawal(burn, i)?;
        if dy < min_amount {
            return Err(PoolError::SlippageTooHigh);
        }

        let old = self.balances;
        let outflow = dy
            .checked_add(&admin_cut)
            .ok_or(PoolError::Overflow("reserve outflow"))?;
        self.balances[i] = old[i]
            .checked_sub(&outflow)
            .ok_or(PoolError::InsufficientBalance)?;

        if !self.shares.burn(&caller, burn) {
            self.balances = old;
            return Err(PoolError::TransferFailed("share burn"));
        }
        if !self.assets[i].transfer(&caller, dy) {
            let _ = self.shares.mint(&caller, burn);
            self.balances = old;
            return Err(PoolError::TransferFailed("withdrawal push"));
        }

        self.events.emit(PoolEvent::RemoveLiquidityOne {
            provider: caller,
            shares_burned: burn,
            amount_out: dy,
        });
        Ok(dy)
    }

    /// Shared math for single-asset withdrawal: `(payout, fee, admin
    /// cut)` for burning `burn` shares into asset `i`.
    fn one_token_withdrawal(
        &self,
        burn: Amount,
        i: usize,
    ) -> Result<(Amount, Amount, Amount), PoolError> {
        let supply = self.shares.total_supply();
        if supply.is_zero() || burn > supply {
            return Err(PoolError::InsufficientBalance);
        }

        let amp = self.current_amp();
        let xp = self.rates.normalize(&self.balances)?;
        let d0 = compute_d(&xp, amp)?;
        let d_cut = Amount::new(d0)
            .mul_div(&burn, &supply)
            .ok_or(PoolError::Overflow("invariant reduction"))?;
        let d1 = d0
            .checked_sub(d_cut.get())
            .ok_or(PoolError::Underflow("post-burn invariant"))?;

        let y_new = compute_y_from_d(i, &xp, d1, amp)?;
        let gross_norm = xp[i]
            .checked_sub(y_new)
            .ok_or(PoolError::Underflow("one-token payout"))?;
        let dy_gross = self.rates.from_normalized(i, gross_norm)?;

        let ideal = self.balances[i]
            .mul_div(&burn, &supply)
            .ok_or(PoolError::Overflow("pro-rata payout"))?;
        let deviation = dy_gross.abs_diff(&ideal);
        let fee_amount = self
            .fee
            .imbalance()
            .apply_to(&deviation)
            .ok_or(PoolError::Overflow("imbalance fee"))?;
        let dy = dy_gross
            .checked_sub(&fee_amount)
            .ok_or(PoolError::Underflow("fee deduction"))?;
        let admin_cut = self
            .admin_fee
            .apply_to(&fee_amount)
            .ok_or(PoolError::Overflow("admin fee"))?;
        Ok((dy, fee_amount, admin_cut))
    }

    // -- imbalanced remove -----------------------------------------------------

    /// Withdraws exactly `amounts` and burns however many shares the
    /// invariant reduction demands, plus one unit against rounding.
    ///
    /// Imbalance fees apply to the deviation from a pro-rata exit, as in
    /// [`add_liquidity`](StablePool::add_liquidity).
    ///
    /// # Errors
    ///
    /// - [`PoolError::BurnAmountZero`] on a zero-effect withdrawal.
    /// - [`PoolError::SlippageTooHigh`] if more than `max_burn` shares
    ///   would burn.
    /// - [`PoolError::InsufficientBalance`] if a reserve or the caller's
    ///   share balance cannot cover the request.
    /// - [`PoolError::TransferFailed`] if the burn or a push fails.
    pub fn remove_liquidity_imbalance(
        &mut self,
        caller: Address,
        amounts: [Amount; N_COINS],
        max_burn: Amount,
    ) -> Result<Amount, PoolError> {
        self.guard.enter()?;
        let result = self.remove_imbalance_locked(caller, amounts, max_burn);
        self.guard.release();
        result
    }

    fn remove_imbalance_locked(
        &mut self,
        caller: Address,
        amounts: [Amount; N_COINS],
        max_burn: Amount,
    ) -> Result<Amount, PoolError> {
        let supply = self.shares.total_supply();
        if supply.is_zero() {
            return Err(PoolError::InsufficientBalance);
        }

        let amp = self.current_amp();
        let old = self.balances;
        let mut new_balances = old;
        for i in 0..N_COINS {
            new_balances[i] = old[i]
                .checked_sub(&amounts[i])
                .ok_or(PoolError::InsufficientBalance)?;
        }
        let d0 = self.invariant_for(&old, amp)?;
        if d0.is_zero() {
            return Err(PoolError::DivisionByZero);
        }
        let d1 = self.invariant_for(&new_balances, amp)?;

        let imbalance_fee = self.fee.imbalance();
        let mut fees = [Amount::ZERO; N_COINS];
        let mut committed = new_balances;
        for i in 0..N_COINS {
            let ideal = old[i]
                .mul_div(&Amount::new(d1), &Amount::new(d0))
                .ok_or(PoolError::Overflow("ideal balance"))?;
            let deviation = new_balances[i].abs_diff(&ideal);
            let fee_i = imbalance_fee
                .apply_to(&deviation)
                .ok_or(PoolError::Overflow("imbalance fee"))?;
            let admin_i = self
                .admin_fee
                .apply_to(&fee_i)
                .ok_or(PoolError::Overflow("admin fee"))?;
            committed[i] = new_balances[i]
                .checked_sub(&admin_i)
                .ok_or(PoolError::Underflow("admin fee deduction"))?;
            new_balances[i] = new_balances[i]
                .checked_sub(&fee_i)
                .ok_or(PoolError::Underflow("fee deduction"))?;
            fees[i] = fee_i;
        }
        let d2 = self.invariant_for(&new_balances, amp)?;

        let shrink = d0
            .checked_sub(d2)
            .ok_or(PoolError::Underflow("invariant shrink"))?;
        let burn_exact = supply
            .mul_div(&Amount::new(shrink), &Amount::new(d0))
            .ok_or(PoolError::Overflow("share burn amount"))?;
        if burn_exact.is_zero() {
            return Err(PoolError::BurnAmountZero);
        }
        // One extra unit absorbs the downward rounding of the quotient.
        let burn = burn_exact
            .checked_add(&Amount::from_u128(1))
            .ok_or(PoolError::Overflow("share burn amount"))?;
        if burn > max_burn {
            return Err(PoolError::SlippageTooHigh);
        }
        if self.shares.balance_of(&caller) < burn {
            return Err(PoolError::InsufficientBalance);
        }

        self.balances = committed;
        if !self.shares.burn(&caller, burn) {
            self.balances = old;
            return Err(PoolError::TransferFailed("share burn"));
        }

        let pool_address = self.address;
        for i in 0..N_COINS {
            if amounts[i].is_zero() {
                continue;
            }
            if !self.assets[i].transfer(&caller, amounts[i]) {
                for k in 0..i {
                    if !amounts[k].is_zero() {
                        let _ = self.assets[k].transfer_from(&caller, &pool_address, amounts[k]);
                    }
                }
                let _ = self.shares.mint(&caller, burn);
                self.balances = old;
                return Err(PoolError::TransferFailed("withdrawal push"));
            }
        }

        self.events.emit(PoolEvent::RemoveLiquidityImbalance {
            provider: caller,
            amounts,
            fees,
            invariant: Amount::new(d1),
            share_supply: self.shares.total_supply(),
        });
        Ok(burn)
    }

    // -- admin operations ------------------------------------------------------

    /// Starts a linear ramp of the amplification coefficient toward
    /// `target`, completing at `deadline`. Owner only.
    ///
    /// # Errors
    ///
    /// - [`PoolError::Unauthorized`] if `caller` is not the owner.
    /// - Ramp guardrail errors from [`AmpRamp::start`].
    pub fn ramp_amp(
        &mut self,
        caller: Address,
        target: u64,
        deadline: u64,
    ) -> Result<(), PoolError> {
        self.guard.enter()?;
        let result = self.ramp_amp_locked(caller, target, deadline);
        self.guard.release();
        result
    }

    fn ramp_amp_locked(
        &mut self,
        caller: Address,
        target: u64,
        deadline: u64,
    ) -> Result<(), PoolError> {
        self.require_owner(caller)?;
        let now = self.clock.now();
        let (old_amp, new_amp) = self.ramp.start(target, deadline, now)?;
        self.events.emit(PoolEvent::RampAmp {
            old_amp,
            new_amp,
            initial_time: now,
            future_time: deadline,
        });
        Ok(())
    }

    /// Freezes the amplification coefficient at its current value,
    /// ending any in-progress ramp. Owner only.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Unauthorized`] if `caller` is not the owner.
    pub fn stop_ramp_amp(&mut self, caller: Address) -> Result<(), PoolError> {
        self.guard.enter()?;
        let result = self.stop_ramp_locked(caller);
        self.guard.release();
        result
    }

    fn stop_ramp_locked(&mut self, caller: Address) -> Result<(), PoolError> {
        self.require_owner(caller)?;
        let now = self.clock.now();
        let current_amp = self.ramp.stop(now);
        self.events.emit(PoolEvent::StopRampAmp {
            current_amp,
            time: now,
        });
        Ok(())
    }

    /// Sweeps the admin fee reserve of every asset to `recipient`.
    /// Owner only.
    ///
    /// The admin reserve of asset i is the surplus of its on-ledger
    /// balance over the accounted reserve; the accounted `balances` are
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`PoolError::Unauthorized`] if `caller` is not the owner.
    /// - [`PoolError::TransferFailed`] if a push fails.
    pub fn withdraw_admin_fees(
        &mut self,
        caller: Address,
        recipient: Address,
    ) -> Result<[Amount; N_COINS], PoolError> {
        self.guard.enter()?;
        let result = self.withdraw_admin_fees_locked(caller, recipient);
        self.guard.release();
        result
    }

    fn withdraw_admin_fees_locked(
        &mut self,
        caller: Address,
        recipient: Address,
    ) -> Result<[Amount; N_COINS], PoolError> {
        self.require_owner(caller)?;
        let pool_address = self.address;
        let mut swept = [Amount::ZERO; N_COINS];
        for i in 0..N_COINS {
            let held = self.assets[i].balance_of(&pool_address);
            let surplus = held.checked_sub(&self.balances[i]).unwrap_or(Amount::ZERO);
            if surplus.is_zero() {
                continue;
            }
            if !self.assets[i].transfer(&recipient, surplus) {
                return Err(PoolError::TransferFailed("admin fee sweep"));
            }
            swept[i] = surplus;
        }
        Ok(swept)
    }

    // -- views -----------------------------------------------------------------

    /// Quotes the output of swapping `dx` of asset `i` for asset `j`
    /// without touching state.
    ///
    /// One x-space unit is shaved off the gross output so the quote
    /// never exceeds what the swap itself would pay.
    ///
    /// # Errors
    ///
    /// Mirrors the validation and solver errors of
    /// [`swap`](StablePool::swap).
    pub fn get_dy(&self, i: AssetIndex, j: AssetIndex, dx: Amount) -> Result<Amount, PoolError> {
        let (i, j) = (i.get(), j.get());
        if i == j {
            return Err(PoolError::CantSwapSameToken);
        }
        if dx.is_zero() {
            return Err(PoolError::AmountZero);
        }
        let amp = self.current_amp();
        let xp = self.rates.normalize(&self.balances)?;
        let x_new = xp[i]
            .checked_add(self.rates.to_normalized(i, &dx)?)
            .ok_or(PoolError::Overflow("swap input"))?;
        let y_new = compute_y(i, j, x_new, &xp, amp)?;
        let dy_gross_norm = xp[j].saturating_sub(y_new).saturating_sub(U256::one());
        let dy_gross = self.rates.from_normalized(j, dy_gross_norm)?;
        let fee_amount = self
            .fee
            .apply_to(&dy_gross)
            .ok_or(PoolError::Overflow("swap fee"))?;
        dy_gross
            .checked_sub(&fee_amount)
            .ok_or(PoolError::Underflow("swap fee deduction"))
    }

    /// Returns the value of one share in 18-decimal precision:
    /// `D · 10^18 / total_supply`, or `10^18` for an empty pool.
    ///
    /// Non-decreasing across every operation except the very first
    /// deposit, which defines it.
    ///
    /// # Errors
    ///
    /// Solver and arithmetic errors from the invariant machinery.
    pub fn virtual_price(&self) -> Result<Amount, PoolError> {
        let supply = self.shares.total_supply();
        if supply.is_zero() {
            return Ok(Amount::new(precision()));
        }
        let amp = self.current_amp();
        let d = self.invariant_for(&self.balances, amp)?;
        Amount::new(d)
            .mul_div(&Amount::new(precision()), &supply)
            .ok_or(PoolError::Overflow("virtual price"))
    }

    /// Estimates the share delta for depositing (`is_deposit`) or
    /// withdrawing `amounts`, ignoring fees.
    ///
    /// Useful for slippage floors, not for exact accounting: the real
    /// deposit applies imbalance fees on top. For an empty pool the
    /// estimate equals the exact first mint.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InsufficientBalance`] if a withdrawal exceeds a
    ///   reserve.
    /// - Solver and arithmetic errors from the invariant machinery.
    pub fn calc_token_amount(
        &self,
        amounts: [Amount; N_COINS],
        is_deposit: bool,
    ) -> Result<Amount, PoolError> {
        let amp = self.current_amp();
        let old = self.balances;
        let d0 = self.invariant_for(&old, amp)?;
        let mut adjusted = old;
        for i in 0..N_COINS {
            adjusted[i] = if is_deposit {
                old[i]
                    .checked_add(&amounts[i])
                    .ok_or(PoolError::Overflow("deposit balance"))?
            } else {
                old[i]
                    .checked_sub(&amounts[i])
                    .ok_or(PoolError::InsufficientBalance)?
            };
        }
        let d1 = self.invariant_for(&adjusted, amp)?;
        let difference = if d1 > d0 { d1 - d0 } else { d0 - d1 };

        let supply = self.shares.total_supply();
        if supply.is_zero() {
            return Ok(Amount::new(difference));
        }
        if d0.is_zero() {
            return Err(PoolError::DivisionByZero);
        }
        supply
            .mul_div(&Amount::new(difference), &Amount::new(d0))
            .ok_or(PoolError::Overflow("share delta"))
    }

    /// Quotes a single-asset withdrawal of `burn` shares into asset `i`
    /// without touching state.
    ///
    /// # Errors
    ///
    /// - [`PoolError::BurnAmountZero`] if `burn` is zero.
    /// - [`PoolError::InsufficientBalance`] if `burn` exceeds the
    ///   supply.
    /// - Solver and arithmetic errors from the invariant machinery.
    pub fn calc_withdraw_one_token(
        &self,
        burn: Amount,
        i: AssetIndex,
    ) -> Result<Amount, PoolError> {
        if burn.is_zero() {
            return Err(PoolError::BurnAmountZero);
        }
        let (dy, _, _) = self.one_token_withdrawal(burn, i.get())?;
        Ok(dy)
    }

    // -- internals -------------------------------------------------------------

    fn require_owner(&self, caller: Address) -> Result<(), PoolError> {
        if caller == self.owner {
            Ok(())
        } else {
            Err(PoolError::Unauthorized)
        }
    }

    fn invariant_for(&self, balances: &[Amount; N_COINS], amp: u64) -> Result<U256, PoolError> {
        compute_d(&self.rates.normalize(balances)?, amp)
    }
}

impl<A, S, C, E> fmt::Debug for StablePool<A, S, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StablePool")
            .field("address", &self.address)
            .field("balances", &self.balances)
            .field("fee", &self.fee)
            .field("admin_fee", &self.admin_fee)
            .field("ramp", &self.ramp)
            .finish_non_exhaustive()
    }
}
