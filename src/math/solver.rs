//! Inverse solvers: one reserve from the invariant and the others.
//!
//! Both solvers reduce the invariant equation to a quadratic in the
//! unknown reserve `y`,
//!
//! ```text
//! y² + (b − D)·y = c        b = S' + D/Ann
//! ```
//!
//! where `S'` and `c` accumulate over the reserves that are held fixed,
//! and iterate
//!
//! ```text
//! y_next = (y² + c) / (2y + b − D)
//! ```
//!
//! from `y = D` until two consecutive iterates differ by at most one.

use primitive_types::{U256, U512};

use super::invariant::MAX_ITERATIONS;
use super::{compute_d, narrow};
use crate::error::PoolError;
use crate::N_COINS;

/// Computes the reserve at index `j` that preserves the invariant after
/// the reserve at index `i` moves to `x_new`, all in x-space.
///
/// The invariant `D` is derived from the pre-trade reserves `xp`; the
/// returned `y` is the post-trade value of `xp[j]` such that
/// `D(xp with xp[i] = x_new, xp[j] = y)` equals `D(xp)` up to solver
/// rounding.
///
/// # Errors
///
/// - [`PoolError::CantSwapSameToken`] if `i == j`.
/// - [`PoolError::InvalidToken`] if either index is out of range.
/// - Any error from [`compute_d`] on the pre-trade reserves.
/// - [`PoolError::SolverDidNotConverge`] after 255 iterations.
pub fn compute_y(
    i: usize,
    j: usize,
    x_new: U256,
    xp: &[U256; N_COINS],
    amp: u64,
) -> Result<U256, PoolError> {
    if i == j {
        return Err(PoolError::CantSwapSameToken);
    }
    if i >= N_COINS {
        return Err(PoolError::InvalidToken(i));
    }
    if j >= N_COINS {
        return Err(PoolError::InvalidToken(j));
    }

    let d = compute_d(xp, amp)?;
    let mut fixed = [U512::zero(); N_COINS - 1];
    let mut slot = 0;
    for (k, x) in xp.iter().enumerate() {
        if k == j {
            continue;
        }
        fixed[slot] = if k == i {
            U512::from(x_new)
        } else {
            U512::from(*x)
        };
        slot += 1;
    }
    solve_quadratic(&fixed, U512::from(d), amp)
}

/// Computes the reserve at index `i` consistent with a target invariant
/// `d_new`, holding every other reserve of `xp` fixed, all in x-space.
///
/// Used by single-asset withdrawals, where burning shares shrinks the
/// invariant and exactly one reserve must absorb the difference.
///
/// # Errors
///
/// - [`PoolError::InvalidToken`] if `i` is out of range.
/// - [`PoolError::SolverDidNotConverge`] after 255 iterations.
pub fn compute_y_from_d(
    i: usize,
    xp: &[U256; N_COINS],
    d_new: U256,
    amp: u64,
) -> Result<U256, PoolError> {
    if i >= N_COINS {
        return Err(PoolError::InvalidToken(i));
    }

    let mut fixed = [U512::zero(); N_COINS - 1];
    let mut slot = 0;
    for (k, x) in xp.iter().enumerate() {
        if k == i {
            continue;
        }
        fixed[slot] = U512::from(*x);
        slot += 1;
    }
    solve_quadratic(&fixed, U512::from(d_new), amp)
}

/// Newton iteration on `y² + (b − D)·y = c` given the fixed reserves.
fn solve_quadratic(
    fixed: &[U512; N_COINS - 1],
    d: U512,
    amp: u64,
) -> Result<U256, PoolError> {
    let n = U512::from(N_COINS);
    let ann = U512::from(amp) * n;

    // c = D^(n+1) / (n^n · Πfixed · Ann), b = Σfixed + D/Ann.
    let mut c = d;
    let mut s = U512::zero();
    for x in fixed {
        let denom = *x * n;
        if denom.is_zero() {
            return Err(PoolError::DivisionByZero);
        }
        s += *x;
        c = c
            .checked_mul(d)
            .ok_or(PoolError::Overflow("y: c accumulation"))?
            / denom;
    }
    c = c
        .checked_mul(d)
        .ok_or(PoolError::Overflow("y: c final product"))?
        / (ann * n);
    let b = s + d / ann;

    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let y_prev = y;

        let numerator = y
            .checked_mul(y)
            .ok_or(PoolError::Overflow("y: y² product"))?
            .checked_add(c)
            .ok_or(PoolError::Overflow("y: numerator sum"))?;
        let denominator = (y * U512::from(2u64) + b)
            .checked_sub(d)
            .ok_or(PoolError::Underflow("y: denominator"))?;
        if denominator.is_zero() {
            return Err(PoolError::DivisionByZero);
        }

        y = numerator / denominator;

        let diff = if y > y_prev { y - y_prev } else { y_prev - y };
        if diff <= U512::one() {
            return narrow(y, "y result");
        }
    }

    Err(PoolError::SolverDidNotConverge("reserve y iteration"))
}
