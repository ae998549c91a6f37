//! Invariant solver: D from normalized reserves and amplification.

use primitive_types::{U256, U512};

use super::narrow;
use crate::error::PoolError;
use crate::N_COINS;

/// Maximum Newton iterations before declaring non-convergence.
pub(crate) const MAX_ITERATIONS: u32 = 255;

/// Computes the StableSwap invariant `D` for normalized reserves `xp`
/// and amplification `amp` by Newton iteration.
///
/// `D` is the unique positive solution of
///
/// ```text
/// Ann · Σxp + D = Ann · D + D^(n+1) / (n^n · Πxp)      Ann = amp · n
/// ```
///
/// iterated as
///
/// ```text
/// D_P    = D^(n+1) / (n^n · Πxp)
/// D_next = (Ann·S + n·D_P) · D / ((Ann − 1)·D + (n + 1)·D_P)
/// ```
///
/// until two consecutive iterates differ by at most one. Convergence is
/// quadratic for realistic reserve vectors; the exact iteration formula
/// and floor division at every step are part of the accounting contract.
///
/// An all-zero reserve vector yields `D = 0`. A zero component with a
/// nonzero sum has no finite solution and surfaces as
/// [`PoolError::DivisionByZero`].
///
/// # Errors
///
/// - [`PoolError::SolverDidNotConverge`] after 255 iterations.
/// - [`PoolError::DivisionByZero`] for a zero reserve alongside nonzero
///   reserves.
/// - [`PoolError::Overflow`] if an intermediate exceeds 512 bits or the
///   result exceeds 256 bits.
pub fn compute_d(xp: &[U256; N_COINS], amp: u64) -> Result<U256, PoolError> {
    let n = U512::from(N_COINS);
    let mut s = U512::zero();
    for x in xp {
        s += U512::from(*x);
    }
    if s.is_zero() {
        return Ok(U256::zero());
    }

    let ann = U512::from(amp) * n;
    let mut d = s;

    for _ in 0..MAX_ITERATIONS {
        // D_P = D^(n+1) / (n^n · Πxp), accumulated one factor at a time.
        let mut d_p = d;
        for x in xp {
            let denom = U512::from(*x) * n;
            if denom.is_zero() {
                return Err(PoolError::DivisionByZero);
            }
            d_p = d_p
                .checked_mul(d)
                .ok_or(PoolError::Overflow("D: D_P accumulation"))?
                / denom;
        }

        let d_prev = d;

        let numerator = (ann * s)
            .checked_add(d_p.checked_mul(n).ok_or(PoolError::Overflow("D: n·D_P"))?)
            .ok_or(PoolError::Overflow("D: numerator sum"))?
            .checked_mul(d)
            .ok_or(PoolError::Overflow("D: numerator product"))?;

        let denominator = ((ann - U512::one()) * d)
            .checked_add(
                (n + U512::one())
                    .checked_mul(d_p)
                    .ok_or(PoolError::Overflow("D: (n+1)·D_P"))?,
            )
            .ok_or(PoolError::Overflow("D: denominator sum"))?;
        if denominator.is_zero() {
            return Err(PoolError::DivisionByZero);
        }

        d = numerator / denominator;

        let diff = if d > d_prev { d - d_prev } else { d_prev - d };
        if diff <= U512::one() {
            return narrow(d, "D result");
        }
    }

    Err(PoolError::SolverDidNotConverge("invariant D iteration"))
}
