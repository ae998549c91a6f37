//! Unified error types for the Tripool engine.
//!
//! All fallible operations across the crate return [`PoolError`] as their
//! error type. Propagation is fail-fast: an error terminates the failing
//! operation with no partial state change.
//!
//! # Error Code Ranges
//!
//! | Range | Category | Description |
//! |-------|----------|-------------|
//! | 1000–1999 | Validation | Invalid inputs or construction parameters |
//! | 2000–2999 | State | Pool state violations and external-call failures |
//! | 3000–3999 | Arithmetic | Overflow, underflow, division by zero |
//! | 4000–4999 | Algorithm | Solver non-convergence and ramp guardrails |

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, PoolError>;

// ---------------------------------------------------------------------------
// PoolError
// ---------------------------------------------------------------------------

/// Unified error enum for the Tripool engine.
///
/// Every fallible operation in the crate returns `Result<T, PoolError>`.
/// Variants are grouped by numeric error-code ranges so that callers can
/// pattern-match on categories or inspect individual codes for logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    // ----- 1000–1999: Validation errors ------------------------------------
    /// A null or duplicate address was supplied at construction (code 1000).
    #[error("invalid address: {0}")]
    InvalidAddress(&'static str),

    /// An asset index is outside `[0, 3)` (code 1001).
    #[error("invalid token index: {0}")]
    InvalidToken(usize),

    /// A swap names the same asset on both sides (code 1002).
    #[error("cannot swap a token for itself")]
    CantSwapSameToken,

    /// An amount that must be nonzero was zero (code 1003).
    #[error("amount must be nonzero")]
    AmountZero,

    /// A share burn amount that must be nonzero was zero (code 1004).
    #[error("burn amount must be nonzero")]
    BurnAmountZero,

    /// A fee fraction is out of the valid range (code 1005).
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A decimals value is out of range (code 1006).
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// A pool configuration is invalid (code 1007).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    // ----- 2000–2999: State errors -----------------------------------------
    /// Output fell below the caller's floor, or required input exceeded
    /// the caller's ceiling (code 2000).
    #[error("slippage limit exceeded")]
    SlippageTooHigh,

    /// A deposit left the invariant unchanged or smaller (code 2001).
    #[error("invariant D must increase on deposit")]
    InvariantDMustIncrease,

    /// Share balance or reserve underflow (code 2002).
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A state-mutating entry point was re-entered while locked (code 2003).
    #[error("reentrant call")]
    Reentrancy,

    /// An external token or share capability reported failure (code 2004).
    #[error("transfer failed: {0}")]
    TransferFailed(&'static str),

    /// The caller is not the pool owner (code 2005).
    #[error("caller is not the pool owner")]
    Unauthorized,

    // ----- 3000–3999: Arithmetic errors ------------------------------------
    /// An arithmetic operation overflowed (code 3000).
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// An arithmetic operation underflowed (code 3001).
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero was attempted (code 3002).
    #[error("division by zero")]
    DivisionByZero,

    // ----- 4000–4999: Algorithm errors -------------------------------------
    /// Newton iteration exhausted its cap without converging (code 4000).
    #[error("solver did not converge: {0}")]
    SolverDidNotConverge(&'static str),

    /// A ramp was requested while the previous one is still in its
    /// cooldown, or the deadline is too close (code 4001).
    #[error("ramping too soon")]
    RampingTooSoon,

    /// A ramp target is outside `[1, MAX_AMP]` (code 4002).
    #[error("ramp parameter out of range: {0}")]
    RampParameterOutOfRange(&'static str),

    /// A ramp target differs from the current A by more than the
    /// allowed factor (code 4003).
    #[error("amplification change too big")]
    AChangeTooBig,
}

impl PoolError {
    /// Returns the numeric error code for this variant.
    ///
    /// Codes are organized into ranges:
    /// - 1000–1999 for validation errors
    /// - 2000–2999 for state errors
    /// - 3000–3999 for arithmetic errors
    /// - 4000–4999 for algorithm errors
    #[must_use]
    pub const fn error_code(&self) -> u16 {
        match self {
            // Validation (1000–1999)
            Self::InvalidAddress(_) => 1000,
            Self::InvalidToken(_) => 1001,
            Self::CantSwapSameToken => 1002,
            Self::AmountZero => 1003,
            Self::BurnAmountZero => 1004,
            Self::InvalidFee(_) => 1005,
            Self::InvalidPrecision(_) => 1006,
            Self::InvalidConfiguration(_) => 1007,

            // State (2000–2999)
            Self::SlippageTooHigh => 2000,
            Self::InvariantDMustIncrease => 2001,
            Self::InsufficientBalance => 2002,
            Self::Reentrancy => 2003,
            Self::TransferFailed(_) => 2004,
            Self::Unauthorized => 2005,

            // Arithmetic (3000–3999)
            Self::Overflow(_) => 3000,
            Self::Underflow(_) => 3001,
            Self::DivisionByZero => 3002,

            // Algorithm (4000–4999)
            Self::SolverDidNotConverge(_) => 4000,
            Self::RampingTooSoon => 4001,
            Self::RampParameterOutOfRange(_) => 4002,
            Self::AChangeTooBig => 4003,
        }
    }

    /// Returns `true` if this is a validation error (1000–1999).
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        self.error_code() >= 1000 && self.error_code() < 2000
    }

    /// Returns `true` if this is a state error (2000–2999).
    #[must_use]
    pub const fn is_state(&self) -> bool {
        self.error_code() >= 2000 && self.error_code() < 3000
    }

    /// Returns `true` if this is an arithmetic error (3000–3999).
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        self.error_code() >= 3000 && self.error_code() < 4000
    }

    /// Returns `true` if this is an algorithm error (4000–4999).
    #[must_use]
    pub const fn is_algorithmic(&self) -> bool {
        self.error_code() >= 4000 && self.error_code() < 5000
    }
}
