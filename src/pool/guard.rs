//! Reentrancy lock for state-mutating entry points.

use crate::error::PoolError;

/// Lock state of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockState {
    /// No operation in progress.
    Idle,
    /// An operation holds the lock; reentrant calls fail.
    Entered,
}

/// A scoped exclusive lock acquired at the start of every state-mutating
/// pool operation and released on every exit path.
///
/// External capabilities (token transfers in particular) may call back
/// into the pool; a reentrant call observes the `Entered` state and
/// fails immediately with [`PoolError::Reentrancy`] instead of running
/// against half-committed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReentrancyGuard {
    state: LockState,
}

impl ReentrancyGuard {
    /// Creates a guard in the idle state.
    pub(crate) const fn new() -> Self {
        Self {
            state: LockState::Idle,
        }
    }

    /// Acquires the lock.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Reentrancy`] if the lock is already held.
    pub(crate) fn enter(&mut self) -> Result<(), PoolError> {
        match self.state {
            LockState::Idle => {
                self.state = LockState::Entered;
                Ok(())
            }
            LockState::Entered => Err(PoolError::Reentrancy),
        }
    }

    /// Releases the lock. Idempotent.
    pub(crate) fn release(&mut self) {
        self.state = LockState::Idle;
    }
}
