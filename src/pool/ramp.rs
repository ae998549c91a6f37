//! Linear-in-time amplification ramping with safety bounds.

use crate::error::PoolError;

/// Upper bound on the amplification coefficient.
pub const MAX_AMP: u64 = 1_000_000;

/// Maximum factor by which one ramp may raise or lower A.
pub const MAX_AMP_CHANGE: u64 = 10;

/// Minimum ramp duration and re-ramp cooldown, seconds.
pub const MIN_RAMP_TIME: u64 = 86_400;

/// The amplification schedule: two `(A, time)` anchors interpolated
/// linearly in wall time.
///
/// Outside a ramp both anchors coincide and
/// [`current`](AmpRamp::current) is constant. During a ramp the reported
/// A moves from `initial_amp` at `initial_time` to `future_amp` at
/// `future_time`, truncating intermediate values downward; at and after
/// the deadline it equals `future_amp` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmpRamp {
    initial_amp: u64,
    future_amp: u64,
    initial_time: u64,
    future_time: u64,
}

impl AmpRamp {
    /// Creates a flat (non-ramping) schedule at `amp`.
    ///
    /// The amplification must already be validated against
    /// `[1, MAX_AMP]` by [`StablePoolConfig`](crate::config::StablePoolConfig).
    pub(crate) const fn flat(amp: u64, now: u64) -> Self {
        Self {
            initial_amp: amp,
            future_amp: amp,
            initial_time: now,
            future_time: now,
        }
    }

    /// Returns the amplification coefficient at time `now`.
    pub fn current(&self, now: u64) -> u64 {
        if now >= self.future_time {
            return self.future_amp;
        }
        // future_time > now >= initial_time, so the span is nonzero.
        let span = u128::from(self.future_time - self.initial_time);
        let elapsed = u128::from(now.saturating_sub(self.initial_time));
        if self.future_amp >= self.initial_amp {
            let gain = u128::from(self.future_amp - self.initial_amp) * elapsed / span;
            self.initial_amp + gain as u64
        } else {
            let loss = u128::from(self.initial_amp - self.future_amp) * elapsed / span;
            self.initial_amp - loss as u64
        }
    }

    /// Starts a ramp toward `target`, completing at `deadline`.
    ///
    /// Returns `(current_amp, target)` for event emission.
    ///
    /// # Errors
    ///
    /// - [`PoolError::RampParameterOutOfRange`] if `target` is zero or
    ///   above [`MAX_AMP`].
    /// - [`PoolError::RampingTooSoon`] if the deadline is closer than
    ///   [`MIN_RAMP_TIME`], or a previous ramp is both unfinished and
    ///   within its initial [`MIN_RAMP_TIME`] cooldown.
    /// - [`PoolError::AChangeTooBig`] if `target` differs from the
    ///   current A by more than a factor of [`MAX_AMP_CHANGE`].
    pub fn start(&mut self, target: u64, deadline: u64, now: u64) -> Result<(u64, u64), PoolError> {
        if target == 0 || target > MAX_AMP {
            return Err(PoolError::RampParameterOutOfRange(
                "target must lie in [1, 10^6]",
            ));
        }
        if deadline < now.saturating_add(MIN_RAMP_TIME) {
            return Err(PoolError::RampingTooSoon);
        }
        if now < self.future_time && now < self.initial_time.saturating_add(MIN_RAMP_TIME) {
            return Err(PoolError::RampingTooSoon);
        }

        let current = self.current(now);
        let allowed = if target >= current {
            target <= current.saturating_mul(MAX_AMP_CHANGE)
        } else {
            target.saturating_mul(MAX_AMP_CHANGE) >= current
        };
        if !allowed {
            return Err(PoolError::AChangeTooBig);
        }

        self.initial_amp = current;
        self.future_amp = target;
        self.initial_time = now;
        self.future_time = deadline;
        Ok((current, target))
    }

    /// Freezes the schedule at the current A, ending any ramp.
    ///
    /// Returns the frozen value for event emission.
    pub fn stop(&mut self, now: u64) -> u64 {
        let current = self.current(now);
        self.initial_amp = current;
        self.future_amp = current;
        self.initial_time = now;
        self.future_time = now;
        current
    }

    /// Returns the ramp's starting amplification.
    #[must_use]
    pub const fn initial_amp(&self) -> u64 {
        self.initial_amp
    }

    /// Returns the ramp's target amplification.
    #[must_use]
    pub const fn future_amp(&self) -> u64 {
        self.future_amp
    }

    /// Returns the ramp start time, seconds.
    #[must_use]
    pub const fn initial_time(&self) -> u64 {
        self.initial_time
    }

    /// Returns the ramp deadline, seconds.
    #[must_use]
    pub const fn future_time(&self) -> u64 {
        self.future_time
    }
}
