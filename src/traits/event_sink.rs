//! Event notification capability.

use crate::domain::PoolEvent;

/// Receives fire-and-forget notifications after successful operations.
///
/// The engine emits exactly one event per completed state-mutating
/// operation (admin fee sweeps excluded), after all state changes and
/// external transfers have succeeded. Sinks must not call back into the
/// pool; the reentrancy lock is still held at emission time.
pub trait EventSink {
    /// Delivers one event. Must not fail; sinks that can lose events
    /// should handle that internally.
    fn emit(&mut self, event: PoolEvent);
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: PoolEvent) {}
}

/// A sink that forwards events to the `tracing` subscriber at INFO
/// level, turning the pool's notification stream into structured logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: PoolEvent) {
        tracing::info!(?event, "pool event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Amount};

    fn sample_event() -> PoolEvent {
        PoolEvent::TokenSwap {
            buyer: Address::from_bytes([1u8; 32]),
            sold_id: 0,
            tokens_sold: Amount::from_u128(10),
            bought_id: 2,
            tokens_bought: Amount::from_u128(9),
        }
    }

    #[test]
    fn null_sink_accepts_events() {
        let mut sink = NullSink;
        sink.emit(sample_event());
        sink.emit(sample_event());
    }

    #[test]
    fn tracing_sink_accepts_events() {
        // No subscriber installed; emission must still be a no-op rather
        // than a panic.
        let mut sink = TracingSink;
        sink.emit(sample_event());
    }
}
