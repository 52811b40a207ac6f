//! Timestamp generation for Binance API request freshness.
//!
//! Signed requests carry a `timestamp` parameter in milliseconds since the
//! UNIX epoch. The server rejects requests whose timestamp falls outside the
//! configured `recvWindow`, so the value must track wall-clock time.

use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing the timestamp attached to signed requests.
///
/// The default implementation uses the system clock. A fixed implementation
/// makes signatures reproducible in tests.
pub trait TimestampProvider: Send + Sync {
    /// Current time in milliseconds since UNIX epoch.
    fn now_millis(&self) -> u64;
}

/// Timestamp provider backed by the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock provider.
    pub fn new() -> Self {
        Self
    }
}

impl TimestampProvider for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}
