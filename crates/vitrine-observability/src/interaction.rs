//! Interaction identifiers and wall-clock helpers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one handler invocation (a click, a change, a refresh).
///
/// Every log line emitted while that invocation runs carries the same id, so
/// interleaved async handlers can be told apart in the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InteractionId(u64);

impl InteractionId {
    /// Allocate the next id. Ids are unique for the lifetime of the page.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ix-{:06}", self.0)
    }
}

/// Milliseconds since the Unix epoch.
///
/// `std::time::SystemTime` is unavailable on `wasm32-unknown-unknown`, so the
/// browser build asks the JS `Date` instead.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
