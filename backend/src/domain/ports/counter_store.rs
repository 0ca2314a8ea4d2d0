//! Port for fixed-window request counters used by the rate limiter.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

/// Errors raised by counter store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CounterStoreError {
    /// The backing store could not be reached or updated.
    #[error("counter store failed: {message}")]
    Backend {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl CounterStoreError {
    /// Create a [`CounterStoreError::Backend`] with the given message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Increment-and-read for per-key fixed-window counters.
///
/// A key's counter resets once `window` has elapsed since the window opened.
/// The in-memory implementation is process-local (counts reset on restart);
/// multi-instance deployments should inject the Redis adapter instead.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increment the counter for `key` and return the new count within the
    /// current window.
    async fn increment(&self, key: &str, window: Duration) -> Result<u64, CounterStoreError>;
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u64,
    opened_at: Instant,
}

/// Process-local fixed-window counter store.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl InMemoryCounterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn increment(&self, key: &str, window: Duration) -> Result<u64, CounterStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CounterStoreError::backend("counter lock poisoned"))?;
        let now = Instant::now();
        let entry = entries.entry(key.to_owned()).or_insert(WindowEntry {
            count: 0,
            opened_at: now,
        });
        if now.duration_since(entry.opened_at) > window {
            entry.count = 0;
            entry.opened_at = now;
        }
        entry.count += 1;
        Ok(entry.count)
    }
}
