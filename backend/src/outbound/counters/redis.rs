//! Redis-backed [`CounterStore`] for multi-instance deployments.
//!
//! Uses `INCR` plus a window-length `EXPIRE` set when a key's window opens.
//! Best-effort only: Redis availability is not a correctness requirement,
//! and the rate-limit middleware fails open when the store errors.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::redis::AsyncCommands;
use bb8_redis::{bb8, RedisConnectionManager};

use crate::domain::ports::{CounterStore, CounterStoreError};

/// Fixed-window counters in Redis.
#[derive(Clone)]
pub struct RedisCounterStore {
    pool: bb8::Pool<RedisConnectionManager>,
}

impl RedisCounterStore {
    /// Connect a pooled client to `url` (e.g. `redis://127.0.0.1/`).
    pub async fn connect(url: &str) -> Result<Self, CounterStoreError> {
        let manager = RedisConnectionManager::new(url)
            .map_err(|err| CounterStoreError::backend(err.to_string()))?;
        let pool = bb8::Pool::builder()
            .build(manager)
            .await
            .map_err(|err| CounterStoreError::backend(err.to_string()))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str, window: Duration) -> Result<u64, CounterStoreError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| CounterStoreError::backend(err.to_string()))?;

        let namespaced = format!("ratelimit:{key}");
        let count: u64 = conn
            .incr(&namespaced, 1u64)
            .await
            .map_err(|err| CounterStoreError::backend(err.to_string()))?;

        if count == 1 {
            let seconds = i64::try_from(window.as_secs()).unwrap_or(60).max(1);
            let _: i64 = conn
                .expire(&namespaced, seconds)
                .await
                .map_err(|err| CounterStoreError::backend(err.to_string()))?;
        }
        Ok(count)
    }
}
