//! Counter-store adapters for the rate limiter.

mod redis;

pub use redis::RedisCounterStore;
