//! Counter store client.
//!
//! The pipeline only needs a handful of operations from the store: a ranked
//! counter increment, a probabilistic set add with expiry, the read side of
//! both, and a liveness probe. Redis provides them in production
//! (`ZINCRBY`, `PFADD` + `EXPIRE`, `ZSCORE`, `PFCOUNT`, `PING`).

mod error;
mod keepalive;
mod memory;
mod redis_store;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use keepalive::{KeepaliveParams, run_keepalive, spawn_keepalive};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use crate::conf::types::{StoreBackend, StoreConfig};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub type SharedStore = Arc<dyn CounterStore>;

#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Add `by` to `member`'s score in the ranked counter at `key`; returns the new score.
    async fn incr_member(&self, key: &str, member: i64, by: f64) -> Result<f64, StoreError>;

    /// Add `element` to the probabilistic set at `key` and (re)arm its expiry.
    /// Returns `true` when the estimated cardinality changed.
    async fn pf_add(&self, key: &str, element: &str, ttl: Duration) -> Result<bool, StoreError>;

    async fn member_score(&self, key: &str, member: i64) -> Result<Option<f64>, StoreError>;

    /// Sum of all member scores in the ranked counter at `key`.
    async fn counter_total(&self, key: &str) -> Result<f64, StoreError>;

    async fn pf_count(&self, key: &str) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    fn backend(&self) -> &'static str;
}

/// Open the configured backend. Connection failures are returned to the caller,
/// which treats them as fatal.
pub async fn connect(cfg: &StoreConfig) -> Result<SharedStore, StoreError> {
    match cfg.backend {
        StoreBackend::Redis => {
            let store = RedisStore::connect(&cfg.url).await?;
            store.ping().await?;
            tracing::info!(url = %cfg.url, "connected to redis counter store");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::info!("using in-memory counter store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
