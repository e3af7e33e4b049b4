use crate::store::{CounterStore, MemoryStore, StoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Fails the first `failures` calls of every operation, then delegates to memory.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    failures: u32,
    calls: AtomicU32,
}

impl FlakyStore {
    pub fn failing(failures: u32) -> Self {
        Self {
            inner: MemoryStore::new(),
            failures,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            Err(StoreError::Unavailable(format!("injected failure {}", n + 1)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CounterStore for FlakyStore {
    async fn incr_member(&self, key: &str, member: i64, by: f64) -> Result<f64, StoreError> {
        self.check()?;
        self.inner.incr_member(key, member, by).await
    }

    async fn pf_add(&self, key: &str, element: &str, ttl: Duration) -> Result<bool, StoreError> {
        self.check()?;
        self.inner.pf_add(key, element, ttl).await
    }

    async fn member_score(&self, key: &str, member: i64) -> Result<Option<f64>, StoreError> {
        self.inner.member_score(key, member).await
    }

    async fn counter_total(&self, key: &str) -> Result<f64, StoreError> {
        self.inner.counter_total(key).await
    }

    async fn pf_count(&self, key: &str) -> Result<u64, StoreError> {
        self.inner.pf_count(key).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }

    fn backend(&self) -> &'static str {
        "flaky"
    }
}

/// Blocks every increment until a permit is released.
#[derive(Debug)]
pub struct GatedStore {
    pub inner: MemoryStore,
    pub gate: Semaphore,
}

impl GatedStore {
    pub fn closed() -> Self {
        Self {
            inner: MemoryStore::new(),
            gate: Semaphore::new(0),
        }
    }
}

#[async_trait]
impl CounterStore for GatedStore {
    async fn incr_member(&self, key: &str, member: i64, by: f64) -> Result<f64, StoreError> {
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        permit.forget();
        self.inner.incr_member(key, member, by).await
    }

    async fn pf_add(&self, key: &str, element: &str, ttl: Duration) -> Result<bool, StoreError> {
        self.inner.pf_add(key, element, ttl).await
    }

    async fn member_score(&self, key: &str, member: i64) -> Result<Option<f64>, StoreError> {
        self.inner.member_score(key, member).await
    }

    async fn counter_total(&self, key: &str) -> Result<f64, StoreError> {
        self.inner.counter_total(key).await
    }

    async fn pf_count(&self, key: &str) -> Result<u64, StoreError> {
        self.inner.pf_count(key).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "gated"
    }
}

/// An access-log line carrying a `/dig?` beacon.
pub fn dig_line(url: &str, refer: &str, ua: &str) -> String {
    let encode = |s: &str| url::form_urlencoded::byte_serialize(s.as_bytes()).collect::<String>();
    format!(
        "127.0.0.1 - - [05/Mar/2024:13:47:21 +0800] \"GET /dig?time=1709617641&url={}&refer={}&ua={} HTTP/1.1\" 200 43 \"-\" \"-\"",
        encode(url),
        encode(refer),
        encode(ua)
    )
}
