use crate::store::{CounterStore, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// In-process store for dry runs and tests.
///
/// Ranked counters are plain member/score maps and the "probabilistic" set is
/// exact, so cardinality answers are precise rather than estimated.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ranked: DashMap<String, HashMap<i64, f64>>,
    sets: DashMap<String, ExpiringSet>,
}

#[derive(Debug)]
struct ExpiringSet {
    members: HashSet<String>,
    expires_at: Instant,
}

impl ExpiringSet {
    fn new(ttl: Duration) -> Self {
        Self {
            members: HashSet::new(),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of every ranked counter written so far, sorted.
    pub fn counter_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.ranked.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Sum of every member score under `key`.
    pub fn total(&self, key: &str) -> f64 {
        self.ranked
            .get(key)
            .map(|members| members.values().sum())
            .unwrap_or(0.0)
    }

    /// Sum of every member score across all keys starting with `prefix`.
    pub fn total_matching(&self, prefix: &str) -> f64 {
        self.ranked
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.value().values().sum::<f64>())
            .sum()
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn incr_member(&self, key: &str, member: i64, by: f64) -> Result<f64, StoreError> {
        let mut members = self.ranked.entry(key.to_string()).or_default();
        let score = members.entry(member).or_insert(0.0);
        *score += by;
        Ok(*score)
    }

    async fn pf_add(&self, key: &str, element: &str, ttl: Duration) -> Result<bool, StoreError> {
        let now = Instant::now();
        let mut set = self
            .sets
            .entry(key.to_string())
            .or_insert_with(|| ExpiringSet::new(ttl));

        if set.is_expired(now) {
            *set = ExpiringSet::new(ttl);
        }

        let added = set.members.insert(element.to_string());
        set.expires_at = now + ttl;
        Ok(added)
    }

    async fn member_score(&self, key: &str, member: i64) -> Result<Option<f64>, StoreError> {
        Ok(self
            .ranked
            .get(key)
            .and_then(|members| members.get(&member).copied()))
    }

    async fn counter_total(&self, key: &str) -> Result<f64, StoreError> {
        Ok(self.total(key))
    }

    async fn pf_count(&self, key: &str) -> Result<u64, StoreError> {
        let now = Instant::now();
        Ok(self
            .sets
            .get(key)
            .filter(|set| !set.is_expired(now))
            .map(|set| set.members.len() as u64)
            .unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
