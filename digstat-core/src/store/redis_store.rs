use crate::store::{CounterStore, StoreError};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;

/// Redis-backed store. The connection manager multiplexes one connection across
/// every clone and reconnects on its own after failures.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(|e| StoreError::connect(url, e))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::connect(url, e))?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn incr_member(&self, key: &str, member: i64, by: f64) -> Result<f64, StoreError> {
        let mut conn = self.conn.clone();
        let score: f64 = redis::cmd("ZINCRBY")
            .arg(key)
            .arg(by)
            .arg(member)
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::command("ZINCRBY", key, e))?;
        Ok(score)
    }

    async fn pf_add(&self, key: &str, element: &str, ttl: Duration) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let (changed,): (i64,) = redis::pipe()
            .atomic()
            .cmd("PFADD")
            .arg(key)
            .arg(element)
            .cmd("EXPIRE")
            .arg(key)
            .arg(ttl.as_secs())
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::command("PFADD", key, e))?;
        Ok(changed == 1)
    }

    async fn member_score(&self, key: &str, member: i64) -> Result<Option<f64>, StoreError> {
        let mut conn = self.conn.clone();
        let score: Option<f64> = redis::cmd("ZSCORE")
            .arg(key)
            .arg(member)
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::command("ZSCORE", key, e))?;
        Ok(score)
    }

    async fn counter_total(&self, key: &str) -> Result<f64, StoreError> {
        let mut conn = self.conn.clone();
        let members: Vec<(String, f64)> = redis::cmd("ZRANGE")
            .arg(key)
            .arg(0)
            .arg(-1)
            .arg("WITHSCORES")
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::command("ZRANGE", key, e))?;
        Ok(members.iter().map(|(_, score)| score).sum())
    }

    async fn pf_count(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.conn.clone();
        let count: u64 = redis::cmd("PFCOUNT")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::command("PFCOUNT", key, e))?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::command("PING", "", e))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
