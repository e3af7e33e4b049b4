//! Run against a local server with `cargo test -- --ignored`.
//! `DIGSTAT_TEST_REDIS_URL` overrides the default address.

use crate::store::{CounterStore, RedisStore};
use pretty_assertions::assert_eq;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn redis_url() -> String {
    std::env::var("DIGSTAT_TEST_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

/// Keys unique to one test run so parallel runs do not collide.
fn scratch_key(name: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("digstat_test_{name}_{}_{nanos}", std::process::id())
}

async fn raw_connection() -> redis::aio::MultiplexedConnection {
    redis::Client::open(redis_url())
        .unwrap()
        .get_multiplexed_async_connection()
        .await
        .unwrap()
}

async fn delete(key: &str) {
    let mut conn = raw_connection().await;
    let _: i64 = redis::cmd("DEL")
        .arg(key)
        .query_async(&mut conn)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "needs a running redis server"]
async fn incr_member_increments_one_sorted_set_member() {
    // Arrange
    let store = RedisStore::connect(&redis_url()).await.unwrap();
    let key = scratch_key("pv_day");

    // Act
    store.incr_member(&key, 42, 1.0).await.unwrap();
    let score = store.incr_member(&key, 42, 1.0).await.unwrap();
    store.incr_member(&key, 7, 1.0).await.unwrap();

    // Assert
    assert_eq!(score, 2.0);
    assert_eq!(store.member_score(&key, 42).await.unwrap(), Some(2.0));
    assert_eq!(store.member_score(&key, 9).await.unwrap(), None);
    assert_eq!(store.counter_total(&key).await.unwrap(), 3.0);

    let mut conn = raw_connection().await;
    let kind: String = redis::cmd("TYPE")
        .arg(&key)
        .query_async(&mut conn)
        .await
        .unwrap();
    assert_eq!(kind, "zset");

    delete(&key).await;
}

#[tokio::test]
#[ignore = "needs a running redis server"]
async fn pf_add_sets_membership_and_expiry_together() {
    // Arrange
    let store = RedisStore::connect(&redis_url()).await.unwrap();
    let key = scratch_key("uv_hpll");
    let ttl = Duration::from_secs(86_400);

    // Act
    let first = store.pf_add(&key, "visitor-a", ttl).await.unwrap();
    let repeat = store.pf_add(&key, "visitor-a", ttl).await.unwrap();
    let other = store.pf_add(&key, "visitor-b", ttl).await.unwrap();

    // Assert
    assert!(first);
    assert!(!repeat);
    assert!(other);
    assert_eq!(store.pf_count(&key).await.unwrap(), 2);

    let mut conn = raw_connection().await;
    let remaining: i64 = redis::cmd("TTL")
        .arg(&key)
        .query_async(&mut conn)
        .await
        .unwrap();
    assert!(remaining > 86_000 && remaining <= 86_400, "ttl was {remaining}");

    delete(&key).await;
}

#[tokio::test]
#[ignore = "needs a running redis server"]
async fn missing_keys_read_as_empty() {
    let store = RedisStore::connect(&redis_url()).await.unwrap();
    let key = scratch_key("absent");

    assert_eq!(store.counter_total(&key).await.unwrap(), 0.0);
    assert_eq!(store.pf_count(&key).await.unwrap(), 0);
    assert!(store.ping().await.is_ok());
}
