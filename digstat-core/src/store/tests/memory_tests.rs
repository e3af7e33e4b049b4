use crate::store::{CounterStore, MemoryStore};
use pretty_assertions::assert_eq;
use std::time::Duration;

const DAY: Duration = Duration::from_secs(86_400);

#[tokio::test]
async fn increments_accumulate_per_member() {
    // Arrange
    let store = MemoryStore::new();

    // Act
    store.incr_member("pv_day_0", 7, 1.0).await.unwrap();
    store.incr_member("pv_day_0", 7, 1.0).await.unwrap();
    let score = store.incr_member("pv_day_0", 9, 1.0).await.unwrap();

    // Assert
    assert_eq!(score, 1.0);
    assert_eq!(store.member_score("pv_day_0", 7).await.unwrap(), Some(2.0));
    assert_eq!(store.member_score("pv_day_0", 8).await.unwrap(), None);
    assert_eq!(store.total("pv_day_0"), 3.0);
    assert_eq!(store.counter_keys(), vec!["pv_day_0".to_string()]);
}

#[tokio::test]
async fn pf_add_reports_only_new_members() {
    let store = MemoryStore::new();

    assert!(store.pf_add("uv_hpll_0", "a", DAY).await.unwrap());
    assert!(!store.pf_add("uv_hpll_0", "a", DAY).await.unwrap());
    assert!(store.pf_add("uv_hpll_0", "b", DAY).await.unwrap());
    assert!(store.pf_add("uv_hpll_1", "a", DAY).await.unwrap());

    assert_eq!(store.pf_count("uv_hpll_0").await.unwrap(), 2);
    assert_eq!(store.pf_count("uv_hpll_1").await.unwrap(), 1);
    assert_eq!(store.pf_count("missing").await.unwrap(), 0);
}

#[tokio::test]
async fn expired_sets_start_over() {
    // Arrange
    let store = MemoryStore::new();
    let ttl = Duration::from_millis(20);
    assert!(store.pf_add("uv_hpll_0", "a", ttl).await.unwrap());

    // Act
    tokio::time::sleep(Duration::from_millis(40)).await;

    // Assert
    assert_eq!(store.pf_count("uv_hpll_0").await.unwrap(), 0);
    assert!(store.pf_add("uv_hpll_0", "a", ttl).await.unwrap());
}
