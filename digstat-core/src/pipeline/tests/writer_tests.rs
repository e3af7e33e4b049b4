use crate::bucket::TimeBucketer;
use crate::event::{CounterKind, PageType, StorageInstruction, UrlNode};
use crate::pipeline::{StorageWriter, run_storage_writer};
use crate::store::{CounterStore, MemoryStore};
use crate::test_helpers::FlakyStore;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn list_seven() -> StorageInstruction {
    StorageInstruction {
        kind: CounterKind::Pv,
        node: UrlNode {
            page_type: PageType::List,
            resource_id: 7,
            url: "/list/7.html".to_string(),
            time: "1709617641".to_string(),
        },
    }
}

#[tokio::test]
async fn one_instruction_increments_six_counters() {
    // Arrange
    let store = Arc::new(MemoryStore::new());
    let writer = StorageWriter::new(store.clone(), TimeBucketer::default());

    // Act
    let failed = writer.write(&list_seven()).await;

    // Assert
    assert_eq!(failed, 0);

    let keys = store.counter_keys();
    assert_eq!(keys.len(), 6);

    let mut shapes: Vec<String> = keys
        .iter()
        .map(|k| k.rsplit_once('_').unwrap().0.to_string())
        .collect();
    shapes.sort();
    assert_eq!(
        shapes,
        vec![
            "pv_day",
            "pv_hour",
            "pv_list_day",
            "pv_list_hour",
            "pv_list_minute",
            "pv_minute",
        ]
    );

    for key in &keys {
        assert_eq!(store.member_score(key, 7).await.unwrap(), Some(1.0), "{key}");
        assert_eq!(store.total(key), 1.0, "{key}");
    }
}

#[tokio::test]
async fn global_and_scoped_keys_share_bucket_values() {
    let store = Arc::new(MemoryStore::new());
    let writer = StorageWriter::new(store.clone(), TimeBucketer::default());

    writer.write(&list_seven()).await;

    let keys = store.counter_keys();
    let bucket_of = |prefix: &str| {
        keys.iter()
            .find_map(|k| k.strip_prefix(prefix))
            .unwrap()
            .to_string()
    };
    assert_eq!(bucket_of("pv_day_"), bucket_of("pv_list_day_"));
    assert_eq!(bucket_of("pv_hour_"), bucket_of("pv_list_hour_"));
    assert_eq!(bucket_of("pv_minute_"), bucket_of("pv_list_minute_"));
}

#[tokio::test]
async fn failed_increments_are_counted_and_skipped() {
    // Arrange
    let store = Arc::new(FlakyStore::failing(2));
    let writer = StorageWriter::new(store.clone(), TimeBucketer::default());
    let (tx, rx) = flume::bounded(4);
    tx.send(list_seven()).unwrap();
    tx.send(list_seven()).unwrap();
    drop(tx);

    // Act
    let stats = run_storage_writer(writer, rx).await;

    // Assert
    assert_eq!(stats.instructions, 2);
    assert_eq!(stats.failed_increments, 2);
    assert_eq!(stats.increments, 10);
    assert_eq!(store.inner.total_matching("pv_"), 10.0);
}
