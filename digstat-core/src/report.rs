//! Read side of the counters: current totals for one bucket set.

use crate::bucket::{BucketSet, Granularity};
use crate::event::{CounterKind, PageType};
use crate::pipeline::{counter_key, membership_key};
use crate::store::{CounterStore, StoreError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterReading {
    pub key: String,
    /// `None` for the global counter.
    pub page: Option<&'static str>,
    pub granularity: &'static str,
    pub total: f64,
    pub member_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterReport {
    pub kind: CounterKind,
    pub member: i64,
    pub day_bucket: i64,
    pub unique_visitors: u64,
    pub readings: Vec<CounterReading>,
}

/// Read every global and per-page counter of `kind` for `buckets`, plus the
/// day's visitor cardinality.
pub async fn read_counters(
    store: &dyn CounterStore,
    kind: CounterKind,
    member: i64,
    buckets: &BucketSet,
) -> Result<CounterReport, StoreError> {
    let scopes = std::iter::once(None).chain(PageType::all().into_iter().map(Some));

    let mut readings = Vec::new();
    for scope in scopes {
        for granularity in Granularity::all() {
            let key = counter_key(kind, scope, granularity, buckets.get(granularity));
            let total = store.counter_total(&key).await?;
            let member_score = store.member_score(&key, member).await?;

            readings.push(CounterReading {
                key,
                page: scope.map(PageType::as_str),
                granularity: granularity.as_str(),
                total,
                member_score,
            });
        }
    }

    let unique_visitors = store
        .pf_count(&membership_key(&buckets.day.to_string()))
        .await?;

    Ok(CounterReport {
        kind,
        member,
        day_bucket: buckets.day,
        unique_visitors,
        readings,
    })
}
