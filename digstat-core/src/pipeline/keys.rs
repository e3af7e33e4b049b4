use crate::bucket::{BucketSet, Granularity};
use crate::event::{CounterKind, PageType};
use crate::pipeline::constants::UV_MEMBERSHIP_PREFIX;

pub const KEYS_PER_INSTRUCTION: usize = 6;

/// `<kind>_<granularity>_<bucket>` or `<kind>_<page>_<granularity>_<bucket>`.
pub fn counter_key(
    kind: CounterKind,
    scope: Option<PageType>,
    granularity: Granularity,
    bucket: i64,
) -> String {
    match scope {
        Some(page) => format!("{kind}_{page}_{granularity}_{bucket}"),
        None => format!("{kind}_{granularity}_{bucket}"),
    }
}

/// The six counters one instruction increments: global day/hour/minute, then
/// the same three scoped to the page type.
pub fn expand_keys(
    kind: CounterKind,
    page: PageType,
    buckets: &BucketSet,
) -> [String; KEYS_PER_INSTRUCTION] {
    let [day, hour, minute] = Granularity::all();
    [
        counter_key(kind, None, day, buckets.day),
        counter_key(kind, None, hour, buckets.hour),
        counter_key(kind, None, minute, buckets.minute),
        counter_key(kind, Some(page), day, buckets.day),
        counter_key(kind, Some(page), hour, buckets.hour),
        counter_key(kind, Some(page), minute, buckets.minute),
    ]
}

pub fn membership_key(day_bucket: &str) -> String {
    format!("{UV_MEMBERSHIP_PREFIX}_{day_bucket}")
}
