//! Time bucketing shared by the UV gate and the storage writer.
//!
//! A bucket label is the epoch-millisecond start of the day, hour or minute that
//! contains the reference time. The reference time is the processing clock by
//! default; [`BucketSource::EventTime`] switches it to the event's own timestamp.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Day,
    Hour,
    Minute,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Hour => "hour",
            Granularity::Minute => "minute",
        }
    }

    fn width_ms(self) -> i64 {
        match self {
            Granularity::Day => DAY_MS,
            Granularity::Hour => HOUR_MS,
            Granularity::Minute => MINUTE_MS,
        }
    }

    pub fn all() -> [Granularity; 3] {
        [Granularity::Day, Granularity::Hour, Granularity::Minute]
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which clock a bucket is taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketSource {
    #[default]
    ProcessingTime,
    EventTime,
}

/// Start of the bucket containing `at`, in epoch milliseconds (UTC).
pub fn bucket_at(at: DateTime<Utc>, granularity: Granularity) -> i64 {
    let ms = at.timestamp_millis();
    ms - ms.rem_euclid(granularity.width_ms())
}

/// Day, hour and minute buckets taken from a single clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketSet {
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
}

impl BucketSet {
    pub fn at(at: DateTime<Utc>) -> Self {
        Self {
            day: bucket_at(at, Granularity::Day),
            hour: bucket_at(at, Granularity::Hour),
            minute: bucket_at(at, Granularity::Minute),
        }
    }

    pub fn get(&self, granularity: Granularity) -> i64 {
        match granularity {
            Granularity::Day => self.day,
            Granularity::Hour => self.hour,
            Granularity::Minute => self.minute,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeBucketer {
    source: BucketSource,
}

impl TimeBucketer {
    pub fn new(source: BucketSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> BucketSource {
        self.source
    }

    /// Bucket label for one granularity, as a decimal millisecond string.
    pub fn bucket(&self, event_time: &str, granularity: Granularity) -> String {
        bucket_at(self.reference_time(event_time), granularity).to_string()
    }

    pub fn buckets(&self, event_time: &str) -> BucketSet {
        BucketSet::at(self.reference_time(event_time))
    }

    fn reference_time(&self, event_time: &str) -> DateTime<Utc> {
        match self.source {
            BucketSource::ProcessingTime => Utc::now(),
            BucketSource::EventTime => parse_event_time(event_time).unwrap_or_else(|| {
                tracing::debug!(event_time, "unparsable event time, using processing time");
                Utc::now()
            }),
        }
    }
}

/// Accepts epoch seconds, epoch milliseconds (13 or more digits) or RFC 3339.
pub fn parse_event_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        let n: i64 = raw.parse().ok()?;
        return if raw.len() >= 13 {
            Utc.timestamp_millis_opt(n).single()
        } else {
            Utc.timestamp_opt(n, 0).single()
        };
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
