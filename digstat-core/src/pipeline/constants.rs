use std::time::Duration;

/// Lifetime of a day's visitor membership set.
pub const UV_MEMBERSHIP_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub const UV_MEMBERSHIP_PREFIX: &str = "uv_hpll";

/// Raw-line queue holds this many lines per worker.
pub const RAW_LINES_PER_WORKER: usize = 3;

/// Ingestion logs progress every `PROGRESS_LINES_PER_WORKER * workers` lines.
pub const PROGRESS_LINES_PER_WORKER: u64 = 1000;
