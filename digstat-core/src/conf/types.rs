use crate::bucket::BucketSource;
use crate::event::CounterKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DigstatConfig {
    pub pipeline: PipelineConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Access log to read, from the first line.
    pub log_file_path: PathBuf,

    /// Number of parsing workers. Queue capacities scale with it.
    pub workers: usize,

    pub bucket_source: BucketSource,

    /// Key prefix used for counters credited by the unique-visitor path.
    pub uv_counter_kind: CounterKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_file_path: PathBuf::from(default_log_file_path()),
            workers: default_workers(),
            bucket_source: BucketSource::default(),
            uv_counter_kind: CounterKind::Pv,
        }
    }
}

fn default_log_file_path() -> &'static str {
    "/usr/local/etc/nginx/logs/dig.log"
}

fn default_workers() -> usize {
    5
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: String,
    pub keepalive_interval_secs: u64,
    pub keepalive_failure_threshold: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Redis,
            url: "redis://127.0.0.1:6379".to_string(),
            keepalive_interval_secs: 3,
            keepalive_failure_threshold: 3,
        }
    }
}

impl StoreConfig {
    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_secs(self.keepalive_interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Runtime log destination. Stdout when unset.
    pub file: Option<PathBuf>,

    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from("/tmp/log")),
            level: "info".to_string(),
        }
    }
}

/// Command-line values that win over the file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigOverrides {
    /// Access log to tail
    #[arg(long)]
    pub log_file_path: Option<PathBuf>,

    /// Number of parsing workers
    #[arg(long = "routine-num")]
    pub workers: Option<usize>,

    /// Where the runtime log is written
    #[arg(short = 'l', long = "log-target")]
    pub log_target: Option<PathBuf>,

    #[arg(long)]
    pub store_url: Option<String>,

    /// Count into process memory instead of Redis
    #[arg(long)]
    pub memory_store: bool,
}

impl DigstatConfig {
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.log_file_path {
            self.pipeline.log_file_path = path;
        }
        if let Some(workers) = overrides.workers {
            self.pipeline.workers = workers;
        }
        if let Some(target) = overrides.log_target {
            self.logging.file = Some(target);
        }
        if let Some(url) = overrides.store_url {
            self.store.url = url;
        }
        if overrides.memory_store {
            self.store.backend = StoreBackend::Memory;
        }
    }
}
