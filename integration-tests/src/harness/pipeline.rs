use crate::harness::AccessLog;
use digstat_core::conf::types::PipelineConfig;
use digstat_core::event::CounterKind;
use digstat_core::pipeline::{Pipeline, PipelineReport};
use digstat_core::store::{MemoryStore, SharedStore};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Runs the full pipeline over a generated access log against an in-memory store.
pub struct TestPipeline {
    cfg: PipelineConfig,
    store: Arc<MemoryStore>,
}

/// Result of one drained run. The log file lives as long as this value.
pub struct PipelineRun {
    pub report: PipelineReport,
    pub store: Arc<MemoryStore>,
    pub log: NamedTempFile,
}

impl TestPipeline {
    pub fn new() -> Self {
        Self {
            cfg: PipelineConfig::default(),
            store: Arc::new(MemoryStore::new()),
        }
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.cfg.workers = workers;
        self
    }

    pub fn uv_counter_kind(mut self, kind: CounterKind) -> Self {
        self.cfg.uv_counter_kind = kind;
        self
    }

    pub async fn run(mut self, log: &AccessLog) -> PipelineRun {
        let file = log.write();
        self.cfg.log_file_path = file.path().to_path_buf();

        let store: SharedStore = self.store.clone();
        let report = Pipeline::new(self.cfg, store).run().await;

        PipelineRun {
            report,
            store: self.store,
            log: file,
        }
    }
}

impl Default for TestPipeline {
    fn default() -> Self {
        Self::new()
    }
}
