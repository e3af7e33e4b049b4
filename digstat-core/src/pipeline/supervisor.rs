use crate::bucket::TimeBucketer;
use crate::conf::types::PipelineConfig;
use crate::pipeline::constants::PROGRESS_LINES_PER_WORKER;
use crate::pipeline::fanout::{FanoutStats, run_fanout};
use crate::pipeline::ingest::{IngestError, ingest_file, ingest_lines};
use crate::pipeline::pv::run_pv_counter;
use crate::pipeline::queues::{Queue, QueueCapacities, Queues};
use crate::pipeline::uv::{UvGate, UvStats, run_uv_counter};
use crate::pipeline::writer::{StorageWriter, WriterStats, run_storage_writer};
use crate::store::SharedStore;
use flume::Sender;
use std::future::Future;
use tokio::io::AsyncBufRead;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Owns the queues and every stage task for one pass over the log source.
///
/// Stages run as tasks in a `JoinSet`, so dropping the future returned by
/// [`Pipeline::run`] aborts all of them.
pub struct Pipeline {
    cfg: PipelineConfig,
    store: SharedStore,
}

#[derive(Debug, Default)]
pub struct PipelineReport {
    pub lines_read: u64,
    pub ingest_error: Option<IngestError>,
    pub visits: u64,
    pub skipped_lines: u64,
    pub pv_instructions: u64,
    pub uv: UvStats,
    pub writer: WriterStats,
}

enum StageOutcome {
    Ingest(Result<u64, IngestError>),
    Fanout(FanoutStats),
    Pv(u64),
    Uv(UvStats),
    Writer(WriterStats),
}

impl PipelineReport {
    fn absorb(&mut self, outcome: StageOutcome) {
        match outcome {
            StageOutcome::Ingest(Ok(lines)) => self.lines_read = lines,
            StageOutcome::Ingest(Err(e)) => {
                error!(error = %e, "ingestion stopped, draining pipeline");
                self.lines_read = e.lines_read();
                self.ingest_error = Some(e);
            }
            StageOutcome::Fanout(stats) => {
                self.visits += stats.visits;
                self.skipped_lines += stats.skipped_lines;
            }
            StageOutcome::Pv(emitted) => self.pv_instructions = emitted,
            StageOutcome::Uv(stats) => self.uv = stats,
            StageOutcome::Writer(stats) => self.writer = stats,
        }
    }
}

impl IngestError {
    /// Lines forwarded before the failure.
    pub fn lines_read(&self) -> u64 {
        match self {
            IngestError::Open { .. } => 0,
            IngestError::Read { lines, .. } | IngestError::QueueClosed { lines } => *lines,
        }
    }
}

impl Pipeline {
    pub fn new(cfg: PipelineConfig, store: SharedStore) -> Self {
        Self { cfg, store }
    }

    pub fn workers(&self) -> usize {
        self.cfg.workers.max(1)
    }

    pub fn capacities(&self) -> QueueCapacities {
        QueueCapacities::for_workers(self.workers())
    }

    fn progress_every(&self) -> u64 {
        PROGRESS_LINES_PER_WORKER * self.workers() as u64
    }

    /// Process the configured log file from its first line until every stage drains.
    pub async fn run(self) -> PipelineReport {
        let path = self.cfg.log_file_path.clone();
        let progress_every = self.progress_every();

        self.run_stages(move |tx| async move { ingest_file(&path, tx, progress_every).await })
            .await
    }

    /// Same as [`Pipeline::run`], reading lines from `reader` instead of the configured file.
    pub async fn run_reader<R>(self, reader: R, source_name: impl Into<String>) -> PipelineReport
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let source_name = source_name.into();
        let progress_every = self.progress_every();

        self.run_stages(move |tx| async move {
            ingest_lines(reader, &source_name, tx, progress_every).await
        })
        .await
    }

    async fn run_stages<F, Fut>(self, ingest: F) -> PipelineReport
    where
        F: FnOnce(Sender<String>) -> Fut,
        Fut: Future<Output = Result<u64, IngestError>> + Send + 'static,
    {
        let workers = self.workers();
        let caps = self.capacities();
        let bucketer = TimeBucketer::new(self.cfg.bucket_source);

        info!(
            workers,
            raw_lines_capacity = caps.raw_lines,
            pv_capacity = caps.pv,
            uv_capacity = caps.uv,
            storage_capacity = caps.storage,
            bucket_source = ?bucketer.source(),
            uv_counter_kind = %self.cfg.uv_counter_kind,
            store = self.store.backend(),
            "starting pipeline"
        );

        let Queues {
            raw_lines,
            pv,
            uv,
            storage,
        } = Queues::new(caps);
        let Queue {
            tx: raw_tx,
            rx: raw_rx,
        } = raw_lines;
        let Queue { tx: pv_tx, rx: pv_rx } = pv;
        let Queue { tx: uv_tx, rx: uv_rx } = uv;
        let Queue {
            tx: storage_tx,
            rx: storage_rx,
        } = storage;

        let mut stages = JoinSet::new();

        let ingest_task = ingest(raw_tx);
        stages.spawn(async move { StageOutcome::Ingest(ingest_task.await) });

        for worker in 0..workers {
            let (rx, pv_tx, uv_tx) = (raw_rx.clone(), pv_tx.clone(), uv_tx.clone());
            stages.spawn(async move {
                StageOutcome::Fanout(run_fanout(worker, rx, pv_tx, uv_tx).await)
            });
        }
        // Only the stages may hold queue ends, so that closing cascades downstream.
        drop((raw_rx, pv_tx, uv_tx));

        let pv_storage_tx = storage_tx.clone();
        stages.spawn(async move {
            StageOutcome::Pv(run_pv_counter(pv_rx, pv_storage_tx).await)
        });

        let gate = UvGate::new(self.store.clone(), bucketer, self.cfg.uv_counter_kind);
        stages.spawn(async move {
            StageOutcome::Uv(run_uv_counter(gate, uv_rx, storage_tx).await)
        });

        let writer = StorageWriter::new(self.store.clone(), bucketer);
        stages.spawn(async move {
            StageOutcome::Writer(run_storage_writer(writer, storage_rx).await)
        });

        let mut report = PipelineReport::default();
        while let Some(joined) = stages.join_next().await {
            match joined {
                Ok(outcome) => report.absorb(outcome),
                Err(e) => error!(error = %e, "pipeline stage did not complete"),
            }
        }

        info!(
            lines_read = report.lines_read,
            visits = report.visits,
            skipped_lines = report.skipped_lines,
            pv_instructions = report.pv_instructions,
            uv_admitted = report.uv.admitted,
            uv_store_failures = report.uv.store_failures,
            increments = report.writer.increments,
            failed_increments = report.writer.failed_increments,
            "pipeline drained"
        );

        report
    }
}
