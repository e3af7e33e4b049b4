use crate::bucket::TimeBucketer;
use crate::event::StorageInstruction;
use crate::pipeline::keys::{KEYS_PER_INSTRUCTION, expand_keys};
use crate::store::SharedStore;
use flume::Receiver;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub instructions: u64,
    pub increments: u64,
    pub failed_increments: u64,
}

/// Expands instructions into their six counters and increments each one.
pub struct StorageWriter {
    store: SharedStore,
    bucketer: TimeBucketer,
}

impl StorageWriter {
    pub fn new(store: SharedStore, bucketer: TimeBucketer) -> Self {
        Self { store, bucketer }
    }

    /// Returns how many of the six increments failed. Failures are logged, never retried.
    pub async fn write(&self, instruction: &StorageInstruction) -> u64 {
        let node = &instruction.node;
        let buckets = self.bucketer.buckets(&node.time);
        let mut failed = 0;

        for key in expand_keys(instruction.kind, node.page_type, &buckets) {
            if let Err(e) = self.store.incr_member(&key, node.resource_id, 1.0).await {
                error!(
                    kind = %instruction.kind,
                    key = %key,
                    resource_id = node.resource_id,
                    error = %e,
                    "counter store increment failed"
                );
                failed += 1;
            }
        }

        failed
    }
}

pub async fn run_storage_writer(
    writer: StorageWriter,
    rx: Receiver<StorageInstruction>,
) -> WriterStats {
    let mut stats = WriterStats::default();

    while let Ok(instruction) = rx.recv_async().await {
        let failed = writer.write(&instruction).await;
        stats.instructions += 1;
        stats.increments += KEYS_PER_INSTRUCTION as u64 - failed;
        stats.failed_increments += failed;
    }

    debug!(
        instructions = stats.instructions,
        increments = stats.increments,
        failed_increments = stats.failed_increments,
        "storage writer drained"
    );
    stats
}
