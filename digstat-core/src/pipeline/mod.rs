//! Log-to-counter streaming pipeline.
//!
//! log source
//! ingest       -> raw line queue (3 x workers)
//! fan-out x N  -> pv queue (workers), uv queue (workers)
//! pv counter   -> storage queue (workers)
//! uv counter   -> storage queue, only for visitors new to the day
//! storage writer -> six counter increments per instruction
//!
//! Every queue is bounded, so a slow counter store stalls the stages upstream
//! of it instead of growing memory.

mod constants;
mod fanout;
mod ingest;
mod keys;
mod pv;
mod queues;
mod supervisor;
mod uv;
mod writer;

#[cfg(test)]
mod tests;

pub use constants::{UV_MEMBERSHIP_PREFIX, UV_MEMBERSHIP_TTL};
pub use fanout::{FanoutStats, run_fanout};
pub use ingest::{IngestError, ingest_file, ingest_lines};
pub use keys::{KEYS_PER_INSTRUCTION, counter_key, expand_keys, membership_key};
pub use pv::run_pv_counter;
pub use queues::{Queue, QueueCapacities, Queues};
pub use supervisor::{Pipeline, PipelineReport};
pub use uv::{Admission, UvGate, UvStats, run_uv_counter};
pub use writer::{StorageWriter, WriterStats, run_storage_writer};
