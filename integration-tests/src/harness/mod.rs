mod access_log;
pub mod pipeline;
pub mod tracing;

pub use access_log::{ALICE, AccessLog, BOB, CAROL, Visitor};
pub use pipeline::{PipelineRun, TestPipeline};
pub use tracing::{CapturedEvent, events_with, init_test_tracing};
