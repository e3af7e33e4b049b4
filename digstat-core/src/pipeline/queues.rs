use crate::event::{SharedVisit, StorageInstruction};
use crate::pipeline::constants::RAW_LINES_PER_WORKER;
use flume::{Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueCapacities {
    pub raw_lines: usize,
    pub pv: usize,
    pub uv: usize,
    pub storage: usize,
}

impl QueueCapacities {
    pub fn for_workers(workers: usize) -> Self {
        let workers = workers.max(1);
        Self {
            raw_lines: RAW_LINES_PER_WORKER * workers,
            pv: workers,
            uv: workers,
            storage: workers,
        }
    }
}

/// Both ends of one bounded queue.
#[derive(Debug)]
pub struct Queue<T> {
    pub tx: Sender<T>,
    pub rx: Receiver<T>,
}

impl<T> Queue<T> {
    fn bounded(capacity: usize) -> Self {
        let (tx, rx) = flume::bounded(capacity);
        Self { tx, rx }
    }
}

/// Every queue between pipeline stages, built once at startup.
#[derive(Debug)]
pub struct Queues {
    pub raw_lines: Queue<String>,
    pub pv: Queue<SharedVisit>,
    pub uv: Queue<SharedVisit>,
    pub storage: Queue<StorageInstruction>,
}

impl Queues {
    pub fn new(caps: QueueCapacities) -> Self {
        Self {
            raw_lines: Queue::bounded(caps.raw_lines),
            pv: Queue::bounded(caps.pv),
            uv: Queue::bounded(caps.uv),
            storage: Queue::bounded(caps.storage),
        }
    }
}
