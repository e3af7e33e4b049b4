use crate::bucket::{Granularity, TimeBucketer};
use crate::event::{CounterKind, SharedVisit, StorageInstruction, VisitEvent};
use crate::pipeline::constants::UV_MEMBERSHIP_TTL;
use crate::pipeline::keys::membership_key;
use crate::store::SharedStore;
use flume::{Receiver, Sender};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UvStats {
    pub seen: u64,
    pub admitted: u64,
    pub store_failures: u64,
}

/// Result of checking one visit against the day's membership set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    New(StorageInstruction),
    Seen,
    StoreFailed,
}

/// Lets a visitor through at most once per day bucket.
pub struct UvGate {
    store: SharedStore,
    bucketer: TimeBucketer,
    kind: CounterKind,
}

impl UvGate {
    pub fn new(store: SharedStore, bucketer: TimeBucketer, kind: CounterKind) -> Self {
        Self {
            store,
            bucketer,
            kind,
        }
    }

    pub async fn admit(&self, visit: &VisitEvent) -> Admission {
        let day = self.bucketer.bucket(&visit.event.time, Granularity::Day);
        let key = membership_key(&day);

        match self
            .store
            .pf_add(&key, &visit.visitor_id, UV_MEMBERSHIP_TTL)
            .await
        {
            Ok(true) => Admission::New(StorageInstruction {
                kind: self.kind,
                node: visit.node.clone(),
            }),
            Ok(false) => Admission::Seen,
            Err(e) => {
                warn!(
                    key = %key,
                    visitor_id = %visit.visitor_id,
                    error = %e,
                    "uv membership check failed, dropping visit"
                );
                Admission::StoreFailed
            }
        }
    }
}

pub async fn run_uv_counter(
    gate: UvGate,
    rx: Receiver<SharedVisit>,
    tx: Sender<StorageInstruction>,
) -> UvStats {
    let mut stats = UvStats::default();

    while let Ok(visit) = rx.recv_async().await {
        stats.seen += 1;

        match gate.admit(&visit).await {
            Admission::New(instruction) => {
                if tx.send_async(instruction).await.is_err() {
                    warn!(admitted = stats.admitted, "storage queue closed, stopping uv counter");
                    break;
                }
                stats.admitted += 1;
            }
            Admission::Seen => {}
            Admission::StoreFailed => stats.store_failures += 1,
        }
    }

    debug!(
        seen = stats.seen,
        admitted = stats.admitted,
        store_failures = stats.store_failures,
        "uv counter drained"
    );
    stats
}
