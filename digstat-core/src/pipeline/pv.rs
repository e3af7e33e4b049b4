use crate::event::{CounterKind, SharedVisit, StorageInstruction};
use flume::{Receiver, Sender};
use tracing::{debug, warn};

/// Every visit is a page view.
pub async fn run_pv_counter(rx: Receiver<SharedVisit>, tx: Sender<StorageInstruction>) -> u64 {
    let mut emitted: u64 = 0;

    while let Ok(visit) = rx.recv_async().await {
        let instruction = StorageInstruction {
            kind: CounterKind::Pv,
            node: visit.node.clone(),
        };

        if tx.send_async(instruction).await.is_err() {
            warn!(emitted, "storage queue closed, stopping pv counter");
            break;
        }
        emitted += 1;
    }

    debug!(emitted, "pv counter drained");
    emitted
}
