use crate::event::{SharedVisit, VisitEvent, parse_line};
use flume::{Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutStats {
    pub visits: u64,
    pub skipped_lines: u64,
}

/// One parsing worker. Every line becomes a visit sent to both counters;
/// a line without a beacon is counted as skipped but still forwarded.
pub async fn run_fanout(
    worker: usize,
    raw_rx: Receiver<String>,
    pv_tx: Sender<SharedVisit>,
    uv_tx: Sender<SharedVisit>,
) -> FanoutStats {
    let mut stats = FanoutStats::default();

    while let Ok(line) = raw_rx.recv_async().await {
        let event = match parse_line(&line) {
            Some(event) => event,
            None => {
                stats.skipped_lines += 1;
                trace!(worker, "line carries no dig payload");
                Default::default()
            }
        };

        let visit = Arc::new(VisitEvent::from_event(event));

        let pv_open = pv_tx.send_async(visit.clone()).await.is_ok();
        let uv_open = uv_tx.send_async(visit).await.is_ok();
        if !pv_open && !uv_open {
            warn!(worker, "both counter queues closed, stopping fan-out worker");
            break;
        }

        stats.visits += 1;
    }

    debug!(
        worker,
        visits = stats.visits,
        skipped_lines = stats.skipped_lines,
        "fan-out worker drained"
    );
    stats
}
