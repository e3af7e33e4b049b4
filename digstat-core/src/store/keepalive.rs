use crate::store::SharedStore;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct KeepaliveParams {
    pub interval: Duration,
    /// Consecutive failures after which the outage is reported at error level.
    pub failure_threshold: u32,
}

/// Ping the store forever. Failures are logged and retried after the same delay;
/// nothing here ever stops the process.
pub async fn run_keepalive(store: SharedStore, params: KeepaliveParams) {
    let mut consecutive_failures: u32 = 0;

    loop {
        match store.ping().await {
            Ok(()) => {
                if consecutive_failures > 0 {
                    info!(
                        backend = store.backend(),
                        after_failures = consecutive_failures,
                        "counter store reachable again"
                    );
                } else {
                    debug!(backend = store.backend(), "counter store ping ok");
                }
                consecutive_failures = 0;
            }
            Err(e) => {
                consecutive_failures = consecutive_failures.saturating_add(1);
                if consecutive_failures >= params.failure_threshold {
                    error!(
                        backend = store.backend(),
                        consecutive_failures,
                        error = %e,
                        "counter store unreachable"
                    );
                } else {
                    warn!(
                        backend = store.backend(),
                        consecutive_failures,
                        error = %e,
                        "counter store ping failed"
                    );
                }
            }
        }

        tokio::time::sleep(params.interval).await;
    }
}

pub fn spawn_keepalive(store: SharedStore, params: KeepaliveParams) -> JoinHandle<()> {
    tokio::spawn(run_keepalive(store, params))
}
