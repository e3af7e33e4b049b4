use crate::conf::{ConfigOverrides, DigstatConfig, load_or_default, validate_config};
use crate::logging::init_logging;
use crate::pipeline::Pipeline;
use crate::store::{self, KeepaliveParams, spawn_keepalive};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::runtime::Builder;
use tracing::{error, info, warn};

/// Load configuration, start logging and run the pipeline until a shutdown signal.
pub fn run(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<()> {
    let mut cfg = load_or_default(config_path)?;
    cfg.apply_overrides(overrides);
    validate_config(&cfg)?;

    // Flushes the runtime log on exit.
    let _log_guard = init_logging(&cfg.logging).context("failed to open runtime log destination")?;

    info!("exec start");
    info!(
        log_file_path = %cfg.pipeline.log_file_path.display(),
        workers = cfg.pipeline.workers,
        store_backend = ?cfg.store.backend,
        "configuration loaded"
    );

    let rt = Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    rt.block_on(run_until_shutdown(cfg))
}

async fn run_until_shutdown(cfg: DigstatConfig) -> Result<()> {
    let store = match store::connect(&cfg.store).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "counter store unavailable at startup");
            return Err(e).context("counter store connection failed");
        }
    };

    let keepalive = spawn_keepalive(
        store.clone(),
        KeepaliveParams {
            interval: cfg.store.keepalive_interval(),
            failure_threshold: cfg.store.keepalive_failure_threshold,
        },
    );

    let pipeline = Pipeline::new(cfg.pipeline.clone(), store);

    tokio::select! {
        report = pipeline.run() => {
            if let Some(e) = &report.ingest_error {
                warn!(error = %e, "log source failed, counters reflect lines read so far");
            }
            info!(lines_read = report.lines_read, "pipeline idle, waiting for shutdown signal");
            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for shutdown signal")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for shutdown signal")?;
            info!("shutdown requested, stopping pipeline");
        }
    }

    keepalive.abort();
    info!("exec stop");
    Ok(())
}
