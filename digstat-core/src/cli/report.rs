use crate::bucket::BucketSet;
use crate::conf::types::StoreBackend;
use crate::conf::{ConfigOverrides, load_or_default, validate_config};
use crate::event::CounterKind;
use crate::report::{CounterReport, read_counters};
use crate::store;
use anyhow::{Context, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use std::path::Path;
use tokio::runtime::Builder;

/// Print the counters for the current day, hour and minute.
pub fn report(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
    member: i64,
    json: bool,
) -> Result<()> {
    let mut cfg = load_or_default(config_path)?;
    cfg.apply_overrides(overrides);
    validate_config(&cfg)?;

    if cfg.store.backend == StoreBackend::Memory {
        eprintln!("note: the memory backend starts empty, every counter will read 0");
    }

    let rt = Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    // The uv path writes under its own label only when configured to.
    let mut kinds = vec![CounterKind::Pv];
    if cfg.pipeline.uv_counter_kind != CounterKind::Pv {
        kinds.push(cfg.pipeline.uv_counter_kind);
    }

    let reports = rt.block_on(async {
        let store = store::connect(&cfg.store)
            .await
            .context("counter store connection failed")?;
        let buckets = BucketSet::at(Utc::now());

        let mut reports = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let report = read_counters(store.as_ref(), kind, member, &buckets)
                .await
                .with_context(|| format!("failed to read {kind} counters"))?;
            reports.push(report);
        }
        anyhow::Ok(reports)
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            render(report);
        }
    }
    Ok(())
}

fn render(report: &CounterReport) {
    println!(
        "{} counters, day bucket {} ({} unique visitors today)",
        report.kind.bold(),
        report.day_bucket,
        report.unique_visitors
    );
    println!(
        "  {:<8} {:<8} {:>12} {:>14}",
        "page", "bucket", "total", format!("member {}", report.member)
    );
    for r in &report.readings {
        let member = r
            .member_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<8} {:<8} {:>12} {:>14}",
            r.page.unwrap_or("all"),
            r.granularity,
            r.total,
            member
        );
    }
}
