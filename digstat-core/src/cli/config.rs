use crate::conf::{ConfigError, ConfigOverrides, load_or_default, validate_config};
use owo_colors::OwoColorize;
use std::path::Path;

/// Load and validate the configuration, then print what the pipeline would run with.
pub fn check(path: Option<&Path>, overrides: ConfigOverrides) -> anyhow::Result<()> {
    let loaded = load_or_default(path).and_then(|mut cfg| {
        cfg.apply_overrides(overrides);
        validate_config(&cfg)?;
        Ok(cfg)
    });

    match loaded {
        Ok(cfg) => {
            let caps = crate::pipeline::QueueCapacities::for_workers(cfg.pipeline.workers);
            println!("{} Config loaded successfully", "✔".green());
            println!(
                "{} log source: {}",
                "✔".green(),
                cfg.pipeline.log_file_path.display()
            );
            println!(
                "{} {} workers (queues: raw {}, pv {}, uv {}, storage {})",
                "✔".green(),
                cfg.pipeline.workers,
                caps.raw_lines,
                caps.pv,
                caps.uv,
                caps.storage
            );
            println!(
                "{} buckets from {:?}, unique visitors counted as {}",
                "✔".green(),
                cfg.pipeline.bucket_source,
                cfg.pipeline.uv_counter_kind
            );
            println!(
                "{} store: {:?} {}",
                "✔".green(),
                cfg.store.backend,
                cfg.store.url
            );
            Ok(())
        }
        Err(err) => {
            print_config_error(&err);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: &ConfigError) {
    eprintln!("{} {}", "✘".red(), err);
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{}", hint);
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::InvalidWorkers { .. } => Some(
            "At least one parsing worker is required.\n\
             \n\
             Example:\n\
             \n\
             [pipeline]\n\
             workers = 5",
        ),
        ConfigError::MissingStoreUrl => Some(
            "The redis backend needs a connection url, or switch to the memory backend.\n\
             \n\
             Example:\n\
             \n\
             [store]\n\
             backend = \"redis\"\n\
             url = \"redis://127.0.0.1:6379\"",
        ),
        ConfigError::InvalidKeepalive => {
            Some("store.keepalive_interval_secs is the delay between pings, in seconds.")
        }
        ConfigError::EmptyLogPath => {
            Some("Set pipeline.log_file_path or pass --log-file-path.")
        }
        ConfigError::ReadFile { .. } | ConfigError::Parse { .. } => None,
    }
}
