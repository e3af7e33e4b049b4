use crate::conf::error::ConfigError;
use crate::conf::types::{DigstatConfig, StoreBackend};
use std::fs;
use std::path::Path;

/// Read and validate a config file.
pub fn load_config(path: &Path) -> Result<DigstatConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let cfg = parse_config(path, &contents)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Load `path` when given, otherwise start from the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<DigstatConfig, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(DigstatConfig::default()),
    }
}

pub fn parse_config(path: &Path, contents: &str) -> Result<DigstatConfig, ConfigError> {
    toml::from_str(contents).map_err(|e| ConfigError::parse(path, e))
}

pub fn validate_config(cfg: &DigstatConfig) -> Result<(), ConfigError> {
    if cfg.pipeline.workers == 0 {
        return Err(ConfigError::InvalidWorkers {
            workers: cfg.pipeline.workers,
        });
    }

    if cfg.pipeline.log_file_path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyLogPath);
    }

    if cfg.store.keepalive_interval_secs == 0 {
        return Err(ConfigError::InvalidKeepalive);
    }

    if cfg.store.backend == StoreBackend::Redis && cfg.store.url.trim().is_empty() {
        return Err(ConfigError::MissingStoreUrl);
    }

    Ok(())
}
