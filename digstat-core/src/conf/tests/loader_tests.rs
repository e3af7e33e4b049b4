use crate::bucket::BucketSource;
use crate::conf::types::StoreBackend;
use crate::conf::{ConfigError, ConfigOverrides, DigstatConfig, load_config, validate_config};
use crate::event::CounterKind;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::PathBuf;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_match_the_classic_deployment() {
    let cfg = DigstatConfig::default();

    assert_eq!(
        cfg.pipeline.log_file_path,
        PathBuf::from("/usr/local/etc/nginx/logs/dig.log")
    );
    assert_eq!(cfg.pipeline.workers, 5);
    assert_eq!(cfg.pipeline.bucket_source, BucketSource::ProcessingTime);
    assert_eq!(cfg.pipeline.uv_counter_kind, CounterKind::Pv);
    assert_eq!(cfg.store.backend, StoreBackend::Redis);
    assert_eq!(cfg.store.url, "redis://127.0.0.1:6379");
    assert_eq!(cfg.store.keepalive_interval_secs, 3);
    assert_eq!(cfg.logging.file, Some(PathBuf::from("/tmp/log")));
}

#[test]
fn loads_full_file() {
    // Arrange
    let file = write_config(
        r#"
        [pipeline]
        log_file_path = "/var/log/nginx/dig.log"
        workers = 8
        bucket_source = "event_time"
        uv_counter_kind = "uv"

        [store]
        backend = "memory"
        keepalive_interval_secs = 10

        [logging]
        level = "debug"
        "#,
    );

    // Act
    let cfg = load_config(file.path()).unwrap();

    // Assert
    assert_eq!(cfg.pipeline.log_file_path, PathBuf::from("/var/log/nginx/dig.log"));
    assert_eq!(cfg.pipeline.workers, 8);
    assert_eq!(cfg.pipeline.bucket_source, BucketSource::EventTime);
    assert_eq!(cfg.pipeline.uv_counter_kind, CounterKind::Uv);
    assert_eq!(cfg.store.backend, StoreBackend::Memory);
    assert_eq!(cfg.store.keepalive_interval_secs, 10);
    assert_eq!(cfg.logging.level, "debug");
}

#[test]
fn partial_file_keeps_defaults() {
    let file = write_config("[pipeline]\nworkers = 2\n");

    let cfg = load_config(file.path()).unwrap();

    assert_eq!(cfg.pipeline.workers, 2);
    assert_eq!(cfg.store.url, "redis://127.0.0.1:6379");
}

#[test]
fn zero_workers_is_rejected() {
    let file = write_config("[pipeline]\nworkers = 0\n");

    let err = load_config(file.path()).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidWorkers { workers: 0 }));
}

#[test]
fn unknown_backend_is_a_parse_error() {
    let file = write_config("[store]\nbackend = \"memcached\"\n");

    let err = load_config(file.path()).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = load_config(&PathBuf::from("/definitely/not/here.toml")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn redis_backend_needs_a_url() {
    let mut cfg = DigstatConfig::default();
    cfg.store.url = "  ".to_string();

    assert!(matches!(validate_config(&cfg), Err(ConfigError::MissingStoreUrl)));

    cfg.store.backend = StoreBackend::Memory;
    assert!(validate_config(&cfg).is_ok());
}

#[test]
fn overrides_win_over_file_values() {
    // Arrange
    let mut cfg = DigstatConfig::default();

    // Act
    cfg.apply_overrides(ConfigOverrides {
        log_file_path: Some(PathBuf::from("/tmp/dig.log")),
        workers: Some(12),
        log_target: Some(PathBuf::from("/tmp/digstat.log")),
        store_url: None,
        memory_store: true,
    });

    // Assert
    assert_eq!(cfg.pipeline.log_file_path, PathBuf::from("/tmp/dig.log"));
    assert_eq!(cfg.pipeline.workers, 12);
    assert_eq!(cfg.logging.file, Some(PathBuf::from("/tmp/digstat.log")));
    assert_eq!(cfg.store.backend, StoreBackend::Memory);
    assert_eq!(cfg.store.url, "redis://127.0.0.1:6379");
}

#[test]
fn shipped_config_is_valid() {
    // Arrange
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("config")
        .join("digstat.toml");

    // Act
    let cfg = load_config(&path).unwrap();

    // Assert
    assert!(validate_config(&cfg).is_ok());
    assert_eq!(cfg.pipeline.uv_counter_kind, CounterKind::Pv);
    assert_eq!(cfg.pipeline.bucket_source, BucketSource::ProcessingTime);
}

#[test]
fn validation_errors_carry_a_hint() {
    let hint = crate::cli::config::config_error_hint(&ConfigError::InvalidWorkers { workers: 0 });

    assert!(hint.is_some_and(|h| h.contains("workers = 5")));
    assert!(crate::cli::config::config_error_hint(&ConfigError::MissingStoreUrl).is_some());
}
