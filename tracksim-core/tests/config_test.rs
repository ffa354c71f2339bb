//! Tests for the tracksim configuration system.

use std::sync::Mutex;

use tracksim_core::config::{CliOverrides, TracksimConfig};
use tracksim_core::errors::ConfigError;

/// Serializes tests that touch environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_tracksim_env_vars() {
    for key in [
        "TRACKSIM_DB_PATH",
        "TRACKSIM_FLUSH_THRESHOLD",
        "TRACKSIM_RECYCLE_EVERY",
        "TRACKSIM_PARALLEL",
        "TRACKSIM_HOLDOUT_STRIDE",
        "TRACKSIM_PREDICTIONS_PATH",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn empty_toml_yields_reference_defaults() {
    let config = TracksimConfig::from_toml("").unwrap();

    assert_eq!(config.storage.effective_db_path(), "rating_data.db");
    assert_eq!(config.storage.effective_busy_timeout_ms(), 5_000);
    assert_eq!(config.similarity.effective_flush_threshold(), 750_000);
    assert_eq!(config.similarity.effective_recycle_every(), 250);
    assert!(!config.similarity.effective_include_self_pairs());
    assert!(!config.similarity.effective_parallel());
    assert_eq!(config.prediction.effective_output_path(), "predictions.csv");
    assert!(config.prediction.effective_user_fallback());
    assert_eq!(config.prediction.effective_similarity_cache_capacity(), 1_024);
    assert_eq!(config.evaluation.effective_holdout_stride(), 100);
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let config = TracksimConfig::from_toml(
        r#"
[similarity]
flush_threshold = 1000
include_self_pairs = true

[evaluation]
holdout_stride = 10
"#,
    )
    .unwrap();

    assert_eq!(config.similarity.effective_flush_threshold(), 1000);
    assert!(config.similarity.effective_include_self_pairs());
    assert_eq!(config.similarity.effective_recycle_every(), 250);
    assert_eq!(config.evaluation.effective_holdout_stride(), 10);
}

#[test]
fn zero_thresholds_are_rejected() {
    for toml in [
        "[similarity]\nflush_threshold = 0",
        "[similarity]\nrecycle_every = 0",
        "[similarity]\nprogress_interval = 0",
        "[evaluation]\nholdout_stride = 0",
    ] {
        let err = TracksimConfig::from_toml(toml).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationFailed { .. }),
            "expected validation failure for {toml:?}, got {err:?}"
        );
    }
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = TracksimConfig::from_toml("[similarity\nflush_threshold = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn layered_resolution_cli_beats_env_beats_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_tracksim_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("tracksim.toml"),
        r#"
[storage]
db_path = "project.db"

[similarity]
recycle_every = 50
flush_threshold = 200
"#,
    )
    .unwrap();

    std::env::set_var("TRACKSIM_FLUSH_THRESHOLD", "300");
    std::env::set_var("TRACKSIM_DB_PATH", "env.db");

    let cli = CliOverrides {
        db_path: Some("cli.db".to_string()),
        ..Default::default()
    };
    let config = TracksimConfig::load(dir.path(), Some(&cli)).unwrap();
    clear_tracksim_env_vars();

    assert_eq!(config.storage.effective_db_path(), "cli.db");
    assert_eq!(config.similarity.effective_flush_threshold(), 300);
    assert_eq!(config.similarity.effective_recycle_every(), 50);
}

#[test]
fn unparseable_env_values_are_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_tracksim_env_vars();

    std::env::set_var("TRACKSIM_RECYCLE_EVERY", "many");
    let dir = tempfile::TempDir::new().unwrap();
    let config = TracksimConfig::load(dir.path(), None).unwrap();
    clear_tracksim_env_vars();

    assert_eq!(config.similarity.effective_recycle_every(), 250);
}

#[test]
fn explicit_config_file_must_exist() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = TracksimConfig::load_file(&dir.path().join("missing.toml"), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn config_round_trips_through_toml() {
    let config = TracksimConfig::from_toml("[prediction]\nuser_fallback = false").unwrap();
    let text = config.to_toml().unwrap();
    let back = TracksimConfig::from_toml(&text).unwrap();
    assert!(!back.prediction.effective_user_fallback());
}
