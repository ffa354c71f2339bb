//! Top-level tracksim configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{EvaluationConfig, PredictionConfig, SimilarityConfig, StorageConfig};
use crate::errors::ConfigError;

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "tracksim.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`TRACKSIM_*`)
/// 3. Project config (`tracksim.toml`, or an explicit `--config` file)
/// 4. User config (`~/.tracksim/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TracksimConfig {
    pub storage: StorageConfig,
    pub similarity: SimilarityConfig,
    pub prediction: PredictionConfig,
    pub evaluation: EvaluationConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<String>,
    pub parallel: Option<bool>,
    pub output_path: Option<String>,
    pub predictions_path: Option<String>,
}

impl TracksimConfig {
    /// Load configuration, reading `tracksim.toml` from `root` if present.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let project = root.join(PROJECT_CONFIG_FILE);
        let project = project.exists().then_some(project);
        Self::load_layers(project.as_deref(), cli_overrides)
    }

    /// Load configuration from an explicit project file, which must exist.
    pub fn load_file(
        path: &Path,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::load_layers(Some(path), cli_overrides)
    }

    fn load_layers(
        project_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        if let Some(path) = project_file {
            Self::merge_toml_file(&mut config, path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &TracksimConfig) -> Result<(), ConfigError> {
        let positive: [(&str, Option<u64>); 4] = [
            (
                "similarity.flush_threshold",
                config.similarity.flush_threshold.map(|v| v as u64),
            ),
            (
                "similarity.recycle_every",
                config.similarity.recycle_every.map(|v| v as u64),
            ),
            (
                "similarity.progress_interval",
                config.similarity.progress_interval.map(|v| v as u64),
            ),
            (
                "evaluation.holdout_stride",
                config.evaluation.holdout_stride.map(u64::from),
            ),
        ];
        for (field, value) in positive {
            if value == Some(0) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(ref db_path) = config.storage.db_path {
            if db_path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.db_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.tracksim/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".tracksim").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut TracksimConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: TracksimConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut TracksimConfig, other: &TracksimConfig) {
        fn take<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
            if other.is_some() {
                *base = other.clone();
            }
        }

        take(&mut base.storage.db_path, &other.storage.db_path);
        take(&mut base.storage.busy_timeout_ms, &other.storage.busy_timeout_ms);

        take(&mut base.similarity.flush_threshold, &other.similarity.flush_threshold);
        take(&mut base.similarity.recycle_every, &other.similarity.recycle_every);
        take(
            &mut base.similarity.include_self_pairs,
            &other.similarity.include_self_pairs,
        );
        take(&mut base.similarity.parallel, &other.similarity.parallel);
        take(
            &mut base.similarity.progress_interval,
            &other.similarity.progress_interval,
        );

        take(&mut base.prediction.output_path, &other.prediction.output_path);
        take(&mut base.prediction.user_fallback, &other.prediction.user_fallback);
        take(
            &mut base.prediction.similarity_cache_capacity,
            &other.prediction.similarity_cache_capacity,
        );

        take(&mut base.evaluation.holdout_stride, &other.evaluation.holdout_stride);
        take(
            &mut base.evaluation.predictions_path,
            &other.evaluation.predictions_path,
        );
    }

    /// Apply environment variable overrides.
    /// Pattern: `TRACKSIM_DB_PATH`, `TRACKSIM_FLUSH_THRESHOLD`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut TracksimConfig) {
        if let Ok(val) = std::env::var("TRACKSIM_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("TRACKSIM_FLUSH_THRESHOLD") {
            if let Ok(v) = val.parse::<usize>() {
                config.similarity.flush_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TRACKSIM_RECYCLE_EVERY") {
            if let Ok(v) = val.parse::<usize>() {
                config.similarity.recycle_every = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TRACKSIM_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.similarity.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TRACKSIM_HOLDOUT_STRIDE") {
            if let Ok(v) = val.parse::<u32>() {
                config.evaluation.holdout_stride = Some(v);
            }
        }
        if let Ok(val) = std::env::var("TRACKSIM_PREDICTIONS_PATH") {
            config.evaluation.predictions_path = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut TracksimConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(v) = cli.parallel {
            config.similarity.parallel = Some(v);
        }
        if let Some(ref v) = cli.output_path {
            config.prediction.output_path = Some(v.clone());
        }
        if let Some(ref v) = cli.predictions_path {
            config.evaluation.predictions_path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
