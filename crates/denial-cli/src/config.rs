//! Dashboard configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `DENIAL_MODEL_PATH`, then command-line flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use denial_core::{DEFAULT_MODEL_PATH, MODEL_PATH_ENV};
use denial_report::DEFAULT_CHART_TOP_N;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Address the HTTP server listens on.
    pub bind: SocketAddr,
    /// Prediction artifact location.
    pub model_path: PathBuf,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: u64,
    /// Bars per dashboard chart.
    pub chart_top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            chart_top_n: DEFAULT_CHART_TOP_N,
        }
    }
}

/// Flag values that override the file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<SocketAddr>,
    pub model_path: Option<PathBuf>,
    pub max_upload_bytes: Option<u64>,
    pub chart_top_n: Option<usize>,
}

impl DashboardConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse dashboard config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("load config {}", path.display()))
    }

    /// Applies an environment value for the model path, if any.
    pub fn with_model_env(mut self, value: Option<String>) -> Self {
        if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
            self.model_path = PathBuf::from(value);
        }
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(bind) = overrides.bind {
            self.bind = bind;
        }
        if let Some(path) = overrides.model_path {
            self.model_path = path;
        }
        if let Some(max) = overrides.max_upload_bytes {
            self.max_upload_bytes = max;
        }
        if let Some(top_n) = overrides.chart_top_n {
            self.chart_top_n = top_n;
        }
        self
    }

    /// Rejects values that would hide charts for non-empty tables.
    pub fn validate(&self) -> Result<()> {
        if self.chart_top_n == 0 {
            bail!("chart_top_n must be at least 1");
        }
        Ok(())
    }

    /// Resolves the effective configuration from every layer.
    pub fn resolve(file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config
            .with_model_env(std::env::var(MODEL_PATH_ENV).ok())
            .with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert_eq!(config.model_path, PathBuf::from("denial_model.joblib"));
        assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(config.chart_top_n, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
bind = "0.0.0.0:8080"
chart_top_n = 5
"#,
        )
        .unwrap();
        assert_eq!(config.bind.to_string(), "0.0.0.0:8080");
        assert_eq!(config.chart_top_n, 5);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_zero_chart_top_n_rejected() {
        let err = DashboardConfig::resolve(
            None,
            ConfigOverrides {
                chart_top_n: Some(0),
                ..ConfigOverrides::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("chart_top_n"));

        let from_file = DashboardConfig::from_toml_str("chart_top_n = 0").unwrap();
        assert!(from_file.validate().is_err());
        assert!(DashboardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(DashboardConfig::from_toml_str("port = 80").is_err());
    }

    #[test]
    fn test_layer_precedence() {
        let config = DashboardConfig::from_toml_str(r#"model_path = "from-file.joblib""#)
            .unwrap()
            .with_model_env(Some("from-env.joblib".to_string()));
        assert_eq!(config.model_path, PathBuf::from("from-env.joblib"));

        let config = config.with_overrides(ConfigOverrides {
            model_path: Some(PathBuf::from("from-flag.joblib")),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.model_path, PathBuf::from("from-flag.joblib"));

        let unchanged = DashboardConfig::default().with_model_env(Some("  ".to_string()));
        assert_eq!(unchanged.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }
}
