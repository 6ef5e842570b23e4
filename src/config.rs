//! Application-level configuration loading: mount path and series grouping policy.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::schedule::SeriesPolicy;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "CLUBHOUSE_BACK_CONFIG_PATH";
/// Environment variable that overrides the configured base path.
const BASE_PATH_ENV: &str = "BASE_PATH";
/// Path prefix under which every route is mounted when nothing else is configured.
const DEFAULT_BASE_PATH: &str = "/widgets/clubhouse";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    base_path: String,
    series_policy: SeriesPolicy,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        base_path = %app_config.base_path,
                        series_policy = ?app_config.series_policy,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        match env::var(BASE_PATH_ENV) {
            Ok(base_path) => config.with_base_path(&base_path),
            Err(_) => config,
        }
    }

    /// Replace the mount path; `""` and `"/"` mount the routes at the root.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = normalize_base_path(base_path);
        self
    }

    pub fn with_series_policy(mut self, policy: SeriesPolicy) -> Self {
        self.series_policy = policy;
        self
    }

    /// Mount path without trailing slash, empty when routes live at the root.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn series_policy(&self) -> SeriesPolicy {
        self.series_policy
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_owned(),
            series_policy: SeriesPolicy::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    base_path: Option<String>,
    #[serde(default)]
    series: RawSeriesConfig,
}

#[derive(Debug, Default, Deserialize)]
/// `series` section of the configuration file.
struct RawSeriesConfig {
    /// When set, a pair's series is split once consecutive games are further apart.
    #[serde(default)]
    split_gap_days: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let base_path = value
            .base_path
            .as_deref()
            .map(normalize_base_path)
            .unwrap_or_else(|| DEFAULT_BASE_PATH.to_owned());
        let series_policy = match value.series.split_gap_days {
            Some(max_gap_days) => SeriesPolicy::SplitOnGap { max_gap_days },
            None => SeriesPolicy::MergeByPair,
        };
        Self {
            base_path,
            series_policy,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn normalize_base_path(value: &str) -> String {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path("/widgets/clubhouse/"), "/widgets/clubhouse");
        assert_eq!(normalize_base_path("api"), "/api");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path(""), "");
    }

    #[test]
    fn raw_config_selects_series_policy() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"series": {"split_gap_days": 3}}"#).unwrap();
        let config: AppConfig = raw.into();
        assert_eq!(
            config.series_policy(),
            SeriesPolicy::SplitOnGap { max_gap_days: 3 }
        );
        assert_eq!(config.base_path(), DEFAULT_BASE_PATH);

        let raw: RawConfig = serde_json::from_str(r#"{"base_path": "/"}"#).unwrap();
        let config: AppConfig = raw.into();
        assert_eq!(config.series_policy(), SeriesPolicy::MergeByPair);
        assert_eq!(config.base_path(), "");
    }
}
