//! Application-level configuration loading: phase durations, match-log
//! location and the building rosters.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::info;

use crate::state::EngineSettings;

/// Default location on disk where the engine looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "FIRELINE_CONFIG_PATH";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Engine construction parameters.
    pub engine: EngineSettings,
}

impl AppConfig {
    /// Load the application configuration from disk.
    ///
    /// A missing file yields the built-in defaults; a file that exists but
    /// cannot be read or parsed is fatal, since a match must never run with
    /// half-applied durations or rosters.
    pub fn load() -> anyhow::Result<Self> {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let raw: RawConfig = serde_json::from_str(&contents)
                    .with_context(|| format!("invalid config file {}", path.display()))?;
                let config: Self = raw.into();
                info!(path = %path.display(), "loaded configuration");
                Ok(config)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Ok(Self::default())
            }
            Err(err) => {
                Err(err).with_context(|| format!("failed to read config file {}", path.display()))
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at
/// [`DEFAULT_CONFIG_PATH`]. Every field is optional; absent fields keep
/// their defaults.
struct RawConfig {
    phase_1_duration: Option<u64>,
    phase_2_duration: Option<u64>,
    phase_3_duration: Option<u64>,
    match_log_dir: Option<PathBuf>,
    ball_buildings: Option<Vec<String>>,
    laser_buildings: Option<Vec<String>>,
    heater_buildings: Option<Vec<String>>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = EngineSettings::default();
        Self {
            engine: EngineSettings {
                phase_one_secs: value.phase_1_duration.unwrap_or(defaults.phase_one_secs),
                phase_two_secs: value.phase_2_duration.unwrap_or(defaults.phase_two_secs),
                phase_three_secs: value.phase_3_duration.unwrap_or(defaults.phase_three_secs),
                match_log_dir: value.match_log_dir.unwrap_or(defaults.match_log_dir),
                ball_buildings: value.ball_buildings.unwrap_or(defaults.ball_buildings),
                laser_buildings: value.laser_buildings.unwrap_or(defaults.laser_buildings),
                heater_buildings: value.heater_buildings.unwrap_or(defaults.heater_buildings),
            },
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_keeps_every_default() {
        let raw: RawConfig = serde_json::from_str("{}").unwrap();
        let config: AppConfig = raw.into();
        let defaults = EngineSettings::default();

        assert_eq!(config.engine.phase_one_secs, defaults.phase_one_secs);
        assert_eq!(config.engine.phase_three_secs, defaults.phase_three_secs);
        assert_eq!(config.engine.match_log_dir, defaults.match_log_dir);
        assert_eq!(config.engine.ball_buildings, defaults.ball_buildings);
    }

    #[test]
    fn present_fields_override_their_defaults_only() {
        let raw: RawConfig = serde_json::from_str(
            r#"{
                "phase_3_duration": 180,
                "match_log_dir": "/var/log/fireline",
                "heater_buildings": ["10", "11"]
            }"#,
        )
        .unwrap();
        let config: AppConfig = raw.into();

        assert_eq!(config.engine.phase_three_secs, 180);
        assert_eq!(config.engine.match_log_dir, PathBuf::from("/var/log/fireline"));
        assert_eq!(config.engine.heater_buildings, vec!["10", "11"]);
        assert_eq!(config.engine.phase_one_secs, 10);
        assert_eq!(config.engine.laser_buildings, vec!["1", "4", "3"]);
    }

    #[test]
    fn malformed_durations_are_rejected() {
        assert!(serde_json::from_str::<RawConfig>(r#"{"phase_1_duration": "soon"}"#).is_err());
        assert!(serde_json::from_str::<RawConfig>(r#"{"ball_buildings": 7}"#).is_err());
    }
}
