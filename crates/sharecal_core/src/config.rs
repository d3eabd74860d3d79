//! Process-level configuration.
//!
//! # Responsibility
//! - Collect logging, data-layer latency and theme settings in one value.
//! - Read overrides from `SHARECAL_*` environment variables.
//!
//! # Invariants
//! - Loading never fails; malformed values fall back to defaults and are
//!   reported with a warning.

use crate::logging::{default_log_level, LogLevel};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const LOG_LEVEL_VAR: &str = "SHARECAL_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "SHARECAL_LOG_DIR";
pub const API_LATENCY_VAR: &str = "SHARECAL_API_LATENCY_MS";
pub const THEME_VAR: &str = "SHARECAL_THEME";

const DEFAULT_API_LATENCY_MS: u64 = 1000;

/// Light/dark presentation preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: LogLevel,
    /// `None` leaves file logging off.
    pub log_dir: Option<PathBuf>,
    /// Artificial delay applied by the simulated data layer.
    pub api_latency: Duration,
    pub theme: ThemePreference,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            api_latency: Duration::from_millis(DEFAULT_API_LATENCY_MS),
            theme: ThemePreference::default(),
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by `SHARECAL_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOG_LEVEL_VAR) {
            match LogLevel::parse(&raw) {
                Ok(level) => config.log_level = level,
                Err(err) => warn!(
                    "event=config_load module=config status=fallback var={LOG_LEVEL_VAR} reason={err}"
                ),
            }
        }

        if let Some(raw) = lookup(LOG_DIR_VAR) {
            let path = PathBuf::from(raw.trim());
            if path.is_absolute() {
                config.log_dir = Some(path);
            } else {
                warn!(
                    "event=config_load module=config status=fallback var={LOG_DIR_VAR} reason=not_absolute"
                );
            }
        }

        if let Some(raw) = lookup(API_LATENCY_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.api_latency = Duration::from_millis(ms),
                Err(_) => warn!(
                    "event=config_load module=config status=fallback var={API_LATENCY_VAR} reason=not_a_number"
                ),
            }
        }

        if let Some(raw) = lookup(THEME_VAR) {
            match ThemePreference::parse(&raw) {
                Some(theme) => config.theme = theme,
                None => warn!(
                    "event=config_load module=config status=fallback var={THEME_VAR} reason=unknown_theme"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, ThemePreference, API_LATENCY_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR, THEME_VAR};
    use crate::logging::LogLevel;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = CoreConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.api_latency, Duration::from_millis(1000));
        assert_eq!(config.theme, ThemePreference::Dark);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let dir = std::env::temp_dir().join("sharecal-logs");
        let dir_text = dir.to_string_lossy().into_owned();
        let config = CoreConfig::from_lookup(lookup(&[
            (LOG_LEVEL_VAR, "warn"),
            (LOG_DIR_VAR, dir_text.as_str()),
            (API_LATENCY_VAR, "0"),
            (THEME_VAR, "Light"),
        ]));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.log_dir, Some(dir));
        assert_eq!(config.api_latency, Duration::ZERO);
        assert_eq!(config.theme, ThemePreference::Light);
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = CoreConfig::from_lookup(lookup(&[
            (LOG_LEVEL_VAR, "loud"),
            (LOG_DIR_VAR, "relative/logs"),
            (API_LATENCY_VAR, "soon"),
            (THEME_VAR, "sepia"),
        ]));
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(ThemePreference::Dark.toggle(), ThemePreference::Light);
        assert!(ThemePreference::Light.toggle().is_dark());
    }
}
