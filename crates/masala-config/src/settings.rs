// SPDX-FileCopyrightText: 2026 Masala Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Masala settings, loaded with Figment from layered sources.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `/etc/masala/masala.toml` (system-wide)
//! 3. `~/.config/masala/masala.toml` (user config dir)
//! 4. `./masala.toml` (local directory)
//! 5. `MASALA_*` environment variables
//!
//! Unknown keys are rejected at every level.

use std::path::Path;
use std::sync::Arc;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use masala_core::{MasalaError, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::configuration::ConfigurationManager;

/// Key under which the loaded settings are published through the
/// [`ConfigurationManager`].
pub const SETTINGS_KEY: &str = "masala::base::MasalaSettings";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level Masala settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MasalaSettings {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub tracers: TracerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,
}

impl Default for MasalaSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            tracers: TracerSettings::default(),
            database: DatabaseSettings::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which tracers write output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TracerSettings {
    /// State of every tracer not listed below.
    #[serde(default = "default_tracers_enabled")]
    pub default_enabled: bool,

    #[serde(default)]
    pub disabled: Vec<String>,

    #[serde(default)]
    pub enabled: Vec<String>,
}

impl Default for TracerSettings {
    fn default() -> Self {
        Self {
            default_enabled: default_tracers_enabled(),
            disabled: Vec::new(),
            enabled: Vec::new(),
        }
    }
}

fn default_tracers_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSettings {
    /// Database directory. Falls back to `MASALA_DATABASE_PATH` when unset.
    #[serde(default)]
    pub path: Option<String>,
}

/// Why settings could not be produced.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not load settings: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid settings: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl From<figment::Error> for SettingsError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Load settings from the standard hierarchy with environment overrides.
pub fn load_settings() -> std::result::Result<MasalaSettings, SettingsError> {
    let settings = build_figment().extract()?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Load settings from a TOML string only.
pub fn load_settings_from_str(
    toml_content: &str,
) -> std::result::Result<MasalaSettings, SettingsError> {
    let settings = Figment::new()
        .merge(Serialized::defaults(MasalaSettings::default()))
        .merge(Toml::string(toml_content))
        .extract()?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Load settings from one file with environment overrides.
pub fn load_settings_from_path(path: &Path) -> std::result::Result<MasalaSettings, SettingsError> {
    let settings = Figment::new()
        .merge(Serialized::defaults(MasalaSettings::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// The Figment behind [`load_settings`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MasalaSettings::default()))
        .merge(Toml::file("/etc/masala/masala.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("masala/masala.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("masala.toml"))
        .merge(env_provider())
}

/// `MASALA_*` variables for known keys only. Section names are mapped
/// explicitly because keys themselves contain underscores.
fn env_provider() -> Env {
    Env::prefixed("MASALA_")
        .filter(|key| {
            matches!(
                key.as_str().to_ascii_lowercase().as_str(),
                "log_level"
                    | "tracers_default_enabled"
                    | "tracers_disabled"
                    | "tracers_enabled"
                    | "database_path"
            )
        })
        .map(|key| {
            key.as_str()
                .to_ascii_lowercase()
                .replacen("tracers_", "tracers.", 1)
                .replacen("database_", "database.", 1)
                .into()
        })
}

/// Check what serde cannot: the log level is a known level and listed
/// tracer names are non-empty and not both enabled and disabled.
///
/// Collects every problem rather than stopping at the first.
pub fn validate_settings(settings: &MasalaSettings) -> std::result::Result<(), SettingsError> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&settings.log_level.to_ascii_lowercase().as_str()) {
        errors.push(format!(
            "log_level `{}` is not one of {}",
            settings.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    for name in settings.tracers.enabled.iter().chain(&settings.tracers.disabled) {
        if name.trim().is_empty() {
            errors.push("tracer names must not be empty".to_string());
            break;
        }
    }

    for name in &settings.tracers.enabled {
        if settings.tracers.disabled.contains(name) {
            errors.push(format!("tracer `{name}` is both enabled and disabled"));
        }
    }

    if let Some(path) = &settings.database.path
        && path.trim().is_empty()
    {
        errors.push("database.path must not be empty when set".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SettingsError::Invalid(errors))
    }
}

/// The process settings, loaded on first use and shared afterwards.
pub fn masala_settings() -> Result<Arc<MasalaSettings>> {
    ConfigurationManager::get_instance().get_typed_configuration(SETTINGS_KEY, |_token| {
        load_settings().map_err(|err| {
            MasalaError::config(
                "masala::base::MasalaSettings",
                "load_settings",
                err.to_string(),
                Some(Box::new(err)),
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = MasalaSettings::default();
        assert_eq!(settings.log_level, "info");
        assert!(settings.tracers.default_enabled);
        assert!(settings.database.path.is_none());
        validate_settings(&settings).unwrap();
    }

    #[test]
    fn collects_every_validation_error() {
        let settings = MasalaSettings {
            log_level: "verbose".into(),
            tracers: TracerSettings {
                default_enabled: false,
                disabled: vec!["a".into()],
                enabled: vec!["a".into(), " ".into()],
            },
            database: DatabaseSettings {
                path: Some(String::new()),
            },
        };
        let Err(SettingsError::Invalid(errors)) = validate_settings(&settings) else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("verbose"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let settings = MasalaSettings {
            log_level: "DEBUG".into(),
            ..MasalaSettings::default()
        };
        validate_settings(&settings).unwrap();
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let settings: MasalaSettings = toml::from_str(
            r#"
[tracers]
disabled = ["masala::disk_manager"]
"#,
        )
        .unwrap();
        assert_eq!(settings.log_level, "info");
        assert!(settings.tracers.default_enabled);
        assert!(settings.tracers.enabled.is_empty());
        validate_settings(&settings).unwrap();
    }

    #[test]
    fn unknown_tracer_key_is_rejected_by_serde() {
        let result = toml::from_str::<MasalaSettings>("[tracers]\nenable = [\"a\"]\n");
        assert!(result.is_err());
    }
}
