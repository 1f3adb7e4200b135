use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Pod assumed for reconstructed paths when nothing better is known.
pub const DEFAULT_FALLBACK_POD: &str = "pod-1";
pub const DEFAULT_EPG_PREFIX: &str = "epg-";

/// Tunables for path reconstruction and CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_fallback_pod")]
    pub fallback_pod: String,
    #[serde(default = "default_epg_prefix")]
    pub epg_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fallback_pod: default_fallback_pod(),
            epg_prefix: default_epg_prefix(),
        }
    }
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid settings in {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Load settings from a TOML file; missing keys take built-in defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_settings(&raw, path.display().to_string())
}

/// Settings shipped with the binary.
pub fn default_settings() -> Settings {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/settings.toml"));
    embedded_or_builtin(embedded)
}

fn embedded_or_builtin(raw: &str) -> Settings {
    match parse_settings(raw, "embedded settings".to_string()) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(error = %err, "embedded settings unusable, using built-in defaults");
            Settings::default()
        }
    }
}

fn parse_settings(raw: &str, path: String) -> Result<Settings, SettingsError> {
    let settings: Settings = toml::from_str(raw).map_err(|source| SettingsError::Parse {
        path: path.clone(),
        source,
    })?;
    if !is_pod_name(&settings.fallback_pod) {
        return Err(SettingsError::Invalid {
            path,
            message: format!(
                "fallback_pod '{}' must look like pod-<N>",
                settings.fallback_pod
            ),
        });
    }
    if settings.epg_prefix.trim().is_empty() {
        return Err(SettingsError::Invalid {
            path,
            message: "epg_prefix must not be empty".to_string(),
        });
    }
    Ok(settings)
}

fn is_pod_name(value: &str) -> bool {
    value
        .strip_prefix("pod-")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

fn default_fallback_pod() -> String {
    DEFAULT_FALLBACK_POD.to_string()
}

fn default_epg_prefix() -> String {
    DEFAULT_EPG_PREFIX.to_string()
}
