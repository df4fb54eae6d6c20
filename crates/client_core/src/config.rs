use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CONFIG_FILE: &str = "temu-search.toml";
pub const CONFIG_PATH_ENV: &str = "TEMU_SEARCH_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: 15,
            user_agent: concat!("temu-search/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn with_api_base_url(mut self, api_base_url: &str) -> Self {
        self.api_base_url = normalize_api_base_url(api_base_url);
        self
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

/// Defaults, then the settings file, then environment overrides.
///
/// A missing default settings file is not an error; a file named through
/// `TEMU_SEARCH_CONFIG` must exist.
pub fn load_settings() -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            apply_file(&mut settings, Path::new(path.trim()))?;
        }
        _ => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                apply_file(&mut settings, path)?;
            }
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings.api_base_url = normalize_api_base_url(&settings.api_base_url);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, path: &Path) -> Result<(), SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file_cfg = parse_file_settings(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded search settings file");

    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.user_agent {
        settings.user_agent = v;
    }
    Ok(())
}

fn parse_file_settings(raw: &str) -> Result<FileSettings, toml::de::Error> {
    toml::from_str(raw)
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SEARCH_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    if let Some(v) = lookup("APP__USER_AGENT") {
        settings.user_agent = v;
    }
}

pub fn normalize_api_base_url(raw: &str) -> String {
    let raw = raw.trim();

    if raw.is_empty() {
        return Settings::default().api_base_url;
    }

    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };

    with_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
