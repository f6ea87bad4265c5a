//! Configuration loaded from pace.toml and environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{PaceError, Result};

/// Main configuration for the registration flow client.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub event: EventConfig,
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

/// Event-level settings rendered on the confirmation and status pages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EventConfig {
    pub name: String,
    pub account_holder: String,
    pub bank_name: String,
    pub iban: String,
    pub bic: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            name: "Lauf gegen Rechts".to_string(),
            account_holder: "FC St. Pauli Marathon".to_string(),
            bank_name: "Hamburger Volksbank".to_string(),
            iban: "DE09 2019 0003 0019 4004 20".to_string(),
            bic: "GENODEF1HH2".to_string(),
        }
    }
}

/// Backend endpoint settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Where the shadow copies live.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            dir: base.join("pace-registration"),
        }
    }
}

impl Config {
    /// Loads pace.toml (path overridable via `PACE_CONFIG`), then applies
    /// environment overrides. A missing file falls back to defaults; a file
    /// that exists but does not parse is a hard error.
    pub fn load() -> Result<Self> {
        let path = std::env::var("PACE_CONFIG").unwrap_or_else(|_| "pace.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(err) => {
                return Err(PaceError::Config {
                    message: format!("could not read {path}: {err}"),
                });
            }
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("PACE_API_URL")
            && !url.is_empty()
        {
            self.api.base_url = url;
        }
        if let Some(timeout) = std::env::var("PACE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.api.timeout_ms = timeout;
        }
        if let Ok(dir) = std::env::var("PACE_STORAGE_DIR")
            && !dir.is_empty()
        {
            self.storage.dir = PathBuf::from(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_event_bank_details() {
        let config = Config::default();
        assert_eq!(config.event.bank_name, "Hamburger Volksbank");
        assert_eq!(config.api.timeout_ms, 10_000);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"https://api.example.org\"\n")
            .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.org");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.event.account_holder, "FC St. Pauli Marathon");
    }
}
