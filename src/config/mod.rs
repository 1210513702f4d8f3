//! Client configuration.
//!
//! Loaded from `~/.salonpost/config.toml`, created with defaults on first
//! run. The backend base URL lives here and is injected into the remote
//! layer at construction time; environment overrides are applied once,
//! explicitly, never read ad hoc deeper in the stack.

use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Base URL of the generation backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout for plain fetch/update calls, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Per-call timeout for generation calls, in seconds. Longer than the
    /// default because the backend work is heavier.
    #[serde(default = "default_generate_timeout_secs")]
    pub generate_timeout_secs: u64,

    /// When a generation call fails, offer locally synthesized placeholder
    /// content (always visibly marked) instead of only showing the error.
    /// Off by default.
    #[serde(default)]
    pub degraded_fallback: bool,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_generate_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            generate_timeout_secs: default_generate_timeout_secs(),
            degraded_fallback: false,
        }
    }
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let salonpost_dir = home.join(".salonpost");
        Self::load_or_init_at(&salonpost_dir.join("config.toml"))
    }

    /// Load from an explicit path, creating it with defaults when missing.
    pub fn load_or_init_at(config_path: &Path) -> Result<Self> {
        if let Some(dir) = config_path.parent()
            && !dir.exists()
        {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path.to_path_buf();
            Ok(config)
        } else {
            let config = Self {
                config_path: config_path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("SALONPOST_BASE_URL")
            && !base_url.is_empty()
        {
            self.base_url = base_url;
        }

        if let Ok(secs) = std::env::var("SALONPOST_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse::<u64>()
            && secs > 0
        {
            self.timeout_secs = secs;
        }

        if let Ok(secs) = std::env::var("SALONPOST_GENERATE_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse::<u64>()
            && secs > 0
        {
            self.generate_timeout_secs = secs;
        }

        if let Ok(flag) = std::env::var("SALONPOST_DEGRADED_FALLBACK") {
            self.degraded_fallback = matches!(flag.as_str(), "1" | "true" | "yes");
        }
    }

}

pub fn validate_base_url(value: &str) -> std::result::Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Validation("base URL must not be empty".into()));
    }
    let parsed = Url::parse(trimmed)
        .map_err(|e| ConfigError::Validation(format!("invalid base URL: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base URL must be http or https, got {}",
            parsed.scheme()
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.generate_timeout_secs, 60);
        assert!(!config.degraded_fallback);
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::load_or_init_at(&path).unwrap();
        config.base_url = "https://api.example.com".into();
        config.degraded_fallback = true;
        config.save().unwrap();

        let loaded = Config::load_or_init_at(&path).unwrap();
        assert_eq!(loaded.base_url, "https://api.example.com");
        assert!(loaded.degraded_fallback);
        assert_eq!(loaded.timeout_secs, 30);
    }

    #[test]
    fn creates_file_with_defaults_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config::load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn validates_base_url_scheme() {
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn normalizes_trailing_slash() {
        assert_eq!(
            validate_base_url("https://api.example.com/").unwrap(),
            "https://api.example.com"
        );
    }
}
