//! Global hackdeck configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY,
    DEFAULT_SEARCH_DEBOUNCE, DEFAULT_STALE_AFTER,
};
use crate::error::{HackdeckError, HackdeckResult};

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_stale_after_secs() -> u64 {
    DEFAULT_STALE_AFTER.as_secs()
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE.as_millis() as u64
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY.as_millis() as u64
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

/// Configuration at ~/.config/hackdeck/config.toml
///
/// Every key can be overridden with a `HACKDECK_` environment variable,
/// e.g. `HACKDECK_API_BASE_URL`.
#[derive(Debug, Deserialize, Clone)]
pub struct HackdeckConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// How long fetched events are reused before refetching
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,

    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Extra attempts after a network error or 5xx response
    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Where session files live; the OS temp directory when unset
    pub session_dir: Option<PathBuf>,
}

impl Default for HackdeckConfig {
    fn default() -> Self {
        HackdeckConfig {
            api_base_url: default_api_base_url(),
            stale_after_secs: default_stale_after_secs(),
            search_debounce_ms: default_search_debounce_ms(),
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            session_dir: None,
        }
    }
}

impl HackdeckConfig {
    pub fn config_path() -> HackdeckResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HackdeckError::Config("Could not determine config directory".into()))?
            .join("hackdeck");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template there on
    /// first run.
    pub fn load() -> HackdeckResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) layered under the environment.
    pub fn load_from(path: &Path) -> HackdeckResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("HACKDECK"))
            .build()
            .map_err(|e| HackdeckError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HackdeckError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> HackdeckResult<()> {
        let contents = format!(
            "\
# hackdeck configuration

# Events API:
# api_base_url = \"{}\"

# Seconds before fetched events are considered stale:
# stale_after_secs = {}

# Quiet period before a search is applied in `hackdeck browse`:
# search_debounce_ms = {}

# Retries after network errors or server failures:
# retries = {}
# retry_delay_ms = {}
# request_timeout_secs = {}

# Where login sessions are kept (defaults to the system temp directory):
# session_dir = \"~/.cache/hackdeck\"
",
            DEFAULT_API_BASE_URL,
            default_stale_after_secs(),
            default_search_debounce_ms(),
            DEFAULT_RETRIES,
            default_retry_delay_ms(),
            default_request_timeout_secs(),
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HackdeckError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HackdeckError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Session directory with `~` expanded
    pub fn session_dir(&self) -> Option<PathBuf> {
        self.session_dir
            .as_ref()
            .map(|dir| PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = HackdeckConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.stale_after(), DEFAULT_STALE_AFTER);
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.session_dir(), None);
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hackdeck").join("config.toml");

        HackdeckConfig::create_default_config(&path).unwrap();
        let config = HackdeckConfig::load_from(&path).unwrap();

        assert_eq!(config.retries, DEFAULT_RETRIES);
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_base_url = \"http://localhost:9000\"\nstale_after_secs = 10\nsession_dir = \"/tmp/hd\"\n",
        )
        .unwrap();

        let config = HackdeckConfig::load_from(&path).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.stale_after(), Duration::from_secs(10));
        assert_eq!(config.session_dir(), Some(PathBuf::from("/tmp/hd")));
        assert_eq!(config.retries, DEFAULT_RETRIES);
    }
}
