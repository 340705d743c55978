//! Forge endpoint, credential and timeout configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables (after loading `.env` with `dotenvy`). The result
//! is passed explicitly to the adapters; nothing reads the environment at
//! request time.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the GitHub token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "REPOVIZ_API_BASE";
/// Environment variable overriding the per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "REPOVIZ_TIMEOUT_SECS";

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file was not valid YAML for [`ForgeConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: String,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// An environment override had an unusable value.
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// The configuration is structurally invalid.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for talking to the forge's tree API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_base_url: String,
    /// Optional bearer token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// `User-Agent` header value; GitHub rejects requests without one.
    pub user_agent: String,
    /// Upper bound on a single branch attempt.
    pub request_timeout_secs: u64,
    /// Default-branch candidates, tried in order.
    pub candidate_branches: Vec<String>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            token: None,
            user_agent: concat!("repoviz/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            candidate_branches: vec!["main".to_string(), "master".to_string()],
        }
    }
}

impl ForgeConfig {
    /// Loads defaults, the optional YAML file, then environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an override is
    /// malformed, or the merged result fails validation.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();

        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a YAML config file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        serde_yaml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if the timeout override is not a number.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.token = Some(token.trim().to_string());
        }
        if let Some(base) = lookup(API_BASE_ENV).filter(|b| !b.trim().is_empty()) {
            self.api_base_url = base.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|r| !r.trim().is_empty()) {
            self.request_timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { name: TIMEOUT_ENV, value: raw.clone() })?;
        }
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
        Ok(())
    }

    /// Checks structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.candidate_branches.is_empty() {
            return Err(ConfigError::Invalid("candidate_branches must not be empty".into()));
        }
        if self.candidate_branches.iter().any(|b| b.trim().is_empty()) {
            return Err(ConfigError::Invalid("candidate branch names must not be blank".into()));
        }
        if self.candidate_branches.iter().any(|b| b == "." || b == "..") {
            return Err(ConfigError::Invalid("candidate branch names must not be . or ..".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be positive".into()));
        }
        if self.api_base_url.is_empty() {
            return Err(ConfigError::Invalid("api_base_url must not be empty".into()));
        }
        Ok(())
    }

    /// The per-attempt timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_try_main_then_master() {
        let config = ForgeConfig::default();
        assert_eq!(config.candidate_branches, vec!["main", "master"]);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_token_base_and_timeout() {
        let mut config = ForgeConfig::default();
        config
            .apply_env(env(&[
                (TOKEN_ENV, " ghp_abc "),
                (API_BASE_ENV, "http://localhost:9000/"),
                (TIMEOUT_ENV, "3"),
            ]))
            .unwrap();
        assert_eq!(config.token.as_deref(), Some("ghp_abc"));
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    fn blank_token_is_ignored() {
        let mut config = ForgeConfig::default();
        config.apply_env(env(&[(TOKEN_ENV, "   ")])).unwrap();
        assert!(config.token.is_none());
    }

    #[test]
    fn blank_overrides_keep_defaults() {
        let mut config = ForgeConfig::default();
        config
            .apply_env(env(&[(API_BASE_ENV, ""), (TIMEOUT_ENV, " ")]))
            .unwrap();
        assert_eq!(config, ForgeConfig::default());
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let mut config = ForgeConfig::default();
        let err = config.apply_env(env(&[(TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_ENV));
    }

    #[test]
    fn validation_rejects_empty_candidates_and_zero_timeout() {
        let config = ForgeConfig { candidate_branches: vec![], ..ForgeConfig::default() };
        assert!(config.validate().is_err());

        let config =
            ForgeConfig { candidate_branches: vec![" ".into()], ..ForgeConfig::default() };
        assert!(config.validate().is_err());

        let config =
            ForgeConfig { candidate_branches: vec!["..".into()], ..ForgeConfig::default() };
        assert!(config.validate().is_err());

        let config = ForgeConfig { request_timeout_secs: 0, ..ForgeConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_file_overrides_defaults_partially() {
        let dir = std::env::temp_dir().join("repoviz_config_test_yaml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("repoviz.yaml");
        std::fs::write(&path, "candidate_branches: [trunk, main]\nrequest_timeout_secs: 5\n")
            .unwrap();

        let config = ForgeConfig::from_file(&path).unwrap();
        assert_eq!(config.candidate_branches, vec!["trunk", "main"]);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.api_base_url, "https://api.github.com");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ForgeConfig::from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
