//! Connection management for the Serverspace API client

use std::path::PathBuf;

use s2ctl_core::config::Config;
use s2ctl_core::host::resolve_host;
use ssclient::SsClient;
use tracing::{debug, info, trace};

use crate::error::Result as CliResult;

/// User agent string for s2ctl HTTP requests
const S2CTL_USER_AGENT: &str = concat!("s2ctl/", env!("CARGO_PKG_VERSION"));

/// Owns the loaded configuration and builds authenticated clients from it
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    api_key: Option<String>,
    host: Option<String>,
}

impl ConnectionManager {
    /// Create a new connection manager with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: None,
            api_key: None,
            host: None,
        }
    }

    /// Path from `--config`; saves go there instead of the platform default
    pub fn with_config_path(mut self, config_path: Option<PathBuf>) -> Self {
        self.config_path = config_path;
        self
    }

    /// Key from `--apikey` / `S2CTL_APIKEY`, used instead of the current context
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    /// Host from `--host` / `S2CTL_HOST`, used before the config file's `host`
    pub fn with_host(mut self, host: Option<String>) -> Self {
        self.host = host.filter(|h| !h.trim().is_empty());
        self
    }

    /// Save the configuration to the appropriate location
    pub fn save_config(&self) -> CliResult<()> {
        if let Some(ref path) = self.config_path {
            self.config.save_to_path(path)?;
        } else {
            self.config.save()?;
        }
        Ok(())
    }

    /// API key for this invocation: the explicit one, else the current context's
    pub fn resolve_api_key(&self) -> CliResult<String> {
        if let Some(key) = &self.api_key {
            debug!("Using API key from --apikey");
            return Ok(key.clone());
        }
        let name = self.config.current_context_name().unwrap_or_default();
        info!("Using API key of context '{}'", name);
        Ok(self.config.current_api_key()?)
    }

    /// Build a client for the resolved key and host
    pub fn create_client(&self) -> CliResult<SsClient> {
        debug!("Creating Serverspace client");
        let api_key = self.resolve_api_key()?;
        let explicit_host = self.host.as_deref().or(self.config.host.as_deref());
        let host = resolve_host(explicit_host, &api_key)?;

        info!("Connecting to Serverspace API: {}", host);
        trace!("API key: {}...", api_key.chars().take(4).collect::<String>());

        let client = SsClient::builder()
            .base_url(host)
            .api_key(api_key)
            .user_agent(S2CTL_USER_AGENT)
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use s2ctl_core::config::CredentialStore;

    fn with_context(key: &str) -> Config {
        let mut config = Config::default();
        config
            .add_context("work", key, &CredentialStore::default())
            .unwrap();
        config
    }

    #[test]
    fn test_explicit_key_wins_over_context() {
        let conn = ConnectionManager::new(with_context("04context"))
            .with_api_key(Some("06explicit".to_string()));
        assert_eq!(conn.resolve_api_key().unwrap(), "06explicit");
    }

    #[test]
    fn test_empty_explicit_key_falls_back_to_context() {
        let conn =
            ConnectionManager::new(with_context("04context")).with_api_key(Some(String::new()));
        assert_eq!(conn.resolve_api_key().unwrap(), "04context");
    }

    #[test]
    fn test_missing_key_is_a_usage_error() {
        let err = ConnectionManager::new(Config::default())
            .create_client()
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_host_from_partner_code() {
        let client = ConnectionManager::new(with_context("02ABCDEF"))
            .create_client()
            .unwrap();
        assert_eq!(client.base_url().host_str(), Some("api.serverspace.by"));
    }

    #[test]
    fn test_flag_host_beats_config_host() {
        let mut config = with_context("ffunknown");
        config.host = Some("https://config.example".to_string());

        let from_config = ConnectionManager::new(config.clone()).create_client().unwrap();
        assert_eq!(from_config.base_url().host_str(), Some("config.example"));

        let from_flag = ConnectionManager::new(config)
            .with_host(Some("https://flag.example".to_string()))
            .create_client()
            .unwrap();
        assert_eq!(from_flag.base_url().host_str(), Some("flag.example"));
    }

    #[test]
    fn test_save_goes_to_the_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        ConnectionManager::new(with_context("04context"))
            .with_config_path(Some(path.clone()))
            .save_config()
            .unwrap();

        let saved = Config::load_from_path(&path).unwrap();
        assert_eq!(saved.current_context_name(), Some("work"));
    }

    #[test]
    fn test_unknown_partner_code_without_host_fails() {
        let err = ConnectionManager::new(with_context("ffunknown"))
            .create_client()
            .unwrap_err();
        assert!(err.to_string().contains("ff"));
        assert_eq!(err.exit_code(), 2);
    }
}
