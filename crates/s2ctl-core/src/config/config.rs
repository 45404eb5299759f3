//! Configuration file and context management
//!
//! A context binds a name to one project API key. Exactly one context can
//! be current; commands without `--apikey` use its key.

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Explicit API endpoint, overriding the partner code of the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,
    #[serde(default)]
    pub contexts: Vec<ContextEntry>,
}

/// A named API key as stored in the config file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub name: String,
    /// Plaintext key or a `keyring:` reference
    pub api_key: String,
}

/// One line of `context list`
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ContextSummary {
    pub name: String,
    pub current: bool,
}

impl Config {
    pub fn find_context(&self, name: &str) -> Option<&ContextEntry> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Name of the current context, if one is selected
    pub fn current_context_name(&self) -> Option<&str> {
        self.current_context.as_deref().filter(|name| !name.is_empty())
    }

    /// Add a context, storing its key through `store`
    ///
    /// The first context added becomes the current one.
    pub fn add_context(&mut self, name: &str, api_key: &str, store: &CredentialStore) -> Result<()> {
        if self.find_context(name).is_some() {
            return Err(ConfigError::ContextExists {
                name: name.to_string(),
            });
        }

        let stored = store.store_credential(name, api_key)?;
        self.contexts.push(ContextEntry {
            name: name.to_string(),
            api_key: stored,
        });
        if self.contexts.len() == 1 {
            self.current_context = Some(name.to_string());
        }
        Ok(())
    }

    pub fn select_context(&mut self, name: &str) -> Result<()> {
        if self.find_context(name).is_none() {
            return Err(ConfigError::ContextNotFound {
                name: name.to_string(),
            });
        }
        self.current_context = Some(name.to_string());
        Ok(())
    }

    /// Remove a context; removing the current one leaves no context selected
    pub fn remove_context(&mut self, name: &str) -> Result<ContextEntry> {
        let position = self
            .contexts
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| ConfigError::ContextNotFound {
                name: name.to_string(),
            })?;

        if self.current_context_name() == Some(name) {
            self.current_context = None;
        }
        Ok(self.contexts.remove(position))
    }

    /// Contexts in insertion order, flagged with which one is current
    pub fn list_contexts(&self) -> Vec<ContextSummary> {
        let current = self.current_context_name();
        self.contexts
            .iter()
            .map(|c| ContextSummary {
                name: c.name.clone(),
                current: current == Some(c.name.as_str()),
            })
            .collect()
    }

    /// Resolve the API key of the current context
    pub fn current_api_key(&self) -> Result<String> {
        let name = self
            .current_context_name()
            .ok_or(ConfigError::MissingApiKey)?;
        let entry = self
            .find_context(name)
            .ok_or_else(|| ConfigError::ContextNotFound {
                name: name.to_string(),
            })?;

        let key = CredentialStore::default()
            .get_credential(&entry.api_key)
            .map_err(|e| {
                ConfigError::CredentialError(format!(
                    "Failed to resolve API key of context '{}': {}",
                    name, e
                ))
            })?;
        if key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(key)
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path; a missing file is an empty config
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        let expanded_content = Self::expand_env_vars(&content);
        let config: Config = toml::from_str(&expanded_content)?;

        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Get the path to the configuration file
    ///
    /// On macOS a Linux-style `~/.config/s2ctl/config.toml` is preferred when
    /// its directory exists.
    ///
    /// On Linux: ~/.config/s2ctl/config.toml
    /// On Windows: %APPDATA%\serverspace\s2ctl\config\config.toml
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_path = base_dirs
                    .home_dir()
                    .join(".config")
                    .join("s2ctl")
                    .join("config.toml");

                if linux_style_path
                    .parent()
                    .map(|p| p.exists())
                    .unwrap_or(false)
                {
                    return Ok(linux_style_path);
                }
            }
        }

        let proj_dirs = ProjectDirs::from("com", "serverspace", "s2ctl")
            .ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}` references
    ///
    /// Unset variables are left untouched.
    fn expand_env_vars(content: &str) -> String {
        let expanded =
            shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok());
        expanded.to_string()
    }
}
