//! Configuration and context management for s2ctl
//!
//! - Named contexts, each bound to one project API key
//! - Optional OS keyring storage for keys
//! - Environment variable expansion in the config file
//! - Platform-specific config file location

// The inner `config` module mirrors the subsystem name
#![allow(clippy::module_inception)]

pub mod config;
pub mod credential;
pub mod error;

pub use config::{Config, ContextEntry, ContextSummary};
pub use credential::{CredentialStorage, CredentialStore};
pub use error::{ConfigError, Result};
