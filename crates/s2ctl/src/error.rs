//! Error types for s2ctl
//!
//! Every layer below hands its typed error up unchanged; this module decides
//! how each one is worded for the user and which exit code it maps to.

use std::time::Duration;

use colored::Colorize;
use s2ctl_core::CoreError;
use s2ctl_core::config::ConfigError;
use ssclient::{ApiError, ValidationError};
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: Can't log in. Check your API key.
///
///   tip: check which context is selected:
///       s2ctl context show
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<(String, Vec<String>)>,
}

impl CliDiagnostic {
    /// Start a new error diagnostic with the given message.
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    /// Add a detail line below the error message.
    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    /// Add a tip with optional example commands.
    pub fn tip(mut self, description: &str, commands: &[&str]) -> Self {
        self.tips.push((
            description.to_string(),
            commands.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for (description, commands) in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
            for cmd in commands {
                eprintln!("      {}", cmd);
            }
        }
    }
}

/// Main error type for the s2ctl application
#[derive(Error, Debug)]
pub enum S2ctlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Can't log in. Check your API key.")]
    AuthenticationFailed {
        #[source]
        source: ApiError,
    },

    #[error("object not found")]
    NotFound {
        #[source]
        source: ApiError,
    },

    #[error("{message}")]
    ApiError {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("task '{task_id}' failed")]
    TaskFailed { task_id: String },

    #[error("Timeout: task '{task_id}' did not finish within {}s", .elapsed.as_secs())]
    Timeout { task_id: String, elapsed: Duration },

    #[error("task '{task_id}' completed without a {field}")]
    MissingTaskResult { task_id: String, field: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("File error for '{path}': {message}")]
    FileError { path: String, message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

/// Result type for s2ctl operations
pub type Result<T> = std::result::Result<T, S2ctlError>;

impl S2ctlError {
    /// Process exit code: 2 for configuration and usage failures, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        match self {
            S2ctlError::Config(_) | S2ctlError::Validation(_) | S2ctlError::InvalidInput { .. } => {
                2
            }
            _ => 1,
        }
    }

    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<(String, Vec<&'static str>)> {
        match self {
            S2ctlError::Config(ConfigError::MissingApiKey) => vec![
                (
                    "pass a key for this command only:".to_string(),
                    vec!["s2ctl --apikey <KEY> server list"],
                ),
                (
                    "or create and select a context:".to_string(),
                    vec![
                        "s2ctl context create --name <NAME> --key <KEY>",
                        "s2ctl context select <NAME>",
                    ],
                ),
            ],
            S2ctlError::Config(ConfigError::ContextNotFound { .. }) => vec![(
                "list the contexts you have:".to_string(),
                vec!["s2ctl context list"],
            )],
            S2ctlError::Config(ConfigError::UnknownPartnerCode { .. }) => vec![(
                "set the API endpoint explicitly:".to_string(),
                vec!["s2ctl --host https://api.serverspace.io <COMMAND>"],
            )],
            S2ctlError::AuthenticationFailed { .. } => vec![(
                "check which context is selected:".to_string(),
                vec!["s2ctl context show"],
            )],
            S2ctlError::NotFound { .. } => vec![(
                "verify the identifier; list commands show what exists".to_string(),
                vec![],
            )],
            S2ctlError::ConnectionError { .. } => vec![(
                "check network connectivity and the API host (--host / S2CTL_HOST)".to_string(),
                vec![],
            )],
            S2ctlError::Timeout { task_id, .. } => vec![(
                format!("the task may still finish; check it later with 's2ctl task get {task_id}'"),
                vec![],
            )],
            S2ctlError::Validation(err) => vec![(
                format!(
                    "{} records take: {}",
                    err.record_type,
                    err.record_type.required_fields().join(", ")
                ),
                vec![],
            )],
            _ => vec![],
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&self.to_string());

        if let S2ctlError::ApiError { source, .. } = self
            && let Some(status) = source.status()
        {
            diag = diag.detail(&format!("HTTP status {status}"));
        }

        for (description, commands) in self.suggestions() {
            diag = diag.tip(&description, &commands);
        }

        diag.print();
    }
}

impl From<ApiError> for S2ctlError {
    fn from(err: ApiError) -> Self {
        if err.is_unauthorized() {
            return S2ctlError::AuthenticationFailed { source: err };
        }
        if err.is_not_found() {
            return S2ctlError::NotFound { source: err };
        }
        match err {
            ApiError::Validation(validation) => S2ctlError::Validation(validation),
            ApiError::Request(e) => S2ctlError::ConnectionError {
                message: e.to_string(),
            },
            ApiError::Response { status, message } => S2ctlError::ApiError {
                message: message.clone(),
                source: ApiError::Response { status, message },
            },
            other => S2ctlError::ApiError {
                message: other.to_string(),
                source: other,
            },
        }
    }
}

impl From<CoreError> for S2ctlError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(api_err) => S2ctlError::from(api_err),
            CoreError::TaskFailed { task_id } => S2ctlError::TaskFailed { task_id },
            CoreError::TaskTimeout { task_id, elapsed } => {
                S2ctlError::Timeout { task_id, elapsed }
            }
            CoreError::MissingTaskResult { task_id, field } => S2ctlError::MissingTaskResult {
                task_id,
                field: field.to_string(),
            },
            CoreError::Validation(validation) => S2ctlError::Validation(validation),
            CoreError::Config(config_err) => S2ctlError::Config(config_err),
        }
    }
}

impl From<serde_json::Error> for S2ctlError {
    fn from(err: serde_json::Error) -> Self {
        S2ctlError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<anyhow::Error> for S2ctlError {
    fn from(err: anyhow::Error) -> Self {
        S2ctlError::OutputError {
            message: format!("{:#}", err),
        }
    }
}
