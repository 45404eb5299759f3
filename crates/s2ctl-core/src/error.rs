//! Unified error handling for s2ctl-core
//!
//! Wraps API errors together with the failures that only exist once tasks
//! are polled and configuration is involved.
//!
//! # Example
//!
//! ```rust
//! use s2ctl_core::CoreError;
//! use ssclient::ApiError;
//!
//! let api_err = ApiError::Response { status: 404, message: "Server not found".to_string() };
//! let core_err: CoreError = api_err.into();
//! assert!(core_err.is_not_found());
//! ```

use std::time::Duration;

use ssclient::{ApiError, TaskResultField, ValidationError};
use thiserror::Error;

use crate::config::ConfigError;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Error from the Serverspace API
    #[error("API error: {0}")]
    Api(ApiError),

    /// The polled task reached the `Failed` state
    #[error("task '{task_id}' failed")]
    TaskFailed { task_id: String },

    /// The polled task did not finish before the deadline
    #[error("task '{task_id}' did not finish within {elapsed:?}")]
    TaskTimeout { task_id: String, elapsed: Duration },

    /// A completed task lacks the identifier of the resource it produced
    #[error("task '{task_id}' completed without a {field}")]
    MissingTaskResult {
        task_id: String,
        field: TaskResultField,
    },

    /// Record payload rejected before any request was sent
    #[error(transparent)]
    Validation(ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(validation) => CoreError::Validation(validation),
            other => CoreError::Api(other),
        }
    }
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::Validation(err)
    }
}

impl CoreError {
    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            CoreError::Api(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if the API rejected the key (401)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CoreError::Api(e) => e.is_unauthorized(),
            _ => false,
        }
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        match self {
            CoreError::Api(e) => e.is_server_error(),
            _ => false,
        }
    }

    /// Returns true if waiting for a task ran out of time
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CoreError::TaskTimeout { .. })
    }

    /// Returns true if the failure is the caller's input or setup rather than the service
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(self, CoreError::Validation(_) | CoreError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssclient::RecordType;

    #[test]
    fn test_core_error_from_api() {
        let api_err = ApiError::Response {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        let core_err: CoreError = api_err.into();

        assert!(core_err.is_unauthorized());
        assert!(!core_err.is_not_found());
        assert!(!core_err.is_usage_error());
    }

    #[test]
    fn test_api_validation_is_lifted() {
        let validation = ValidationError {
            record_type: RecordType::A,
            missing_fields: vec!["ip".to_string()],
            extra_fields: vec![],
        };
        let core_err: CoreError = ApiError::Validation(validation).into();

        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(core_err.is_usage_error());
    }

    #[test]
    fn test_task_errors_display() {
        let failed = CoreError::TaskFailed {
            task_id: "lt42".to_string(),
        };
        assert_eq!(failed.to_string(), "task 'lt42' failed");

        let timeout = CoreError::TaskTimeout {
            task_id: "lt42".to_string(),
            elapsed: Duration::from_secs(60),
        };
        assert!(timeout.is_timeout());
        assert!(timeout.to_string().contains("lt42"));

        let missing = CoreError::MissingTaskResult {
            task_id: "lt42".to_string(),
            field: TaskResultField::ServerId,
        };
        assert_eq!(
            missing.to_string(),
            "task 'lt42' completed without a server_id"
        );
    }
}
