//! # s2ctl-core
//!
//! The layer between the `ssclient` SDK and the `s2ctl` binary:
//!
//! - [`progress`]: the task poller, with injectable sleep and progress events
//! - [`workflows`]: create/update operations that optionally wait for their
//!   task and resolve the resource it produced
//! - [`config`]: the config file, named contexts and credential storage
//! - [`host`]: API endpoint selection from the key's partner code
//! - [`error`]: [`CoreError`], the error every operation above returns

pub mod config;
pub mod error;
pub mod host;
pub mod progress;
pub mod workflows;

pub use error::{CoreError, Result};
pub use progress::{
    DEFAULT_POLL_INTERVAL, DEFAULT_TASK_TIMEOUT, DOMAIN_CREATE_TIMEOUT, ProgressCallback,
    ProgressEvent, Sleeper, TaskPoller, TaskSource, TokioSleeper,
};
pub use workflows::{Resolved, Settled, Wait};
