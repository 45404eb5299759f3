//! Progress tracking and task polling for asynchronous operations
//!
//! Mutating API calls answer with a task id that must be polled until the
//! task reaches `Completed` or `Failed`. [`TaskPoller`] owns that loop: a
//! fixed interval between fetches and an overall deadline. The deadline is
//! checked before each pause and also enforced with `tokio::time::timeout`,
//! which drops any in-flight request when it fires.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use ssclient::{SsClient, Task, TaskStatus};
use tokio::time::Instant;
use tracing::debug;

use crate::error::{CoreError, Result};

/// Pause between two task fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Deadline for most operations
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(60);

/// Deadline for domain creation, which waits on DNS delegation checks
pub const DOMAIN_CREATE_TIMEOUT: Duration = Duration::from_secs(180);

/// Progress events emitted during async operations
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Polling is about to start
    Started { task_id: String },
    /// Polling iteration with current status
    Polling {
        task_id: String,
        status: String,
        elapsed: Duration,
    },
    /// Task completed successfully
    Completed { task_id: String },
    /// Task failed or timed out
    Failed { task_id: String, error: String },
}

/// Callback type for progress updates
///
/// The CLI uses this to drive its spinner.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Where tasks are fetched from
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn fetch_task(&self, task_id: &str) -> ssclient::Result<Task>;
}

#[async_trait]
impl TaskSource for SsClient {
    async fn fetch_task(&self, task_id: &str) -> ssclient::Result<Task> {
        self.tasks().get(task_id).await
    }
}

/// Pause between polls, and the clock the deadline is measured on
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Polls a task until it reaches a terminal state
///
/// # Example
///
/// ```rust,ignore
/// use s2ctl_core::progress::{ProgressEvent, TaskPoller};
/// use std::time::Duration;
///
/// let poller = TaskPoller::new()
///     .with_timeout(Duration::from_secs(120))
///     .on_progress(Box::new(|event| {
///         if let ProgressEvent::Polling { status, elapsed, .. } = event {
///             println!("{} ({:.0}s)", status, elapsed.as_secs());
///         }
///     }));
///
/// let task = poller.wait(&client, "lt17499").await?;
/// ```
pub struct TaskPoller {
    interval: Duration,
    timeout: Option<Duration>,
    sleeper: Box<dyn Sleeper>,
    on_progress: Option<ProgressCallback>,
}

impl Default for TaskPoller {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskPoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskPoller")
            .field("interval", &self.interval)
            .field("timeout", &self.timeout)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl TaskPoller {
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            sleeper: Box::new(TokioSleeper),
            on_progress: None,
        }
    }

    /// Override the deadline; without it each operation uses its own default
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Effective deadline given an operation default
    pub fn timeout_or(&self, default_timeout: Duration) -> Duration {
        self.timeout.unwrap_or(default_timeout)
    }

    /// Wait with the standard 60 second deadline
    pub async fn wait(&self, source: &dyn TaskSource, task_id: &str) -> Result<Task> {
        self.wait_within(source, task_id, DEFAULT_TASK_TIMEOUT).await
    }

    /// Wait using `default_timeout` unless an explicit timeout was configured
    pub async fn wait_within(
        &self,
        source: &dyn TaskSource,
        task_id: &str,
        default_timeout: Duration,
    ) -> Result<Task> {
        let limit = self.timeout_or(default_timeout);
        let start = self.sleeper.now();

        self.emit(ProgressEvent::Started {
            task_id: task_id.to_string(),
        });
        debug!(task_id, timeout = ?limit, "Waiting for task");

        // The outer timeout drops a hung request. `poll` checks the deadline
        // too, for sleepers that never yield to the timer.
        match tokio::time::timeout(limit, self.poll(source, task_id, start, limit)).await {
            Ok(result) => result,
            Err(_) => Err(self.timed_out(task_id, start)),
        }
    }

    fn elapsed(&self, start: Instant) -> Duration {
        self.sleeper.now().saturating_duration_since(start)
    }

    fn timed_out(&self, task_id: &str, start: Instant) -> CoreError {
        let elapsed = self.elapsed(start);
        self.emit(ProgressEvent::Failed {
            task_id: task_id.to_string(),
            error: format!("timed out after {:.0}s", elapsed.as_secs_f64()),
        });
        CoreError::TaskTimeout {
            task_id: task_id.to_string(),
            elapsed,
        }
    }

    async fn poll(
        &self,
        source: &dyn TaskSource,
        task_id: &str,
        start: Instant,
        limit: Duration,
    ) -> Result<Task> {
        loop {
            let task = source.fetch_task(task_id).await?;
            let status = task.status();

            self.emit(ProgressEvent::Polling {
                task_id: task_id.to_string(),
                status: task
                    .is_completed
                    .clone()
                    .unwrap_or_else(|| status.to_string()),
                elapsed: self.elapsed(start),
            });

            match status {
                TaskStatus::Completed => {
                    debug!(task_id, "Task completed");
                    self.emit(ProgressEvent::Completed {
                        task_id: task_id.to_string(),
                    });
                    return Ok(task);
                }
                TaskStatus::Failed => {
                    debug!(task_id, "Task failed");
                    self.emit(ProgressEvent::Failed {
                        task_id: task_id.to_string(),
                        error: "task failed".to_string(),
                    });
                    return Err(CoreError::TaskFailed {
                        task_id: task_id.to_string(),
                    });
                }
                TaskStatus::Pending => {
                    if self.elapsed(start) >= limit {
                        return Err(self.timed_out(task_id, start));
                    }
                    self.sleeper.sleep(self.interval).await;
                }
            }
        }
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(cb) = &self.on_progress {
            cb(event);
        }
    }
}
