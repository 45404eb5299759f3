//! `--wait` handling shared by every command that starts a task
//!
//! Wraps the core task poller with an indicatif spinner on stderr, so stdout
//! only ever carries the command's result.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use s2ctl_core::{ProgressEvent, Settled, TaskPoller, Wait};

use crate::cli::WaitArgs;
use crate::error::Result as CliResult;
use crate::output::{OutputFormat, print_output};

/// Translate the flags into a wait mode
pub fn wait_mode(args: &WaitArgs) -> Wait {
    if args.wait {
        Wait::Until(spinner_poller(args.wait_timeout))
    } else {
        Wait::No
    }
}

/// A poller that reports progress on a spinner
pub fn spinner_poller(timeout_secs: Option<u64>) -> TaskPoller {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed_precise}]") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(120));

    let poller = TaskPoller::new().on_progress(Box::new(move |event| match &event {
        ProgressEvent::Started { task_id } => {
            pb.set_message(format!("Waiting for task {}", task_id));
        }
        ProgressEvent::Polling {
            task_id, status, ..
        } => {
            pb.set_message(format!("Task {}: {}", task_id, format_task_state(status)));
        }
        ProgressEvent::Completed { task_id } => {
            pb.finish_with_message(format!(
                "Task {}: {}",
                task_id,
                format_task_state("Completed")
            ));
        }
        ProgressEvent::Failed { task_id, error } => {
            pb.finish_with_message(format!("Task {} failed: {}", task_id, error));
        }
    }));

    match timeout_secs {
        Some(secs) => poller.with_timeout(Duration::from_secs(secs)),
        None => poller,
    }
}

/// Print the outcome of an operation that produces nothing to fetch
///
/// Without waiting that is the task handle; after waiting there is nothing
/// left to show beyond the spinner's final line.
pub fn print_settled(
    outcome: Settled,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    if let Settled::Task(handle) = outcome {
        print_output(handle, output_format, query)?;
    }
    Ok(())
}

/// Format task state for display with status icons
fn format_task_state(state: &str) -> String {
    match state.to_lowercase().as_str() {
        "completed" => format!("\u{2713} {}", state),
        "failed" => format!("\u{2717} {}", state),
        "inprogress" | "in_progress" => format!("\u{21bb} {}", state),
        "" => "pending".to_string(),
        _ => state.to_string(),
    }
}
