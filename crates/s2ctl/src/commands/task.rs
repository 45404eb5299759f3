//! Task commands

use s2ctl_core::workflows;

use super::wait::spinner_poller;
use crate::cli::TaskCommands;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{OutputFormat, print_output};

pub async fn handle_task_command(
    conn_mgr: &ConnectionManager,
    command: &TaskCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let client = conn_mgr.create_client()?;

    let task = match command {
        TaskCommands::Get { task_id } => client.tasks().get(task_id).await?,
        TaskCommands::Wait {
            task_id,
            wait_timeout,
        } => {
            let poller = spinner_poller(*wait_timeout);
            workflows::wait_for_task(&client, task_id, &poller).await?
        }
    };

    print_output(task, output_format, query)?;
    Ok(())
}
