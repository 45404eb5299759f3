//! Project commands

use crate::cli::ProjectCommands;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{OutputFormat, print_output};

pub async fn handle_project_command(
    conn_mgr: &ConnectionManager,
    command: &ProjectCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    match command {
        ProjectCommands::Show => {
            let project = conn_mgr.create_client()?.project().get().await?;
            print_output(project, output_format, query)?;
        }
    }
    Ok(())
}
