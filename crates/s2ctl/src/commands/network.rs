//! Isolated network commands

use s2ctl_core::workflows;
use ssclient::{NetworkCreateRequest, NetworkUpdateRequest};

use super::wait::wait_mode;
use crate::cli::NetworkCommands;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{OutputFormat, print_output};

pub async fn handle_network_command(
    conn_mgr: &ConnectionManager,
    command: &NetworkCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let client = conn_mgr.create_client()?;
    let networks = client.networks();

    match command {
        NetworkCommands::Create {
            location,
            name,
            description,
            network_prefix,
            mask,
            wait,
        } => {
            let request = NetworkCreateRequest {
                location_id: location.clone(),
                name: name.clone(),
                description: description.clone(),
                network_prefix: network_prefix.clone(),
                mask: *mask,
            };
            let outcome = workflows::create_network(&client, &request, &wait_mode(wait)).await?;
            print_output(outcome, output_format, query)?;
        }
        NetworkCommands::List => {
            print_output(networks.list().await?, output_format, query)?;
        }
        NetworkCommands::Get { network_id } => {
            print_output(networks.get(network_id).await?, output_format, query)?;
        }
        NetworkCommands::Edit {
            network_id,
            name,
            description,
        } => {
            let request = NetworkUpdateRequest {
                name: name.clone(),
                description: description.clone(),
            };
            // The response body is passed through as returned
            let updated = networks.update(network_id, &request).await?;
            print_output(updated, output_format, query)?;
        }
        NetworkCommands::Delete { network_id } => {
            networks.delete(network_id).await?;
        }
        NetworkCommands::AddTag { network_id, name } => {
            let tag = networks.tags(network_id).create(name).await?;
            print_output(tag, output_format, query)?;
        }
        NetworkCommands::DeleteTag { network_id, name } => {
            networks.tags(network_id).delete(name).await?;
        }
    }

    Ok(())
}
