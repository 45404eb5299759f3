//! Server, volume, NIC, power, snapshot and tag commands

use s2ctl_core::workflows::{self, Resolved};
use ssclient::{
    NicCreateRequest, PowerAction, PublicNetworkSpec, Server, ServerCreateRequest,
    ServerUpdateRequest, SnapshotCreateRequest, VolumeCreateRequest, VolumeResizeRequest,
};
use tracing::debug;

use super::wait::{print_settled, wait_mode};
use crate::cli::ServerCommands;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{OutputFormat, print_ordered, print_output};
use crate::shape::SERVER_ORDER;

/// Print a server, or a task handle when nothing was waited for
fn print_server<T: serde::Serialize>(
    data: T,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    print_ordered(data, output_format, query, SERVER_ORDER)?;
    Ok(())
}

pub async fn handle_server_command(
    conn_mgr: &ConnectionManager,
    command: &ServerCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let client = conn_mgr.create_client()?;
    let servers = client.servers();

    match command {
        ServerCommands::Create {
            name,
            location,
            image,
            cpu,
            ram,
            volumes,
            public_networks,
            ssh_key_ids,
            wait,
        } => {
            let request = ServerCreateRequest {
                name: name.clone(),
                location_id: location.clone(),
                image_id: image.clone(),
                cpu: *cpu,
                ram_mb: *ram,
                volumes: volumes.clone(),
                networks: public_networks
                    .iter()
                    .map(|&bandwidth_mbps| PublicNetworkSpec { bandwidth_mbps })
                    .collect(),
                ssh_key_ids: ssh_key_ids.clone(),
            };
            debug!(?request, "Creating server");
            let outcome: Resolved<Server> =
                workflows::create_server(&client, &request, &wait_mode(wait)).await?;
            print_server(outcome, output_format, query)
        }
        ServerCommands::Edit {
            server_id,
            cpu,
            ram,
            wait,
        } => {
            let request = ServerUpdateRequest {
                cpu: *cpu,
                ram_mb: *ram,
            };
            let outcome =
                workflows::update_server(&client, server_id, &request, &wait_mode(wait)).await?;
            print_server(outcome, output_format, query)
        }
        ServerCommands::List => print_server(servers.list().await?, output_format, query),
        ServerCommands::Get { server_id } => {
            print_server(servers.get(server_id).await?, output_format, query)
        }
        ServerCommands::Delete { server_id } => {
            servers.delete(server_id).await?;
            Ok(())
        }

        ServerCommands::AddVolume {
            server_id,
            volume_name,
            volume_size,
            wait,
        } => {
            let request = VolumeCreateRequest {
                name: volume_name.clone(),
                size_mb: *volume_size,
            };
            let outcome =
                workflows::create_volume(&client, server_id, &request, &wait_mode(wait)).await?;
            Ok(print_output(outcome, output_format, query)?)
        }
        ServerCommands::EditVolume {
            server_id,
            volume_id,
            volume_size,
            wait,
        } => {
            let request = VolumeResizeRequest {
                size_mb: *volume_size,
            };
            let outcome = workflows::resize_volume(
                &client,
                server_id,
                &volume_id.to_string(),
                &request,
                &wait_mode(wait),
            )
            .await?;
            Ok(print_output(outcome, output_format, query)?)
        }
        ServerCommands::GetVolume {
            server_id,
            volume_id,
        } => {
            let volume = servers
                .volumes(server_id)
                .get(&volume_id.to_string())
                .await?;
            Ok(print_output(volume, output_format, query)?)
        }
        ServerCommands::ListVolume { server_id } => {
            let volumes = servers.volumes(server_id).list().await?;
            Ok(print_output(volumes, output_format, query)?)
        }
        ServerCommands::DeleteVolume {
            server_id,
            volume_id,
        } => {
            servers
                .volumes(server_id)
                .delete(&volume_id.to_string())
                .await?;
            Ok(())
        }

        ServerCommands::AddNic {
            server_id,
            network_id,
            bandwidth,
            wait,
        } => {
            let request = NicCreateRequest {
                network_id: network_id.clone(),
                bandwidth_mbps: *bandwidth,
            };
            let outcome =
                workflows::create_nic(&client, server_id, &request, &wait_mode(wait)).await?;
            Ok(print_output(outcome, output_format, query)?)
        }
        ServerCommands::ListNic { server_id } => {
            let nics = servers.nics(server_id).list().await?;
            Ok(print_output(nics, output_format, query)?)
        }
        ServerCommands::GetNic { server_id, nic_id } => {
            let nic = servers.nics(server_id).get(&nic_id.to_string()).await?;
            Ok(print_output(nic, output_format, query)?)
        }
        ServerCommands::DeleteNic { server_id, nic_id } => {
            servers.nics(server_id).delete(&nic_id.to_string()).await?;
            Ok(())
        }

        ServerCommands::PowerOn { server_id, wait } => {
            let outcome =
                workflows::power(&client, server_id, PowerAction::On, &wait_mode(wait)).await?;
            print_settled(outcome, output_format, query)
        }
        ServerCommands::PowerOff {
            server_id,
            hard,
            wait,
        } => {
            let action = if *hard {
                PowerAction::Off
            } else {
                PowerAction::Shutdown
            };
            let outcome = workflows::power(&client, server_id, action, &wait_mode(wait)).await?;
            print_settled(outcome, output_format, query)
        }
        ServerCommands::Reboot {
            server_id,
            hard,
            wait,
        } => {
            let action = if *hard {
                PowerAction::Reset
            } else {
                PowerAction::Reboot
            };
            let outcome = workflows::power(&client, server_id, action, &wait_mode(wait)).await?;
            print_settled(outcome, output_format, query)
        }

        ServerCommands::CreateSnapshot {
            server_id,
            name,
            wait,
        } => {
            let request = SnapshotCreateRequest { name: name.clone() };
            let outcome =
                workflows::create_snapshot(&client, server_id, &request, &wait_mode(wait)).await?;
            print_settled(outcome, output_format, query)
        }
        ServerCommands::ListSnapshot { server_id } => {
            let snapshots = servers.snapshots(server_id).list().await?;
            Ok(print_output(snapshots, output_format, query)?)
        }
        ServerCommands::RollbackSnapshot {
            server_id,
            snapshot_id,
            wait,
        } => {
            let outcome = workflows::rollback_snapshot(
                &client,
                server_id,
                &snapshot_id.to_string(),
                &wait_mode(wait),
            )
            .await?;
            print_settled(outcome, output_format, query)
        }
        ServerCommands::DeleteSnapshot {
            server_id,
            snapshot_id,
        } => {
            servers
                .snapshots(server_id)
                .delete(&snapshot_id.to_string())
                .await?;
            Ok(())
        }

        ServerCommands::AddTag { server_id, name } => {
            let tag = servers.tags(server_id).create(name).await?;
            Ok(print_output(tag, output_format, query)?)
        }
        ServerCommands::DeleteTag { server_id, name } => {
            servers.tags(server_id).delete(name).await?;
            Ok(())
        }
    }
}
