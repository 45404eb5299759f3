//! Ansible inventory built from the project's servers
//!
//! Each server is addressed by its first public interface, ordered by NIC
//! id. Servers without tags land in `all.hosts`, tagged ones in
//! `all.children.<tag>.hosts` (once per tag). Servers with no public
//! interface are left out.

use std::collections::HashSet;

use serde_json::{Map, Value, json};
use ssclient::{Server, ServerNic};
use tracing::debug;

use crate::cli::AnsibleCommands;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{OutputFormat, print_output};

pub async fn handle_ansible_command(
    conn_mgr: &ConnectionManager,
    command: &AnsibleCommands,
    query: Option<&str>,
) -> CliResult<()> {
    match command {
        AnsibleCommands::GetInventory => {
            let client = conn_mgr.create_client()?;
            let networks = client.networks().list().await?;
            let servers = client.servers().list().await?;

            let isolated: HashSet<&str> = networks.iter().map(|n| n.id.as_str()).collect();
            debug!(
                servers = servers.len(),
                isolated_networks = isolated.len(),
                "Building inventory"
            );

            // Inventories are always YAML, whatever -o says
            print_output(build_inventory(&servers, &isolated), OutputFormat::Yaml, query)?;
        }
    }
    Ok(())
}

/// First interface, by id, that is not attached to an isolated network
fn public_nic<'a>(server: &'a Server, isolated: &HashSet<&str>) -> Option<&'a ServerNic> {
    let mut nics: Vec<&ServerNic> = server.nics.iter().collect();
    nics.sort_by_key(|nic| nic.id);
    nics.into_iter()
        .find(|nic| !isolated.contains(nic.network_id.as_str()))
}

fn build_inventory(servers: &[Server], isolated: &HashSet<&str>) -> Value {
    let mut hosts = Map::new();
    let mut children = Map::new();

    for server in servers {
        let Some(nic) = public_nic(server, isolated) else {
            debug!(server_id = %server.id, "No public interface, skipping");
            continue;
        };
        let ip = nic.ip_address.clone();

        if server.tags.is_empty() {
            hosts.insert(ip, json!({}));
            continue;
        }
        for tag in &server.tags {
            let group = children
                .entry(tag.clone())
                .or_insert_with(|| json!({ "hosts": {} }));
            if let Some(group_hosts) = group.get_mut("hosts").and_then(Value::as_object_mut) {
                group_hosts.insert(ip.clone(), json!({}));
            }
        }
    }

    let mut all = Map::new();
    if !hosts.is_empty() {
        all.insert("hosts".to_string(), Value::Object(hosts));
    }
    all.insert("children".to_string(), Value::Object(children));
    json!({ "all": all })
}
