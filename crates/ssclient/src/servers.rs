//! Virtual servers: `api/v1/servers`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::SsClient;
use crate::error::Result;
use crate::types::TaskHandle;
use crate::{NicHandler, PowerHandler, SnapshotHandler, TagHandler, VolumeHandler};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerVolume {
    pub id: i64,
    pub name: String,
    pub size_mb: u64,
    pub created: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerNic {
    pub id: i64,
    pub network_id: String,
    pub mac: String,
    pub ip_address: String,
    pub mask: u8,
    pub bandwidth_mbps: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub id: String,
    pub name: String,
    pub location_id: String,
    pub image_id: String,
    pub cpu: u32,
    pub ram_mb: u64,
    pub volumes: Vec<ServerVolume>,
    pub nics: Vec<ServerNic>,
    pub is_power_on: bool,
    pub login: Option<String>,
    pub password: Option<String>,
    pub ssh_key_ids: Vec<i64>,
    pub state: String,
    pub created: String,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Volume requested at server creation; the first one becomes the boot volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeSpec {
    pub name: String,
    pub size_mb: u64,
}

/// Public network interface requested at server creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicNetworkSpec {
    pub bandwidth_mbps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerCreateRequest {
    pub name: String,
    pub location_id: String,
    pub image_id: String,
    pub cpu: u32,
    pub ram_mb: u64,
    pub volumes: Vec<VolumeSpec>,
    pub networks: Vec<PublicNetworkSpec>,
    pub ssh_key_ids: Vec<i64>,
}

/// Partial configuration change; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram_mb: Option<u64>,
}

/// Handler for server operations and the per-server sub-collections
#[derive(Debug, Clone)]
pub struct ServerHandler {
    client: SsClient,
}

impl ServerHandler {
    pub const PATH: &'static str = "api/v1/servers";

    pub fn new(client: SsClient) -> Self {
        Self { client }
    }

    fn item_path(server_id: &str) -> String {
        format!("{}/{}", Self::PATH, server_id)
    }

    pub async fn create(&self, request: &ServerCreateRequest) -> Result<TaskHandle> {
        self.client.post(Self::PATH, request).await
    }

    pub async fn get(&self, server_id: &str) -> Result<Server> {
        self.client
            .get_envelope(&Self::item_path(server_id), "server")
            .await
    }

    pub async fn list(&self) -> Result<Vec<Server>> {
        self.client.get_envelope(Self::PATH, "servers").await
    }

    /// PATCH the server configuration
    pub async fn update(&self, server_id: &str, request: &ServerUpdateRequest) -> Result<TaskHandle> {
        self.client
            .patch(&Self::item_path(server_id), request)
            .await
    }

    pub async fn delete(&self, server_id: &str) -> Result<()> {
        self.client.delete(&Self::item_path(server_id)).await
    }

    pub fn volumes(&self, server_id: &str) -> VolumeHandler {
        VolumeHandler::new(self.client.clone(), server_id)
    }

    pub fn nics(&self, server_id: &str) -> NicHandler {
        NicHandler::new(self.client.clone(), server_id)
    }

    pub fn snapshots(&self, server_id: &str) -> SnapshotHandler {
        SnapshotHandler::new(self.client.clone(), server_id)
    }

    pub fn power(&self, server_id: &str) -> PowerHandler {
        PowerHandler::new(self.client.clone(), server_id)
    }

    pub fn tags(&self, server_id: &str) -> TagHandler {
        TagHandler::new(self.client.clone(), Self::item_path(server_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_wire_shape() {
        let request = ServerCreateRequest {
            name: "web-1".to_string(),
            location_id: "am2".to_string(),
            image_id: "Ubuntu-22.04-X64".to_string(),
            cpu: 2,
            ram_mb: 2048,
            volumes: vec![
                VolumeSpec {
                    name: "boot".to_string(),
                    size_mb: 25600,
                },
                VolumeSpec {
                    name: "data".to_string(),
                    size_mb: 30720,
                },
            ],
            networks: vec![PublicNetworkSpec { bandwidth_mbps: 50 }],
            ssh_key_ids: vec![],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "web-1",
                "location_id": "am2",
                "image_id": "Ubuntu-22.04-X64",
                "cpu": 2,
                "ram_mb": 2048,
                "volumes": [
                    {"name": "boot", "size_mb": 25600},
                    {"name": "data", "size_mb": 30720}
                ],
                "networks": [{"bandwidth_mbps": 50}],
                "ssh_key_ids": []
            })
        );
    }

    #[test]
    fn test_update_request_omits_absent_fields() {
        let request = ServerUpdateRequest {
            cpu: None,
            ram_mb: Some(4096),
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"ram_mb": 4096}));
    }

    #[test]
    fn test_server_tolerates_partial_payload() {
        let server: Server = serde_json::from_value(json!({
            "id": "l1s11",
            "name": "web-1",
            "nics": [{"id": 3, "network_id": "l1n1", "ip_address": "45.1.2.3"}],
            "backup": {"enabled": false}
        }))
        .unwrap();
        assert_eq!(server.id, "l1s11");
        assert_eq!(server.nics[0].ip_address, "45.1.2.3");
        assert!(server.tags.is_empty());
        assert!(server.extra.contains_key("backup"));
    }
}
