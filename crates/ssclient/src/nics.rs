//! Network interfaces of a server: `api/v1/servers/{server_id}/nics`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::SsClient;
use crate::error::Result;
use crate::types::TaskHandle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nic {
    pub id: i64,
    pub server_id: String,
    pub network_id: String,
    pub mac: String,
    pub ip_address: String,
    pub mask: u8,
    pub bandwidth_mbps: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// New interface; a `network_id` attaches it to an isolated network,
/// a `bandwidth_mbps` alone makes it public
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NicCreateRequest {
    pub network_id: Option<String>,
    pub bandwidth_mbps: Option<u32>,
}

/// Handler bound to one server's network interfaces
#[derive(Debug, Clone)]
pub struct NicHandler {
    client: SsClient,
    path: String,
}

impl NicHandler {
    pub fn new(client: SsClient, server_id: &str) -> Self {
        Self {
            client,
            path: format!("api/v1/servers/{}/nics", server_id),
        }
    }

    fn item_path(&self, nic_id: &str) -> String {
        format!("{}/{}", self.path, nic_id)
    }

    pub async fn create(&self, request: &NicCreateRequest) -> Result<TaskHandle> {
        self.client.post(&self.path, request).await
    }

    pub async fn get(&self, nic_id: &str) -> Result<Nic> {
        self.client
            .get_envelope(&self.item_path(nic_id), "nic")
            .await
    }

    pub async fn list(&self) -> Result<Vec<Nic>> {
        self.client.get_envelope(&self.path, "nics").await
    }

    pub async fn delete(&self, nic_id: &str) -> Result<()> {
        self.client.delete(&self.item_path(nic_id)).await
    }
}
