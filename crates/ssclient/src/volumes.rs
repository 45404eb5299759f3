//! Storage volumes of a server: `api/v1/servers/{server_id}/volumes`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::SsClient;
use crate::error::Result;
use crate::types::TaskHandle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    pub id: i64,
    pub server_id: String,
    pub name: String,
    pub size_mb: u64,
    pub created: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeCreateRequest {
    pub name: String,
    pub size_mb: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeResizeRequest {
    pub size_mb: u64,
}

/// Handler bound to one server's volumes
#[derive(Debug, Clone)]
pub struct VolumeHandler {
    client: SsClient,
    path: String,
}

impl VolumeHandler {
    pub fn new(client: SsClient, server_id: &str) -> Self {
        Self {
            client,
            path: format!("api/v1/servers/{}/volumes", server_id),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn item_path(&self, volume_id: &str) -> String {
        format!("{}/{}", self.path, volume_id)
    }

    pub async fn create(&self, request: &VolumeCreateRequest) -> Result<TaskHandle> {
        self.client.post(&self.path, request).await
    }

    pub async fn get(&self, volume_id: &str) -> Result<Volume> {
        self.client
            .get_envelope(&self.item_path(volume_id), "volume")
            .await
    }

    pub async fn list(&self) -> Result<Vec<Volume>> {
        self.client.get_envelope(&self.path, "volumes").await
    }

    /// Grow a volume; the API rejects sizes not greater than the current one
    pub async fn update(&self, volume_id: &str, request: &VolumeResizeRequest) -> Result<TaskHandle> {
        self.client.put(&self.item_path(volume_id), request).await
    }

    pub async fn delete(&self, volume_id: &str) -> Result<()> {
        self.client.delete(&self.item_path(volume_id)).await
    }
}
