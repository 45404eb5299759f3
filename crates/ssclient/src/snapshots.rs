//! Server snapshots: `api/v1/servers/{server_id}/snapshots`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::client::SsClient;
use crate::error::Result;
use crate::types::TaskHandle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub id: i64,
    pub server_id: String,
    pub name: String,
    pub size_mb: u64,
    pub created: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotCreateRequest {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct SnapshotHandler {
    client: SsClient,
    path: String,
}

impl SnapshotHandler {
    pub fn new(client: SsClient, server_id: &str) -> Self {
        Self {
            client,
            path: format!("api/v1/servers/{}/snapshots", server_id),
        }
    }

    fn item_path(&self, snapshot_id: &str) -> String {
        format!("{}/{}", self.path, snapshot_id)
    }

    pub async fn create(&self, request: &SnapshotCreateRequest) -> Result<TaskHandle> {
        self.client.post(&self.path, request).await
    }

    pub async fn get(&self, snapshot_id: &str) -> Result<Snapshot> {
        self.client
            .get_envelope(&self.item_path(snapshot_id), "snapshot")
            .await
    }

    pub async fn list(&self) -> Result<Vec<Snapshot>> {
        self.client.get_envelope(&self.path, "snapshots").await
    }

    pub async fn delete(&self, snapshot_id: &str) -> Result<()> {
        self.client.delete(&self.item_path(snapshot_id)).await
    }

    /// Restore the server to the given snapshot
    pub async fn rollback(&self, snapshot_id: &str) -> Result<TaskHandle> {
        let path = format!("{}/rollback", self.item_path(snapshot_id));
        self.client.post(&path, &json!({})).await
    }
}
