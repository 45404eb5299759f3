//! SSH keys of the project: `api/v1/ssh-keys`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::SsClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshKey {
    pub id: i64,
    pub name: String,
    pub public_key: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SshKeyCreateRequest {
    pub name: String,
    pub public_key: String,
}

#[derive(Debug, Clone)]
pub struct SshKeyHandler {
    client: SsClient,
}

impl SshKeyHandler {
    pub const PATH: &'static str = "api/v1/ssh-keys";

    pub fn new(client: SsClient) -> Self {
        Self { client }
    }

    fn item_path(key_id: &str) -> String {
        format!("{}/{}", Self::PATH, key_id)
    }

    /// Key upload is synchronous; the stored key comes back directly
    pub async fn create(&self, request: &SshKeyCreateRequest) -> Result<SshKey> {
        self.client.post(Self::PATH, request).await
    }

    pub async fn get(&self, key_id: &str) -> Result<SshKey> {
        self.client
            .get_envelope(&Self::item_path(key_id), "ssh_key")
            .await
    }

    pub async fn list(&self) -> Result<Vec<SshKey>> {
        self.client.get_envelope(Self::PATH, "ssh_keys").await
    }

    pub async fn delete(&self, key_id: &str) -> Result<()> {
        self.client.delete(&Self::item_path(key_id)).await
    }
}
