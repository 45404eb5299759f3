//! Tags of a server or an isolated network: `<owner path>/tags`

use serde_json::json;

use crate::client::SsClient;
use crate::error::Result;
use crate::types::Tag;

/// Handler bound to one tag owner (server or isolated network)
#[derive(Debug, Clone)]
pub struct TagHandler {
    client: SsClient,
    path: String,
}

impl TagHandler {
    /// `owner_path` is the item path of the tagged resource,
    /// e.g. `api/v1/servers/l1s11`
    pub fn new(client: SsClient, owner_path: impl AsRef<str>) -> Self {
        Self {
            client,
            path: format!("{}/tags", owner_path.as_ref()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Tagging is synchronous on the API side; the answer is the stored tag
    pub async fn create(&self, value: &str) -> Result<Tag> {
        self.client.post(&self.path, &json!({ "value": value })).await
    }

    pub async fn delete(&self, value: &str) -> Result<()> {
        self.client
            .delete(&format!("{}/{}", self.path, value))
            .await
    }
}
