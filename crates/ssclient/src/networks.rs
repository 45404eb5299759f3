//! Isolated networks: `api/v1/networks/isolated`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::SsClient;
use crate::error::Result;
use crate::tags::TagHandler;
use crate::types::TaskHandle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub id: String,
    pub location_id: String,
    pub name: String,
    pub description: String,
    pub network_prefix: String,
    pub mask: u8,
    pub server_ids: Vec<String>,
    pub state: String,
    pub created: String,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkCreateRequest {
    pub location_id: String,
    pub name: String,
    pub description: String,
    pub network_prefix: String,
    pub mask: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkUpdateRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NetworkHandler {
    client: SsClient,
}

impl NetworkHandler {
    pub const PATH: &'static str = "api/v1/networks/isolated";

    pub fn new(client: SsClient) -> Self {
        Self { client }
    }

    fn item_path(network_id: &str) -> String {
        format!("{}/{}", Self::PATH, network_id)
    }

    pub async fn create(&self, request: &NetworkCreateRequest) -> Result<TaskHandle> {
        self.client.post(Self::PATH, request).await
    }

    pub async fn get(&self, network_id: &str) -> Result<Network> {
        self.client
            .get_envelope(&Self::item_path(network_id), "isolated_network")
            .await
    }

    pub async fn list(&self) -> Result<Vec<Network>> {
        self.client
            .get_envelope(Self::PATH, "isolated_networks")
            .await
    }

    /// Rename or re-describe a network
    ///
    /// The answer is passed through untouched: depending on the API version
    /// it is either a task handle or the updated network.
    pub async fn update(&self, network_id: &str, request: &NetworkUpdateRequest) -> Result<Value> {
        self.client
            .put_raw(&Self::item_path(network_id), serde_json::to_value(request)?)
            .await
    }

    pub async fn delete(&self, network_id: &str) -> Result<()> {
        self.client.delete(&Self::item_path(network_id)).await
    }

    pub fn tags(&self, network_id: &str) -> TagHandler {
        TagHandler::new(self.client.clone(), Self::item_path(network_id))
    }
}
