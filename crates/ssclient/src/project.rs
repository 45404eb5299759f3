//! Project owning the API key: `api/v1/project`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::SsClient;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub balance: f64,
    pub currency: String,
    pub state: String,
    pub created: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct ProjectHandler {
    client: SsClient,
}

impl ProjectHandler {
    pub const PATH: &'static str = "api/v1/project";

    pub fn new(client: SsClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<Project> {
        self.client.get_envelope(Self::PATH, "project").await
    }
}
