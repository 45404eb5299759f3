//! DNS domains: `api/v1/domains/`
//!
//! Domains are keyed by name rather than by a numeric id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::SsClient;
use crate::error::Result;
use crate::records::{Record, RecordHandler};
use crate::types::TaskHandle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Domain {
    pub name: String,
    pub is_delegated: bool,
    pub records: Vec<Record>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCreateRequest {
    pub name: String,
    /// Copy the records currently served by the domain's nameservers
    pub migrate_records: bool,
}

#[derive(Debug, Clone)]
pub struct DomainHandler {
    client: SsClient,
}

impl DomainHandler {
    /// The collection path keeps its trailing slash; the API redirects without it
    pub const PATH: &'static str = "api/v1/domains/";

    pub fn new(client: SsClient) -> Self {
        Self { client }
    }

    fn item_path(domain_name: &str) -> String {
        format!("{}{}", Self::PATH, domain_name)
    }

    pub async fn create(&self, request: &DomainCreateRequest) -> Result<TaskHandle> {
        self.client.post(Self::PATH, request).await
    }

    pub async fn get(&self, domain_name: &str) -> Result<Domain> {
        self.client
            .get_envelope(&Self::item_path(domain_name), "domain")
            .await
    }

    pub async fn list(&self) -> Result<Vec<Domain>> {
        self.client.get_envelope(Self::PATH, "domains").await
    }

    pub async fn delete(&self, domain_name: &str) -> Result<()> {
        self.client.delete(&Self::item_path(domain_name)).await
    }

    pub fn records(&self, domain_name: &str) -> RecordHandler {
        RecordHandler::new(self.client.clone(), domain_name)
    }
}
