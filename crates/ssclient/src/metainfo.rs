//! Catalog data: locations and images

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::SsClient;
use crate::error::Result;

/// A datacenter with its sizing limits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub id: String,
    pub system_volume_min: u64,
    pub additional_volume_min: u64,
    pub volume_max: u64,
    pub windows_system_volume_min: u64,
    pub bandwidth_min: u32,
    pub bandwidth_max: u32,
    pub cpu_quantity_options: Vec<u32>,
    pub ram_size_options: Vec<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An OS image available in a location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub id: String,
    pub location_id: String,
    #[serde(rename = "type")]
    pub image_type: String,
    pub os_version: String,
    pub architecture: String,
    pub allow_ssh_keys: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct LocationHandler {
    client: SsClient,
}

impl LocationHandler {
    pub const PATH: &'static str = "api/v1/locations";

    pub fn new(client: SsClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Location>> {
        self.client.get_envelope(Self::PATH, "locations").await
    }
}

#[derive(Debug, Clone)]
pub struct ImageHandler {
    client: SsClient,
}

impl ImageHandler {
    pub const PATH: &'static str = "api/v1/images";

    pub fn new(client: SsClient) -> Self {
        Self { client }
    }

    /// Images are listed per location; the same OS shows up once per location
    pub async fn list(&self) -> Result<Vec<Image>> {
        self.client.get_envelope(Self::PATH, "images").await
    }
}
