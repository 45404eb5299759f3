//! Power management: `api/v1/servers/{server_id}/power/{action}`

use serde_json::json;

use crate::client::SsClient;
use crate::error::Result;
use crate::types::TaskHandle;

/// Power transitions accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    On,
    /// Hard power off
    Off,
    /// Graceful shutdown through the guest OS
    Shutdown,
    /// Graceful reboot through the guest OS
    Reboot,
    /// Hard reset
    Reset,
}

impl PowerAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PowerAction::On => "on",
            PowerAction::Off => "off",
            PowerAction::Shutdown => "shutdown",
            PowerAction::Reboot => "reboot",
            PowerAction::Reset => "reset",
        }
    }
}

impl std::fmt::Display for PowerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct PowerHandler {
    client: SsClient,
    path: String,
}

impl PowerHandler {
    pub fn new(client: SsClient, server_id: &str) -> Self {
        Self {
            client,
            path: format!("api/v1/servers/{}/power", server_id),
        }
    }

    pub async fn apply(&self, action: PowerAction) -> Result<TaskHandle> {
        let path = format!("{}/{}", self.path, action);
        self.client.post(&path, &json!({})).await
    }

    pub async fn power_on(&self) -> Result<TaskHandle> {
        self.apply(PowerAction::On).await
    }

    pub async fn power_off(&self) -> Result<TaskHandle> {
        self.apply(PowerAction::Off).await
    }

    pub async fn shutdown(&self) -> Result<TaskHandle> {
        self.apply(PowerAction::Shutdown).await
    }

    pub async fn reboot(&self) -> Result<TaskHandle> {
        self.apply(PowerAction::Reboot).await
    }

    pub async fn reset(&self) -> Result<TaskHandle> {
        self.apply(PowerAction::Reset).await
    }
}
