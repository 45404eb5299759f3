//! Asynchronous task lookup: `api/v1/tasks/{task_id}`

use crate::client::SsClient;
use crate::error::Result;
use crate::types::Task;

#[derive(Debug, Clone)]
pub struct TaskHandler {
    client: SsClient,
}

impl TaskHandler {
    pub const PATH: &'static str = "api/v1/tasks";

    pub fn new(client: SsClient) -> Self {
        Self { client }
    }

    /// Fetch the current state of a task; never cached
    pub async fn get(&self, task_id: &str) -> Result<Task> {
        self.client
            .get_envelope(&format!("{}/{}", Self::PATH, task_id), "task")
            .await
    }
}
