//! Shared wire types: task handles, tasks and tags

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Immediate answer of every asynchronous mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    pub task_id: String,
}

/// Poll state of a task as reported by `is_completed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Terminal states are `Completed` and `Failed`; anything else is still running
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("Completed") => TaskStatus::Completed,
            Some("Failed") => TaskStatus::Failed,
            _ => TaskStatus::Pending,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Field of a completed task that names the resource the task produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskResultField {
    ServerId,
    VolumeId,
    NicId,
    SnapshotId,
    NetworkId,
    DomainId,
    RecordId,
    LocationId,
}

impl TaskResultField {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskResultField::ServerId => "server_id",
            TaskResultField::VolumeId => "volume_id",
            TaskResultField::NicId => "nic_id",
            TaskResultField::SnapshotId => "snapshot_id",
            TaskResultField::NetworkId => "network_id",
            TaskResultField::DomainId => "domain_id",
            TaskResultField::RecordId => "record_id",
            TaskResultField::LocationId => "location_id",
        }
    }
}

impl std::fmt::Display for TaskResultField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An asynchronous operation tracked by the API
///
/// Result identifiers arrive as strings or integers depending on the
/// resource; both are normalized to strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub is_completed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub server_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub nic_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub snapshot_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub network_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub domain_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub record_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub location_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_wire(self.is_completed.as_deref())
    }

    pub fn result_id(&self, field: TaskResultField) -> Option<&str> {
        let id = match field {
            TaskResultField::ServerId => &self.server_id,
            TaskResultField::VolumeId => &self.volume_id,
            TaskResultField::NicId => &self.nic_id,
            TaskResultField::SnapshotId => &self.snapshot_id,
            TaskResultField::NetworkId => &self.network_id,
            TaskResultField::DomainId => &self.domain_id,
            TaskResultField::RecordId => &self.record_id,
            TaskResultField::LocationId => &self.location_id,
        };
        id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Tag attached to a server or an isolated network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub value: String,
}

fn opt_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_status_from_wire() {
        assert_eq!(TaskStatus::from_wire(Some("Completed")), TaskStatus::Completed);
        assert_eq!(TaskStatus::from_wire(Some("Failed")), TaskStatus::Failed);
        assert_eq!(TaskStatus::from_wire(Some("InProgress")), TaskStatus::Pending);
        assert_eq!(TaskStatus::from_wire(Some("completed")), TaskStatus::Pending);
        assert_eq!(TaskStatus::from_wire(None), TaskStatus::Pending);
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Pending.is_terminal());
    }

    #[test]
    fn test_task_normalizes_result_ids() {
        let task: Task = serde_json::from_value(json!({
            "id": "lt17499",
            "is_completed": "Completed",
            "created": "2024-03-01T10:00:00Z",
            "completed": "2024-03-01T10:00:41Z",
            "server_id": "l1s11",
            "volume_id": 57,
            "nic_id": null,
            "location_id": "am2"
        }))
        .unwrap();

        assert_eq!(task.status(), TaskStatus::Completed);
        assert_eq!(task.result_id(TaskResultField::ServerId), Some("l1s11"));
        assert_eq!(task.result_id(TaskResultField::VolumeId), Some("57"));
        assert_eq!(task.result_id(TaskResultField::NicId), None);
        assert_eq!(task.result_id(TaskResultField::RecordId), None);
        assert!(task.extra.is_empty());
    }

    #[test]
    fn test_task_keeps_unknown_fields() {
        let task: Task = serde_json::from_value(json!({
            "id": "t-1",
            "is_completed": "InProgress",
            "progress": 40
        }))
        .unwrap();
        assert_eq!(task.extra.get("progress"), Some(&json!(40)));
        assert_eq!(task.status().to_string(), "pending");
    }
}
