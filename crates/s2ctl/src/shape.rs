//! Deterministic field ordering for API responses
//!
//! Responses come back with whatever key order the service picked. Before
//! printing, the identifying fields are moved to the front of every object so
//! `id` and `name` always lead, whatever the format.

use serde_json::{Map, Value};

/// Priority order used for everything below the top level
pub const DEFAULT_ORDER: &[&str] = &["id", "name"];

/// Priority order for server objects
pub const SERVER_ORDER: &[&str] = &[
    "id",
    "name",
    "state",
    "created",
    "is_power_on",
    "image_id",
    "location_id",
    "cpu",
    "ram_mb",
    "volumes",
    "nics",
    "login",
    "password",
    "ssh_key_ids",
];

/// Move the fields named in `order` to the front of each object
///
/// Top-level objects (including the items of a top-level array) use `order`;
/// anything nested deeper uses [`DEFAULT_ORDER`]. Fields not named keep their
/// relative order. Scalars are returned unchanged.
pub fn reorder(value: Value, order: &[&str]) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(|v| reorder(v, order)).collect()),
        Value::Object(map) => Value::Object(reorder_object(map, order)),
        scalar => scalar,
    }
}

fn reorder_object(mut map: Map<String, Value>, order: &[&str]) -> Map<String, Value> {
    let mut shaped = Map::with_capacity(map.len());

    for key in order {
        if let Some(v) = map.shift_remove(*key) {
            shaped.insert((*key).to_string(), nested(v));
        }
    }
    for (key, v) in map {
        shaped.insert(key, nested(v));
    }
    shaped
}

fn nested(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(nested).collect()),
        Value::Object(map) => Value::Object(reorder_object(map, DEFAULT_ORDER)),
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_priority_fields_lead() {
        let shaped = reorder(json!({"b": 1, "name": "x", "a": 2, "id": "s1"}), DEFAULT_ORDER);
        assert_eq!(keys(&shaped), vec!["id", "name", "b", "a"]);
    }

    #[test]
    fn test_missing_priority_fields_are_skipped() {
        let shaped = reorder(json!({"z": 1, "name": "x"}), DEFAULT_ORDER);
        assert_eq!(keys(&shaped), vec!["name", "z"]);
    }

    #[test]
    fn test_server_order_applies_to_top_level_only() {
        let server = json!({
            "nics": [{"mac": "aa", "ip_address": "1.2.3.4", "id": 2}],
            "cpu": 2,
            "tags": [],
            "state": "Active",
            "name": "web",
            "id": "l1s1",
            "volumes": [{"size_mb": 25600, "name": "boot", "id": 1}],
        });

        let shaped = reorder(json!([server]), SERVER_ORDER);
        let first = &shaped[0];

        assert_eq!(
            keys(first),
            vec!["id", "name", "state", "cpu", "volumes", "nics", "tags"]
        );
        assert_eq!(keys(&first["volumes"][0]), vec!["id", "name", "size_mb"]);
        assert_eq!(keys(&first["nics"][0]), vec!["id", "mac", "ip_address"]);
    }

    #[test]
    fn test_nested_objects_use_default_order() {
        let shaped = reorder(
            json!({"meta": {"state": "x", "name": "n", "id": 1}}),
            SERVER_ORDER,
        );
        assert_eq!(keys(&shaped["meta"]), vec!["id", "name", "state"]);
    }

    #[test]
    fn test_idempotent() {
        let input = json!([{"q": 1, "id": 1, "x": {"name": "a", "k": 0}}, 3, "s"]);
        let once = reorder(input, SERVER_ORDER);
        let twice = reorder(once.clone(), SERVER_ORDER);
        assert_eq!(serde_json::to_string(&once).unwrap(), serde_json::to_string(&twice).unwrap());
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(reorder(json!(42), DEFAULT_ORDER), json!(42));
        assert_eq!(reorder(json!("x"), DEFAULT_ORDER), json!("x"));
        assert_eq!(reorder(Value::Null, DEFAULT_ORDER), Value::Null);
    }
}
