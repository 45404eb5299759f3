//! Output rendering: field ordering, JMESPath filtering and the three formats

use anyhow::{Context, Result};
use comfy_table::Table;
use jpx_core::Runtime;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use crate::shape;

/// Global JMESPath runtime with extended functions
static JMESPATH_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the JMESPath runtime with extended functions
pub fn get_jmespath_runtime() -> &'static Runtime {
    JMESPATH_RUNTIME.get_or_init(|| Runtime::builder().with_all_extensions().build())
}

/// Normalize backtick literals in JMESPath expressions.
///
/// JMESPath allows "elided quotes" in backtick literals, so `` `foo` `` means
/// `` `"foo"` ``. The runtime only accepts valid JSON between backticks, so
/// bare words are quoted here. Numbers, booleans, null, arrays, objects and
/// already quoted strings are left alone.
fn normalize_backtick_literals(query: &str) -> String {
    static BACKTICK_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = BACKTICK_RE
        .get_or_init(|| {
            // Match backtick-delimited content, handling escaped backticks
            Regex::new(r"`([^`\\]*(?:\\.[^`\\]*)*)`").ok()
        })
        .as_ref()
    else {
        return query.to_string();
    };

    re.replace_all(query, |caps: &regex::Captures| {
        let content = &caps[1];
        let trimmed = content.trim();

        if serde_json::from_str::<Value>(trimmed).is_ok() {
            format!("`{}`", content)
        } else {
            let escaped = trimmed.replace('\\', "\\\\").replace('"', "\\\"");
            format!("`\"{}\"`", escaped)
        }
    })
    .into_owned()
}

/// Compile a JMESPath expression using the extended runtime.
pub fn compile_jmespath(
    query: &str,
) -> Result<jpx_core::Expression<'static>, jpx_core::JmespathError> {
    let normalized = normalize_backtick_literals(query);
    get_jmespath_runtime().compile(&normalized)
}

/// Apply a JMESPath query to a value
pub fn apply_query(value: &Value, query: &str) -> Result<Value> {
    let expr = compile_jmespath(query)
        .with_context(|| format!("Invalid JMESPath expression: {}", query))?;
    expr.search(value).context("JMESPath query failed")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML, with lists of identified objects keyed by id
    #[default]
    Yaml,
}

/// Print with the default `id, name` field order
pub fn print_output<T: Serialize>(
    data: T,
    format: OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    print_ordered(data, format, query, shape::DEFAULT_ORDER)
}

/// Print with a caller-supplied priority order for top-level objects
pub fn print_ordered<T: Serialize>(
    data: T,
    format: OutputFormat,
    query: Option<&str>,
    order: &[&str],
) -> Result<()> {
    let mut json_value = shape::reorder(serde_json::to_value(data)?, order);

    if let Some(query_str) = query {
        json_value = apply_query(&json_value, query_str)?;
    }

    if is_empty(&json_value) {
        return Ok(());
    }
    println!("{}", render(&json_value, format)?);
    Ok(())
}

/// Nothing worth printing: `null`, `""`, `[]` or `{}`
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Object(obj) => obj.is_empty(),
        _ => false,
    }
}

/// Render an already shaped value in the given format
pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => {
            let rendered = serde_yaml::to_string(&to_yaml(value, true))?;
            Ok(rendered.trim_end().to_string())
        }
        OutputFormat::Table => Ok(render_table(value)),
    }
}

/// Convert to YAML, keying lists of identified objects by their `id`
///
/// Scalars below the top level become strings; a list mixing objects without
/// an `id` and other values is kept as a list.
fn to_yaml(value: &Value, top_level: bool) -> serde_yaml::Value {
    match value {
        Value::Array(items) if items.iter().all(has_id) => {
            let mapping = items
                .iter()
                .map(|item| (yaml_key(&item["id"]), to_yaml(item, false)))
                .collect();
            serde_yaml::Value::Mapping(mapping)
        }
        Value::Array(items) => {
            serde_yaml::Value::Sequence(items.iter().map(|item| to_yaml(item, false)).collect())
        }
        Value::Object(obj) => serde_yaml::Value::Mapping(
            obj.iter()
                .map(|(k, v)| (serde_yaml::Value::String(k.clone()), to_yaml(v, false)))
                .collect(),
        ),
        scalar if top_level => yaml_scalar(scalar),
        scalar => serde_yaml::Value::String(format_value(scalar)),
    }
}

fn has_id(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| obj.contains_key("id"))
}

fn yaml_key(id: &Value) -> serde_yaml::Value {
    match id {
        Value::Number(n) => match n.as_i64() {
            Some(i) => serde_yaml::Value::Number(i.into()),
            None => serde_yaml::Value::String(n.to_string()),
        },
        other => serde_yaml::Value::String(format_value(other)),
    }
}

fn yaml_scalar(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => serde_yaml::Value::Number(i.into()),
            (None, Some(f)) => serde_yaml::Value::Number(f.into()),
            (None, None) => serde_yaml::Value::String(n.to_string()),
        },
        other => serde_yaml::Value::String(format_value(other)),
    }
}

fn render_table(value: &Value) -> String {
    let rows: Vec<&Value> = match value {
        Value::Array(arr) => arr.iter().collect(),
        Value::Object(_) => vec![value],
        scalar => return format_value(scalar),
    };

    let mut headers: Vec<String> = Vec::new();
    for row in &rows {
        if let Value::Object(obj) = row {
            for key in obj.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }
    let has_scalars = rows.iter().any(|row| !row.is_object());
    if has_scalars && !headers.iter().any(|h| h == "value") {
        headers.push("value".to_string());
    }

    let mut table = Table::new();
    table.set_header(&headers);
    for row in rows {
        let cells: Vec<String> = match row {
            Value::Object(obj) => headers.iter().map(|h| cell(obj, h)).collect(),
            scalar => headers
                .iter()
                .map(|h| {
                    if h == "value" {
                        format_value(scalar)
                    } else {
                        String::new()
                    }
                })
                .collect(),
        };
        table.add_row(cells);
    }
    table.to_string()
}

fn cell(obj: &Map<String, Value>, header: &str) -> String {
    obj.get(header).map(format_value).unwrap_or_default()
}

/// One-line rendering; containers are shown as compact JSON
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        container => serde_json::to_string(container).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_normalize_backtick_unquoted_string() {
        assert_eq!(
            normalize_backtick_literals(r#"[?state==`Active`]"#),
            r#"[?state==`"Active"`]"#
        );
    }

    #[test]
    fn test_normalize_backtick_json_literals_unchanged() {
        for query in [
            r#"[?name==`"web"`]"#,
            r#"[?cpu==`2`]"#,
            r#"[?is_power_on==`true`]"#,
            r#"[?login==`null`]"#,
            r#"`[1, 2, 3]`"#,
        ] {
            assert_eq!(normalize_backtick_literals(query), query);
        }
    }

    #[test]
    fn test_normalize_multiple_backticks() {
        assert_eq!(
            normalize_backtick_literals(r#"[?state==`Active` && location_id==`am2`]"#),
            r#"[?state==`"Active"` && location_id==`"am2"`]"#
        );
    }

    #[test]
    fn test_apply_query_filters() {
        let servers = json!([
            {"id": "l1s1", "state": "Active"},
            {"id": "l1s2", "state": "New"},
        ]);
        let ids = apply_query(&servers, "[?state==`Active`].id").unwrap();
        assert_eq!(ids, json!(["l1s1"]));
    }

    #[test]
    fn test_invalid_query_is_an_error() {
        assert!(apply_query(&json!({}), "[?").is_err());
    }

    #[test]
    fn test_yaml_keys_identified_lists_by_id() {
        let value = json!([
            {"id": "l1s1", "name": "web", "cpu": 2},
            {"id": "l1s2", "name": "db", "cpu": 4},
        ]);
        let rendered = render(&value, OutputFormat::Yaml).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();

        assert_eq!(parsed["l1s1"]["name"], serde_yaml::Value::from("web"));
        assert_eq!(parsed["l1s2"]["cpu"], serde_yaml::Value::from("4"));
    }

    #[test]
    fn test_yaml_numeric_ids_stay_numeric_keys() {
        let value = json!([{"id": 7, "name": "boot"}]);
        let rendered = render(&value, OutputFormat::Yaml).unwrap();
        assert!(rendered.starts_with("7:"), "unexpected yaml: {rendered}");
    }

    #[test]
    fn test_yaml_plain_lists_stay_lists() {
        let rendered = render(&json!(["am2", "nl2"]), OutputFormat::Yaml).unwrap();
        assert_eq!(rendered, "- am2\n- nl2");
    }

    #[test]
    fn test_yaml_preserves_key_order() {
        let value = json!({"id": "l1s1", "name": "web", "state": "Active"});
        let rendered = render(&value, OutputFormat::Yaml).unwrap();
        assert_eq!(rendered, "id: l1s1\nname: web\nstate: Active");
    }

    #[test]
    fn test_json_is_pretty_and_ordered() {
        let value = json!({"id": "l1s1", "name": "web"});
        let rendered = render(&value, OutputFormat::Json).unwrap();
        assert_eq!(rendered, "{\n  \"id\": \"l1s1\",\n  \"name\": \"web\"\n}");
    }

    #[test]
    fn test_table_object_is_one_row() {
        let rendered = render(&json!({"id": "l1s1", "name": "web"}), OutputFormat::Table).unwrap();
        assert!(rendered.contains("id"));
        assert!(rendered.contains("l1s1"));
        assert!(rendered.contains("web"));
    }

    #[test]
    fn test_table_scalars_use_value_column() {
        let rendered = render(&json!(["am2", "nl2"]), OutputFormat::Table).unwrap();
        assert!(rendered.contains("value"));
        assert!(rendered.contains("am2"));
        assert!(rendered.contains("nl2"));
    }

    #[test]
    fn test_table_headers_are_union_of_keys() {
        let value = json!([{"id": 1}, {"id": 2, "name": "late"}]);
        let rendered = render(&value, OutputFormat::Table).unwrap();
        assert!(rendered.contains("name"));
        assert!(rendered.contains("late"));
    }

    #[test]
    fn test_table_nested_values_are_compact() {
        let value = json!([{"id": 1, "tags": ["a", "b"]}]);
        let rendered = render(&value, OutputFormat::Table).unwrap();
        assert!(rendered.contains(r#"["a","b"]"#));
    }

    #[test]
    fn test_empty_values_print_nothing() {
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!({})));
        assert!(!is_empty(&json!(0)));
    }
}
