//! Job configuration domain types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Nested job or shared platform configuration document
///
/// Documents are schemaless apart from the few keys below, so they are kept
/// as plain JSON objects.
pub type JobConfig = Map<String, Value>;

/// Key naming the shared pipeline platform of a job
pub const PLATFORM_TAG_KEY: &str = "platformTag";

/// Key holding the dbt model (table) a job builds
pub const TABLE_NAME_KEY: &str = "foundations-table-name";

/// Outcome of resolving a job id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedJob {
    pub job_id: String,
    pub model: String,
    /// Job config merged over its shared platform config (if any)
    pub config: JobConfig,
}

/// Returns whether a JSON value counts as set
///
/// `null`, `false`, zero, the empty string and empty collections are unset.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Returns the platform tag of a job config, if one is set
///
/// The raw value is returned; only string tags name a platform, so callers
/// treat any other truthy value as an unknown tag.
pub fn platform_tag(config: &JobConfig) -> Option<&Value> {
    config.get(PLATFORM_TAG_KEY).filter(|v| is_truthy(v))
}

/// Returns the table name of a (merged) config, if one is set
///
/// Strings and numbers are accepted, numbers as their JSON text. A non-empty
/// array or object is rejected rather than rendered into the dbt selector.
pub fn table_name(config: &JobConfig) -> Option<String> {
    config
        .get(TABLE_NAME_KEY)
        .filter(|v| is_truthy(v))
        .filter(|v| !v.is_array() && !v.is_object())
        .map(scalar_text)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> JobConfig {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-2.5), json!("x"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_platform_tag() {
        assert_eq!(
            platform_tag(&config(json!({"platformTag": "spark"}))),
            Some(&json!("spark"))
        );
        assert_eq!(platform_tag(&config(json!({"platformTag": ""}))), None);
        assert_eq!(platform_tag(&config(json!({"platformTag": null}))), None);
        assert_eq!(platform_tag(&config(json!({"platformTag": 0}))), None);
        assert_eq!(platform_tag(&config(json!({}))), None);
        assert_eq!(
            platform_tag(&config(json!({"platformTag": 12}))),
            Some(&json!(12))
        );
    }

    #[test]
    fn test_table_name() {
        assert_eq!(
            table_name(&config(json!({"foundations-table-name": "jobs.raw"}))),
            Some("jobs.raw".to_string())
        );
        assert_eq!(
            table_name(&config(json!({"foundations-table-name": 42}))),
            Some("42".to_string())
        );
        assert_eq!(table_name(&config(json!({"foundations-table-name": ""}))), None);
        assert_eq!(table_name(&config(json!({"foundations-table-name": ["a"]}))), None);
        assert_eq!(table_name(&config(json!({"other": "x"}))), None);
    }
}
