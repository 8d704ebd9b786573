use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{app_err, error::AppError};

pub fn parse_json(verb: &str, raw: String) -> Result<Value, AppError> {
    serde_json::from_str(&raw).map_err(|e| {
        AppError::with_output(&format!("Can't parse output of '{verb}' as JSON: {e}"), raw)
    })
}

pub fn decode<T: DeserializeOwned>(verb: &str, value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| {
        AppError::new(&format!("Can't decode output of '{verb}': {e}"))
    })
}

/// Decodes the `items` of a list document.
pub fn decode_items<T: DeserializeOwned>(verb: &str, mut list: Value) -> Result<Vec<T>, AppError> {
    match list.get_mut("items").map(Value::take) {
        Some(items @ Value::Array(_)) => decode(verb, items),
        Some(Value::Null) => Ok(Vec::new()),
        Some(other) => app_err!("Invalid '{verb}' output, 'items' is not an array: {other}"),
        None => app_err!("Invalid '{verb}' output, expected an 'items' field"),
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::Pod;
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_failure_keeps_raw_text() {
        let err = parse_json("get", "No resources found.\n".to_string()).unwrap_err();
        assert!(err.message.starts_with("Can't parse output of 'get'"));
        assert_eq!(err.output.as_deref(), Some("No resources found.\n"));
    }

    #[test]
    fn items_are_decoded() {
        let list = json!({
            "apiVersion": "v1",
            "kind": "List",
            "items": [
                {"apiVersion": "v1", "kind": "Pod", "metadata": {"name": "web-0"}},
                {"apiVersion": "v1", "kind": "Pod", "metadata": {"name": "web-1"}}
            ]
        });
        let pods: Vec<Pod> = decode_items("list", list).unwrap();
        let names: Vec<_> = pods.iter().filter_map(|p| p.metadata.name.as_deref()).collect();
        assert_eq!(names, vec!["web-0", "web-1"]);
    }

    #[test]
    fn missing_items_is_an_error() {
        let err = decode_items::<Pod>("list", json!({"kind": "Pod"})).unwrap_err();
        assert!(err.message.contains("'items'"));
    }
}
