//! `AUTODIDACT_*` environment overrides.

use crate::ConfigError;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Translate recognized environment variables into a config overlay.
///
/// Returns `None` when no recognized variable is set. Unrecognized
/// `AUTODIDACT_*` variables are ignored.
pub(super) fn overrides_from_env(
    env: &BTreeMap<String, String>,
) -> Result<Option<Value>, ConfigError> {
    let mut root = Map::new();

    if let Some(path) = env.get("AUTODIDACT_STORE_PATH") {
        insert(&mut root, "store", "path", json!(path));
    }
    if let Some(host) = env.get("AUTODIDACT_HOST") {
        insert(&mut root, "server", "host", json!(host));
    }
    if let Some(port) = env.get("AUTODIDACT_PORT") {
        let port: u16 = port.trim().parse().map_err(|_| ConfigError::Field {
            path: "env:AUTODIDACT_PORT".to_string(),
            message: format!("expected a port number, got {port:?}"),
        })?;
        insert(&mut root, "server", "port", json!(port));
    }
    if let Some(enabled) = env.get("AUTODIDACT_SEARCH_ENABLED") {
        let enabled = parse_bool(enabled).ok_or_else(|| ConfigError::Field {
            path: "env:AUTODIDACT_SEARCH_ENABLED".to_string(),
            message: format!("expected a boolean, got {enabled:?}"),
        })?;
        insert(&mut root, "search", "enabled", json!(enabled));
    }

    if root.is_empty() {
        return Ok(None);
    }
    Ok(Some(Value::Object(root)))
}

fn insert(root: &mut Map<String, Value>, section: &str, key: &str, value: Value) {
    let entry = root
        .entry(section.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(map) = entry {
        map.insert(key.to_string(), value);
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
