//! Shape checks for a single config layer.
//!
//! Layers are checked before merging so that errors name the layer that
//! introduced them, e.g. `runtime(/etc/a.json5):search.enabled: expected bool`.

use crate::ConfigError;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
enum Shape {
    Text,
    /// String or `null`; `null` means "use the default".
    OptionalText,
    Flag,
    Count,
    Port,
    TextList,
}

impl Shape {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Shape::Text => value.is_string(),
            Shape::OptionalText => value.is_null() || value.is_string(),
            Shape::Flag => value.is_boolean(),
            Shape::Count => value.is_u64(),
            Shape::Port => value
                .as_u64()
                .is_some_and(|port| port <= u64::from(u16::MAX)),
            Shape::TextList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Shape::Text => "expected string",
            Shape::OptionalText => "expected string or null",
            Shape::Flag => "expected bool",
            Shape::Count => "expected non-negative integer",
            Shape::Port => "expected port number (0-65535)",
            Shape::TextList => "expected array of strings",
        }
    }
}

type Fields = &'static [(&'static str, Shape)];

const SECTIONS: &[(&str, Fields)] = &[
    ("server", &[("host", Shape::Text), ("port", Shape::Port)]),
    (
        "search",
        &[
            ("enabled", Shape::Flag),
            ("base_url", Shape::Text),
            ("timeout_secs", Shape::Count),
            ("user_agent", Shape::Text),
            ("query_suffix", Shape::Text),
        ],
    ),
    ("analysis", &[("files", Shape::TextList)]),
    ("store", &[("path", Shape::OptionalText)]),
    ("uploads", &[("dir", Shape::OptionalText)]),
];

/// Check one layer document. `layer` prefixes the path in error messages.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let root = object(value, layer, "root")?;
    for (name, section) in root {
        if name == "$schema" {
            check(section, Shape::Text, layer, name)?;
            continue;
        }
        let Some((_, fields)) = SECTIONS.iter().find(|(known, _)| known == name) else {
            return Err(field_error(layer, name, "unknown key"));
        };
        for (key, value) in object(section, layer, name)? {
            let path = format!("{name}.{key}");
            match fields.iter().find(|(known, _)| known == key) {
                Some((_, shape)) => check(value, *shape, layer, &path)?,
                None => return Err(field_error(layer, &path, "unknown key")),
            }
        }
    }
    Ok(())
}

fn object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| field_error(layer, path, "expected object"))
}

fn check(value: &Value, shape: Shape, layer: &str, path: &str) -> Result<(), ConfigError> {
    if shape.accepts(value) {
        Ok(())
    } else {
        Err(field_error(layer, path, shape.expected()))
    }
}

fn field_error(layer: &str, path: &str, message: &str) -> ConfigError {
    ConfigError::Field {
        path: format!("{layer}:{path}"),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::validate_layer_schema;
    use serde_json::json;

    fn message(value: serde_json::Value) -> String {
        validate_layer_schema(&value, "cwd")
            .expect_err("schema error")
            .to_string()
    }

    #[test]
    fn accepts_every_known_field() {
        let value = json!({
            "$schema": "./schema.json",
            "server": { "host": "127.0.0.1", "port": 8001 },
            "search": {
                "enabled": true,
                "base_url": "https://html.duckduckgo.com/html/",
                "timeout_secs": 10,
                "user_agent": "agent",
                "query_suffix": " rust",
            },
            "analysis": { "files": ["a.py"] },
            "store": { "path": null },
            "uploads": { "dir": "/tmp/up" },
        });
        validate_layer_schema(&value, "cwd").expect("valid layer");
    }

    #[test]
    fn errors_name_layer_and_field() {
        assert_eq!(
            message(json!({ "analysis": { "files": ["a.py", 3] } })),
            "cwd:analysis.files: expected array of strings"
        );
        assert_eq!(
            message(json!({ "search": { "engine": "bing" } })),
            "cwd:search.engine: unknown key"
        );
        assert_eq!(message(json!([])), "cwd:root: expected object");
    }
}
