//! Config error type.

use thiserror::Error;

/// Failure to load or validate an `autodidact.json5` stack.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer file could not be read.
    #[error("cannot read config layer: {0}")]
    Io(#[from] std::io::Error),
    /// A layer is not valid JSON5.
    #[error("config is not valid JSON5: {0}")]
    Syntax(#[from] json5::Error),
    /// The merged document does not decode into `AutodidactConfig`.
    #[error("config does not match the expected shape: {0}")]
    Decode(#[from] serde_json::Error),
    /// A field has the wrong type or is not recognized. `path` is `layer:dotted.key`.
    #[error("{path}: {message}")]
    Field { path: String, message: String },
    /// Values decode but break a cross-field rule.
    #[error("invalid config: {0}")]
    Invalid(String),
}
