//! Reading individual layer files.

use super::{ConfigLayer, ConfigLayerSource, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE, schema};
use crate::ConfigError;
use directories::UserDirs;
use serde_json::Value;
use std::path::PathBuf;

/// A layer location that may or may not be present on disk.
pub(super) struct Candidate {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
    /// Missing required layers are an error; missing optional ones are skipped.
    pub required: bool,
}

/// Parsed layer document plus where it came from.
pub(super) struct LoadedLayer {
    pub meta: ConfigLayer,
    pub value: Value,
}

impl Candidate {
    /// Read, parse and schema-check the layer.
    pub fn read(&self) -> Result<LoadedLayer, ConfigError> {
        let contents = std::fs::read_to_string(&self.path)?;
        let value: Value = json5::from_str(&contents)?;
        let label = format!("{}({})", self.source.label(), self.path.display());
        schema::validate_layer_schema(&value, &label)?;
        Ok(LoadedLayer {
            meta: ConfigLayer {
                source: self.source,
                path: Some(self.path.clone()),
            },
            value,
        })
    }
}

/// `~/.autodidact/autodidact.json5`, when a home directory is known.
pub(super) fn user_config_path() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    Some(
        dirs.home_dir()
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE),
    )
}
