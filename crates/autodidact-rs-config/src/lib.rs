//! Settings for the Autodidact server.
//!
//! [`AutodidactConfig`] is read from JSON5 layers plus `AUTODIDACT_*`
//! environment overrides; see [`AutodidactConfig::load_layered`].

mod error;
mod loader;
mod model;

pub use error::ConfigError;
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
pub use model::*;
