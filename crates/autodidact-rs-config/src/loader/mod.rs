//! Loading of `autodidact.json5` layers.
//!
//! Layers are read in precedence order (user, cwd, then each runtime path),
//! schema-checked one by one, merged, and finally overlaid with `AUTODIDACT_*`
//! environment variables. Only the merged result is decoded and validated.

mod env;
mod layers;
mod merge;
mod schema;
mod utils;


use crate::{AutodidactConfig, ConfigError};
use layers::Candidate;
use log::{debug, info};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "autodidact.json5";
const DEFAULT_CONFIG_DIR: &str = ".autodidact";
const ENV_PREFIX: &str = "AUTODIDACT_";

/// Effective config and the layers that produced it, lowest precedence first.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub config: AutodidactConfig,
    pub layers: Vec<ConfigLayer>,
}

/// Where a layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    User,
    Cwd,
    /// Paths passed with `--config`.
    Runtime,
    /// `AUTODIDACT_*` variables; always applied last.
    Environment,
}

impl ConfigLayerSource {
    fn label(self) -> &'static str {
        match self {
            ConfigLayerSource::User => "user",
            ConfigLayerSource::Cwd => "cwd",
            ConfigLayerSource::Runtime => "runtime",
            ConfigLayerSource::Environment => "env",
        }
    }
}

/// One applied layer.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub source: ConfigLayerSource,
    /// `None` for the environment layer.
    pub path: Option<PathBuf>,
}

/// Inputs for [`AutodidactConfig::load_layered_with_options`].
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Directory searched for `autodidact.json5`.
    pub cwd: PathBuf,
    pub user_config_path: Option<PathBuf>,
    /// Required layers, applied in order after the cwd layer.
    pub runtime_paths: Vec<PathBuf>,
    /// Variables considered for overrides; only `AUTODIDACT_*` keys are read.
    pub env: BTreeMap<String, String>,
}

impl LayeredConfigOptions {
    /// Default user layer location and the `AUTODIDACT_*` part of the process environment.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: layers::user_config_path(),
            runtime_paths: Vec::new(),
            env: std::env::vars()
                .filter(|(key, _)| key.starts_with(ENV_PREFIX))
                .collect(),
        }
    }

    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Replace the environment snapshot.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self
    }

    fn candidates(&self, cwd: &Path) -> Vec<Candidate> {
        let user = self.user_config_path.iter().map(|path| Candidate {
            source: ConfigLayerSource::User,
            path: path.clone(),
            required: false,
        });
        let local = std::iter::once(Candidate {
            source: ConfigLayerSource::Cwd,
            path: cwd.join(DEFAULT_CONFIG_FILE),
            required: false,
        });
        let runtime = self.runtime_paths.iter().map(|path| Candidate {
            source: ConfigLayerSource::Runtime,
            path: path.clone(),
            required: true,
        });
        user.chain(local).chain(runtime).collect()
    }
}

impl AutodidactConfig {
    /// Load one file on its own, without layering or environment overrides.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config (path={})", path.display());
        Self::load_from_str(&std::fs::read_to_string(path)?)
    }

    /// Parse a single JSON5 document.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("parsing config (len={})", contents.len());
        decode(json5::from_str(contents)?, "config")
    }

    /// Layered load with default locations and the process environment.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Layered load with explicit locations and environment.
    ///
    /// A file reached through two layers is applied once, at its first position.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = utils::normalize_path(&options.cwd)?;
        let mut merged = Value::Object(Map::new());
        let mut applied = Vec::new();
        let mut seen = HashSet::new();

        for candidate in options.candidates(&cwd) {
            if !candidate.required && !candidate.path.exists() {
                continue;
            }
            if !seen.insert(utils::unique_path(&candidate.path)) {
                debug!(
                    "skipping repeated layer (source={:?}, path={})",
                    candidate.source,
                    candidate.path.display()
                );
                continue;
            }
            let layer = candidate.read()?;
            debug!(
                "applying layer (source={:?}, path={})",
                candidate.source,
                candidate.path.display()
            );
            merge::merge_json_values(&mut merged, layer.value);
            applied.push(layer.meta);
        }

        if let Some(overrides) = env::overrides_from_env(&options.env)? {
            merge::merge_json_values(&mut merged, overrides);
            applied.push(ConfigLayer {
                source: ConfigLayerSource::Environment,
                path: None,
            });
        }

        let config = decode(merged, "effective")?;
        info!("config loaded (layers={})", applied.len());
        Ok(LayeredConfig {
            config,
            layers: applied,
        })
    }

    /// Check rules that span fields or depend on other settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let problem = if self.server.port == 0 {
            Some("server.port must be greater than zero")
        } else if self.search.timeout_secs == 0 {
            Some("search.timeout_secs must be greater than zero")
        } else if self.search.enabled && self.search.base_url.trim().is_empty() {
            Some("search.base_url is required when search is enabled")
        } else {
            None
        };
        match problem {
            Some(problem) => Err(ConfigError::Invalid(problem.to_string())),
            None => Ok(()),
        }
    }
}

fn decode(value: Value, label: &str) -> Result<AutodidactConfig, ConfigError> {
    schema::validate_layer_schema(&value, label)?;
    let config: AutodidactConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
