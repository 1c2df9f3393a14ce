//! Configuration schema for Autodidact.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root config for the Autodidact service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AutodidactConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
}

impl AutodidactConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> AutodidactConfigBuilder {
        AutodidactConfigBuilder::new()
    }
}

/// Builder for assembling an `AutodidactConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct AutodidactConfigBuilder {
    config: AutodidactConfig,
}

impl AutodidactConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: AutodidactConfig::default(),
        }
    }

    /// Replace the HTTP listener configuration.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Replace the web search configuration.
    pub fn search(mut self, search: SearchConfig) -> Self {
        self.config.search = search;
        self
    }

    /// Replace the code analysis configuration.
    pub fn analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.config.analysis = analysis;
        self
    }

    /// Replace the document store configuration.
    pub fn store(mut self, store: StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Replace the upload staging configuration.
    pub fn uploads(mut self, uploads: UploadsConfig) -> Self {
        self.config.uploads = uploads;
        self
    }

    /// Finalize and return the built `AutodidactConfig`.
    pub fn build(self) -> AutodidactConfig {
        self.config
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

/// Outbound web search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// When false, every search is answered from the fallback table.
    #[serde(default = "default_search_enabled")]
    pub enabled: bool,
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    #[serde(default = "default_search_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Text appended to every outbound query.
    #[serde(default = "default_query_suffix")]
    pub query_suffix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: default_search_enabled(),
            base_url: default_search_base_url(),
            timeout_secs: default_search_timeout_secs(),
            user_agent: default_user_agent(),
            query_suffix: default_query_suffix(),
        }
    }
}

fn default_search_enabled() -> bool {
    true
}

fn default_search_base_url() -> String {
    "https://html.duckduckgo.com/html/".to_string()
}

fn default_search_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_query_suffix() -> String {
    " programming code python javascript".to_string()
}

/// Files inspected by the code pattern scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_analysis_files")]
    pub files: Vec<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            files: default_analysis_files(),
        }
    }
}

fn default_analysis_files() -> Vec<PathBuf> {
    [
        "/app/backend/server.py",
        "/app/frontend/src/App.js",
        "/app/frontend/src/App.css",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

/// Document store location.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub path: Option<String>,
}

impl StoreConfig {
    /// Configured path, or the per-user data directory.
    pub fn resolve_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return PathBuf::from(path);
        }
        ProjectDirs::from("", "", "autodidact")
            .map(|dirs| dirs.data_dir().join("store"))
            .unwrap_or_else(|| PathBuf::from(".autodidact").join("store"))
    }
}

/// Staging directory for uploaded files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UploadsConfig {
    #[serde(default)]
    pub dir: Option<String>,
}

impl UploadsConfig {
    /// Configured directory, or a subdirectory of the system temp dir.
    pub fn resolve_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => PathBuf::from(dir),
            None => std::env::temp_dir().join("autodidact-uploads"),
        }
    }
}
