//! Configuration loading for the genenet server.
//! Reads genenet.toml from the current directory or the path in GENENET_CONFIG.
//! Without a file the built-in defaults apply.

use std::path::Path;

use genenet_common::{GenenetError, Result};
use genenet_network::{AnalysisParams, DataSources};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const CONFIG_ENV: &str = "GENENET_CONFIG";
pub const BIND_ENV: &str = "GENENET_BIND";
const DEFAULT_CONFIG_FILE: &str = "genenet.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataSources,
    #[serde(default)]
    pub analysis: AnalysisParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Allowed CORS origins; empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_bind()             -> String { "0.0.0.0:8000".to_string() }
fn default_max_upload_bytes() -> usize  { 10 * 1024 * 1024 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: Vec::new(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

mod tests;

impl Config {
    /// Load configuration from genenet.toml.
    /// Checks GENENET_CONFIG env var first, then current directory; then applies
    /// the GENENET_BIND override.
    pub fn load() -> Result<Self> {
        Self::load_from(std::env::var(CONFIG_ENV).ok(), std::env::var(BIND_ENV).ok())
    }

    /// `config_path` and `bind` are the GENENET_CONFIG and GENENET_BIND values.
    /// A missing genenet.toml in the current directory means defaults; a missing
    /// file named by GENENET_CONFIG is an error.
    pub fn load_from(config_path: Option<String>, bind: Option<String>) -> Result<Self> {
        let explicit = config_path.is_some();
        let path = config_path.unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&path).exists() {
            info!(path = %path, "Loading configuration");
            Self::from_path(Path::new(&path))?
        } else if explicit {
            return Err(GenenetError::Config(format!(
                "Config file not found: {path} (set by {CONFIG_ENV})"
            )));
        } else {
            info!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Self::default()
        };

        if let Some(bind) = bind {
            config.server.bind = bind;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.analysis
            .correlation()
            .validate()
            .map_err(|e| GenenetError::Config(format!("[analysis] {e}")))?;
        if self.server.max_upload_bytes == 0 {
            return Err(GenenetError::Config(
                "[server] max_upload_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
