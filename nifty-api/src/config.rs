use nifty_core::data_structures::CollectionConfig;
use serde::Deserialize;
use std::path::Path;

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Collection(#[from] nifty_core::types::NiftyError),
}

/// HTTP server settings
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// Top-level service configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NiftyConfig {
    #[serde(default)]
    pub collection: CollectionConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl NiftyConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: NiftyConfig = toml::from_str(s)?;
        config.collection.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
