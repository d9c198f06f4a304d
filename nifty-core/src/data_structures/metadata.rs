use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::dev_accounts;

/// Construction parameters for a collection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    pub symbol: String,

    /// Prefix for `token_uri`; empty disables URIs
    #[serde(default)]
    pub base_uri: String,

    /// Account acting for wrapper-level mint, burn and transfer
    #[serde(default = "default_deployer")]
    pub deployer: Address,
}

fn default_deployer() -> Address {
    dev_accounts(1)[0]
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: "MyNFT".to_string(),
            symbol: "MNFT".to_string(),
            base_uri: String::new(),
            deployer: default_deployer(),
        }
    }
}

impl CollectionConfig {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    pub fn with_deployer(mut self, deployer: Address) -> Self {
        self.deployer = deployer;
        self
    }

    pub fn validate(&self) -> NiftyResult<()> {
        if self.deployer.is_zero() {
            return Err(NiftyError::Config("deployer must not be the null address".to_string()));
        }
        Ok(())
    }
}

/// Collection-level metadata
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
}

impl CollectionMetadata {
    pub fn token_uri(&self, token_id: TokenId) -> String {
        if self.base_uri.is_empty() {
            String::new()
        } else {
            format!("{}{}", self.base_uri, token_id)
        }
    }
}

impl From<&CollectionConfig> for CollectionMetadata {
    fn from(config: &CollectionConfig) -> Self {
        Self {
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            base_uri: config.base_uri.clone(),
        }
    }
}
