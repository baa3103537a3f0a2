//! CLI configuration management.

use keysmith_core::{Error, Result};
use keysmith_dsa::DsaPrivateKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct KeysmithConfig {
    /// Private key as uppercase DER hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// Public key hex embedded in the deployed verifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_public_key: Option<String>,
    /// Default directory for authorization files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl KeysmithConfig {
    /// Load configuration from `path`, or the default when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("dev", "keysmith", "keysmith")
            .ok_or_else(|| Error::Config("could not determine config directory".to_string()))?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Decode the stored private key.
    pub fn private_key(&self) -> Result<DsaPrivateKey> {
        let hex = self.private_key.as_deref().ok_or_else(|| {
            Error::Config("no private key configured; run `keysmith keygen --save`".to_string())
        })?;
        DsaPrivateKey::from_hex(hex)
    }

    /// Set a configuration value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "private_key" => {
                DsaPrivateKey::from_hex(value)?;
                self.private_key = Some(value.to_string());
            }
            "original_public_key" => self.original_public_key = Some(value.to_string()),
            "output_dir" => self.output_dir = Some(PathBuf::from(value)),
            _ => return Err(Error::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }
}
