//! Configuration types for wca-export

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::transfer::{FileTransfer, LocalFileTransfer, NoOpFileTransfer};

/// Serialization settings for request documents
///
/// These only change the textual form of the document. Element content and
/// sibling order are fixed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Emit the `<?xml ...?>` declaration (default: true)
    #[serde(default = "default_true")]
    pub xml_declaration: bool,

    /// Pretty-print with this many spaces per level (None = compact)
    #[serde(default)]
    pub indent: Option<usize>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            indent: None,
        }
    }
}

/// Where finished exports are fetched from
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Directory the remote export store is mounted at (None = no backend)
    #[serde(default)]
    pub remote_root: Option<PathBuf>,
}

/// Main configuration for the export command
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Request serialization settings
    #[serde(default)]
    pub request: RequestConfig,

    /// File transfer settings
    #[serde(default)]
    pub transfer: TransferConfig,
}

impl Config {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check settings that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.request.indent == Some(0) {
            return Err(Error::config(
                "request.indent",
                "indent must be at least 1; omit it for compact output",
            ));
        }
        if let Some(root) = &self.transfer.remote_root {
            if !root.is_absolute() {
                return Err(Error::config(
                    "transfer.remote_root",
                    format!("remote_root must be absolute, got {}", root.display()),
                ));
            }
        }
        Ok(())
    }

    /// Transfer backend described by this configuration
    pub fn file_transfer(&self) -> Arc<dyn FileTransfer> {
        match &self.transfer.remote_root {
            Some(root) => Arc::new(LocalFileTransfer::new(root.clone())),
            None => Arc::new(NoOpFileTransfer),
        }
    }
}

fn default_true() -> bool {
    true
}
