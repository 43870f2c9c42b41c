//! Configuration structures for the extraction service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PcfcError, Result};

/// Main configuration for pcfc.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PcfcConfig {
    /// HTTP service configuration.
    pub server: ServerConfig,

    /// Extraction pipeline configuration.
    pub extraction: ExtractionConfig,
}

/// HTTP service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind: String,

    /// Port to listen on.
    pub port: u16,

    /// Directory holding uploads while they are being extracted.
    pub upload_dir: PathBuf,

    /// Maximum accepted request body in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            upload_dir: PathBuf::from("./uploaded_files"),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Socket address string (`bind:port`).
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Extraction pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Run the text-pattern extractor when a PDF declares no form fields.
    pub text_fallback: bool,

    /// Run extracted values through validation/correction.
    pub correct_fields: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            text_fallback: false,
            correct_fields: true,
        }
    }
}

impl PcfcConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PcfcError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| PcfcError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
