//! Configuration loading and management.
//!
//! Configuration lives in `dataextract.toml`, discovered by walking parent
//! directories, or is created programmatically. All fields have defaults so
//! an empty file (or no file) is valid.

use crate::error::{DataExtractError, Result};
use crate::types::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// # Example
///
/// ```rust
/// use dataextract::config::DataExtractConfig;
///
/// let config = DataExtractConfig::default();
/// assert_eq!(config.ocr.language, "eng");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataExtractConfig {
    /// OCR configuration.
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Default output format for converted results.
    #[serde(default)]
    pub default_format: OutputFormat,

    /// Path of the JSON state file backing history/settings persistence.
    /// `None` means the per-user cache directory.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

/// OCR configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// OCR backend name, resolved through the backend registry.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Language code handed to the OCR engine (e.g., "eng", "deu").
    #[serde(default = "default_eng")]
    pub language: String,

    /// Accuracy level: 1 = fast, 2 = medium, 3 = high.
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
}

fn default_backend() -> String {
    "tesseract-cli".to_string()
}
fn default_eng() -> String {
    "eng".to_string()
}
fn default_accuracy() -> u8 {
    2
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            language: default_eng(),
            accuracy: default_accuracy(),
        }
    }
}

impl Default for DataExtractConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            default_format: OutputFormat::Json,
            state_path: None,
        }
    }
}

impl OcrConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=3).contains(&self.accuracy) {
            return Err(DataExtractError::validation(format!(
                "OCR accuracy must be 1-3, got {}",
                self.accuracy
            )));
        }
        if self.language.is_empty() {
            return Err(DataExtractError::validation("OCR language must not be empty"));
        }
        Ok(())
    }
}

impl DataExtractConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `DataExtractError::Validation` if the file doesn't exist or
    /// is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DataExtractError::validation(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            DataExtractError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e))
        })?;
        config.ocr.validate()?;
        Ok(config)
    }

    /// Discover `dataextract.toml` in the current directory or any parent.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file exists up the tree
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(DataExtractError::Io)?;

        loop {
            let candidate = current.join("dataextract.toml");
            if candidate.exists() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}
