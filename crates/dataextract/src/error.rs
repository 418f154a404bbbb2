//! Error types for dataextract.
//!
//! All fallible operations in the library return [`Result`]. System errors
//! (`std::io::Error`) bubble up unchanged; application errors are wrapped
//! with a human-readable message and an optional source chain.
use thiserror::Error;

/// Result type alias using `DataExtractError`.
pub type Result<T> = std::result::Result<T, DataExtractError>;

/// Main error type for all dataextract operations.
///
/// # Variants
///
/// - `Io` - File system and I/O errors (always bubble up)
/// - `Ocr` - OCR backend failures; aborts the current analysis batch
/// - `Parsing` - Structure or format parsing errors
/// - `Validation` - Invalid input, configuration or parameters
/// - `Serialization` - JSON serialization/deserialization errors
/// - `Storage` - Key-value store failures (history/settings persistence)
/// - `UnsupportedFormat` - Rejected upload MIME type or unknown output format
/// - `Other` - Catch-all for uncommon errors
#[derive(Debug, Error)]
pub enum DataExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for DataExtractError {
    fn from(err: serde_json::Error) -> Self {
        DataExtractError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $name_with_source:ident, $variant:ident) => {
        #[doc = concat!("Create a ", stringify!($variant), " error")]
        pub fn $name<S: Into<String>>(message: S) -> Self {
            Self::$variant {
                message: message.into(),
                source: None,
            }
        }

        #[doc = concat!("Create a ", stringify!($variant), " error with source")]
        pub fn $name_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
            message: S,
            source: E,
        ) -> Self {
            Self::$variant {
                message: message.into(),
                source: Some(Box::new(source)),
            }
        }
    };
}

impl DataExtractError {
    error_constructor!(ocr, ocr_with_source, Ocr);
    error_constructor!(parsing, parsing_with_source, Parsing);
    error_constructor!(validation, validation_with_source, Validation);
    error_constructor!(serialization, serialization_with_source, Serialization);
    error_constructor!(storage, storage_with_source, Storage);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DataExtractError = io_err.into();
        assert!(matches!(err, DataExtractError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_ocr_error() {
        let err = DataExtractError::ocr("engine crashed");
        assert_eq!(err.to_string(), "OCR error: engine crashed");
    }

    #[test]
    fn test_ocr_error_with_source() {
        let source = std::io::Error::other("tesseract exited");
        let err = DataExtractError::ocr_with_source("engine crashed", source);
        assert_eq!(err.to_string(), "OCR error: engine crashed");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_error() {
        let err = DataExtractError::validation("accuracy out of range");
        assert_eq!(err.to_string(), "Validation error: accuracy out of range");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: DataExtractError = json_err.into();
        assert!(matches!(err, DataExtractError::Serialization { .. }));
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_unsupported_format_error() {
        let err = DataExtractError::UnsupportedFormat("text/x-unknown".to_string());
        assert_eq!(err.to_string(), "Unsupported format: text/x-unknown");
    }

    #[test]
    fn test_storage_error() {
        let err = DataExtractError::storage("state file unwritable");
        assert_eq!(err.to_string(), "Storage error: state file unwritable");
    }

    #[test]
    fn test_io_error_bubbles_unchanged() {
        fn read_file() -> Result<String> {
            let content = std::fs::read_to_string("/nonexistent/file.txt")?;
            Ok(content)
        }

        let result = read_file();
        assert!(matches!(result.unwrap_err(), DataExtractError::Io(_)));
    }
}
