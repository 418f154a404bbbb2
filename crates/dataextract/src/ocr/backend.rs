//! OCR backend trait.
//!
//! Implement this trait to plug a different OCR engine into the pipeline.

use crate::config::OcrConfig;
use crate::error::Result;
use crate::ocr::types::{OcrProgress, OcrResult};
use async_trait::async_trait;
use std::path::Path;

/// Callback invoked with progress updates during recognition.
///
/// Backends call this at phase boundaries; the pipeline forwards reports to
/// its observer. Implementations must be cheap and must not block.
pub type ProgressSink<'a> = dyn Fn(OcrProgress) + Send + Sync + 'a;

/// Trait for OCR backends.
///
/// Backends can be subprocess wrappers (like the bundled Tesseract CLI
/// backend), native bindings, or canned responders for tests.
///
/// # Thread Safety
///
/// Backends must be `Send + Sync`; a single instance is shared across
/// concurrent analyses.
///
/// # Example
///
/// ```rust
/// use dataextract::ocr::{OcrBackend, OcrResult, ProgressSink};
/// use dataextract::config::OcrConfig;
/// use dataextract::Result;
/// use async_trait::async_trait;
///
/// struct EchoBackend;
///
/// #[async_trait]
/// impl OcrBackend for EchoBackend {
///     fn name(&self) -> &str { "echo" }
///
///     fn supports_language(&self, lang: &str) -> bool { lang == "eng" }
///
///     async fn recognize(
///         &self,
///         _image_bytes: &[u8],
///         _config: &OcrConfig,
///         _progress: &ProgressSink,
///     ) -> Result<OcrResult> {
///         Ok(OcrResult::from_text("recognized text"))
///     }
/// }
/// ```
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Backend name used for registry lookup (kebab-case).
    fn name(&self) -> &str;

    /// Check if this backend supports a given ISO 639-2/3 language code.
    fn supports_language(&self, lang: &str) -> bool;

    /// Run OCR over raw image bytes.
    ///
    /// # Errors
    ///
    /// - `DataExtractError::Ocr` - recognition failed
    /// - `DataExtractError::Validation` - empty input or unsupported language
    /// - `DataExtractError::Io` - I/O errors (these always bubble up)
    async fn recognize(
        &self,
        image_bytes: &[u8],
        config: &OcrConfig,
        progress: &ProgressSink,
    ) -> Result<OcrResult>;

    /// Run OCR over an image file.
    ///
    /// Default implementation reads the file and calls `recognize`.
    async fn recognize_file(
        &self,
        path: &Path,
        config: &OcrConfig,
        progress: &ProgressSink,
    ) -> Result<OcrResult> {
        let bytes = tokio::fs::read(path).await?;
        self.recognize(&bytes, config, progress).await
    }

    /// Optional: all supported language codes, empty when unknown.
    fn supported_languages(&self) -> Vec<String> {
        vec![]
    }
}

impl std::fmt::Debug for dyn OcrBackend + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrBackend")
            .field("name", &self.name())
            .finish()
    }
}
