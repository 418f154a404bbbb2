//! OCR backends and result types.
//!
//! The pipeline resolves a backend by name through the global registry, so
//! callers can swap the bundled Tesseract CLI wrapper for their own engine.

pub mod backend;
pub mod registry;
pub mod replay;
pub mod tesseract;
pub mod types;

pub use backend::{OcrBackend, ProgressSink};
pub use registry::{get_ocr_backend, list_ocr_backends, register_ocr_backend, unregister_ocr_backend};
pub use replay::ReplayBackend;
pub use tesseract::TesseractCliBackend;
pub use types::{BoundingBox, LineSpan, OcrProgress, OcrResult, WordSpan};

use std::sync::Arc;

/// Register the bundled backends (`tesseract-cli` and `replay`).
///
/// Idempotent; call once at startup before running the pipeline.
pub fn register_default_backends() {
    // Names are static and valid, registration cannot fail.
    let _ = register_ocr_backend(Arc::new(TesseractCliBackend::new()));
    let _ = register_ocr_backend(Arc::new(ReplayBackend::new()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_default_backends() {
        register_default_backends();
        let names = list_ocr_backends();
        assert!(names.contains(&"tesseract-cli".to_string()));
        assert!(names.contains(&"replay".to_string()));
    }
}
