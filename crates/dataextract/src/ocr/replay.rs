//! Canned-response OCR backend.
//!
//! Returns pre-registered text for known inputs without touching an OCR
//! engine. Used by the test suite and by offline demos; it is deliberately
//! deterministic.

use crate::config::OcrConfig;
use crate::error::{DataExtractError, Result};
use crate::ocr::backend::{OcrBackend, ProgressSink};
use crate::ocr::types::{OcrProgress, OcrResult};
use async_trait::async_trait;
use parking_lot::RwLock;

/// Backend that replays canned OCR results.
///
/// Responses are matched by exact input bytes; unmatched inputs fall back to
/// the default text, or fail when `fail_unmatched` is set.
pub struct ReplayBackend {
    responses: RwLock<Vec<(Vec<u8>, String)>>,
    default_text: RwLock<Option<String>>,
    fail_unmatched: bool,
}

impl ReplayBackend {
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(Vec::new()),
            default_text: RwLock::new(None),
            fail_unmatched: false,
        }
    }

    /// Build a backend that errors on any input without a canned response.
    pub fn strict() -> Self {
        Self {
            responses: RwLock::new(Vec::new()),
            default_text: RwLock::new(None),
            fail_unmatched: true,
        }
    }

    /// Register canned text for an exact input byte sequence.
    pub fn respond_to(self, input: impl Into<Vec<u8>>, text: impl Into<String>) -> Self {
        self.responses.write().push((input.into(), text.into()));
        self
    }

    /// Set the text returned for inputs without a specific response.
    pub fn with_default_text(self, text: impl Into<String>) -> Self {
        *self.default_text.write() = Some(text.into());
        self
    }
}

impl Default for ReplayBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrBackend for ReplayBackend {
    fn name(&self) -> &str {
        "replay"
    }

    fn supports_language(&self, _lang: &str) -> bool {
        true
    }

    async fn recognize(
        &self,
        image_bytes: &[u8],
        _config: &OcrConfig,
        progress: &ProgressSink,
    ) -> Result<OcrResult> {
        progress(OcrProgress::new(0.0, "Replaying OCR"));

        let matched = self
            .responses
            .read()
            .iter()
            .find(|(input, _)| input == image_bytes)
            .map(|(_, text)| text.clone());

        let text = match matched {
            Some(text) => text,
            None => {
                let default = self.default_text.read().clone();
                match default {
                    Some(text) => text,
                    None if self.fail_unmatched => {
                        return Err(DataExtractError::ocr("No canned response for input"));
                    }
                    None => String::new(),
                }
            }
        };

        progress(OcrProgress::new(1.0, "OCR complete"));
        Ok(OcrResult::from_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replay_matches_input() {
        let backend = ReplayBackend::new()
            .respond_to(b"image-a".to_vec(), "Name: Alice")
            .respond_to(b"image-b".to_vec(), "Name: Bob");
        let config = OcrConfig::default();

        let a = backend.recognize(b"image-a", &config, &|_| {}).await.unwrap();
        let b = backend.recognize(b"image-b", &config, &|_| {}).await.unwrap();
        assert_eq!(a.text, "Name: Alice");
        assert_eq!(b.text, "Name: Bob");
    }

    #[tokio::test]
    async fn test_replay_default_text() {
        let backend = ReplayBackend::new().with_default_text("fallback");
        let config = OcrConfig::default();
        let result = backend.recognize(b"anything", &config, &|_| {}).await.unwrap();
        assert_eq!(result.text, "fallback");
    }

    #[tokio::test]
    async fn test_strict_fails_unmatched() {
        let backend = ReplayBackend::strict();
        let config = OcrConfig::default();
        let err = backend.recognize(b"unknown", &config, &|_| {}).await.unwrap_err();
        assert!(matches!(err, DataExtractError::Ocr { .. }));
    }

    #[tokio::test]
    async fn test_progress_reaches_completion() {
        use std::sync::Mutex;
        let fractions: Mutex<Vec<f32>> = Mutex::new(vec![]);

        let backend = ReplayBackend::new().with_default_text("x");
        let config = OcrConfig::default();
        backend
            .recognize(b"img", &config, &|p| fractions.lock().unwrap().push(p.fraction))
            .await
            .unwrap();

        let seen = fractions.lock().unwrap();
        assert_eq!(seen.first(), Some(&0.0));
        assert_eq!(seen.last(), Some(&1.0));
    }
}
