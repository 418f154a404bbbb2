//! Tesseract CLI OCR backend.
//!
//! Invokes the `tesseract` binary as a subprocess with TSV output, then
//! reassembles words into lines. Requires tesseract >= 4 on `PATH`.

use crate::config::OcrConfig;
use crate::error::{DataExtractError, Result};
use crate::ocr::backend::{OcrBackend, ProgressSink};
use crate::ocr::types::{BoundingBox, LineSpan, OcrProgress, OcrResult, WordSpan};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

/// Default timeout for a single tesseract invocation (120 seconds)
const TESSERACT_TIMEOUT_SECONDS: u64 = 120;

/// RAII guard for automatic temporary file cleanup
struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        // Best-effort cleanup - use a spawned task since Drop can't be async
        let path = self.path.clone();
        tokio::spawn(async move {
            let _ = fs::remove_file(&path).await;
        });
    }
}

/// OCR backend wrapping the `tesseract` command-line binary.
pub struct TesseractCliBackend {
    binary: String,
}

impl TesseractCliBackend {
    pub fn new() -> Self {
        Self {
            binary: "tesseract".to_string(),
        }
    }

    /// Use a non-default tesseract binary (absolute path or alternate name).
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Map the 1-3 accuracy level to tesseract page segmentation flags.
    ///
    /// Level 1 skips layout analysis (single uniform block), level 2 uses
    /// full automatic page segmentation, level 3 additionally enables
    /// dictionary correction.
    fn accuracy_args(accuracy: u8) -> Vec<String> {
        match accuracy {
            1 => vec!["--psm".into(), "6".into()],
            3 => vec![
                "--psm".into(),
                "3".into(),
                "-c".into(),
                "tessedit_enable_dict_correction=1".into(),
            ],
            _ => vec!["--psm".into(), "3".into()],
        }
    }

    async fn run_tsv(&self, path: &Path, config: &OcrConfig) -> Result<String> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&config.language);
        for arg in Self::accuracy_args(config.accuracy) {
            cmd.arg(arg);
        }
        cmd.arg("tsv");

        // Reap the subprocess if the future is dropped mid-run (timeout).
        cmd.kill_on_drop(true);

        let child = cmd
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(|e| {
                // Failed to execute tesseract - IO error (command not found, etc.)
                std::io::Error::other(format!("Failed to execute tesseract: {}", e))
            })?;

        let output = match timeout(
            Duration::from_secs(TESSERACT_TIMEOUT_SECONDS),
            child.wait_with_output(),
        )
        .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(std::io::Error::other(format!("Failed to wait for tesseract: {}", e)).into());
            }
            Err(_) => {
                // Timeout - dropping the wait future kills the child via kill_on_drop
                return Err(DataExtractError::ocr(format!(
                    "Tesseract timed out after {} seconds",
                    TESSERACT_TIMEOUT_SECONDS
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            // Recognition errors become Ocr; anything else is a system error
            let stderr_lower = stderr.to_lowercase();
            if stderr_lower.contains("error")
                || stderr_lower.contains("failed")
                || stderr_lower.contains("could not")
                || stderr_lower.contains("unsupported")
            {
                return Err(DataExtractError::ocr(format!("Tesseract error: {}", stderr)));
            }

            return Err(std::io::Error::other(format!("Tesseract system error: {}", stderr)).into());
        }

        String::from_utf8(output.stdout)
            .map_err(|e| DataExtractError::ocr(format!("Failed to decode tesseract output: {}", e)))
    }
}

impl Default for TesseractCliBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse tesseract TSV output into words and reassembled lines.
///
/// TSV columns: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. Word rows have level 5.
fn parse_tsv(tsv: &str) -> OcrResult {
    let mut words: Vec<WordSpan> = Vec::new();
    let mut lines: Vec<(LineKey, LineSpan)> = Vec::new();

    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 || cols[0] != "5" {
            continue;
        }
        let text = cols[11].trim();
        if text.is_empty() {
            continue;
        }

        let bbox = BoundingBox {
            left: cols[6].parse().unwrap_or(0),
            top: cols[7].parse().unwrap_or(0),
            width: cols[8].parse().unwrap_or(0),
            height: cols[9].parse().unwrap_or(0),
        };
        let confidence: f32 = cols[10].parse().unwrap_or(0.0);

        let key = LineKey {
            page: cols[1].parse().unwrap_or(0),
            block: cols[2].parse().unwrap_or(0),
            par: cols[3].parse().unwrap_or(0),
            line: cols[4].parse().unwrap_or(0),
        };

        match lines.last_mut() {
            Some((last_key, span)) if *last_key == key => {
                span.text.push(' ');
                span.text.push_str(text);
                span.bbox = span.bbox.union(&bbox);
            }
            _ => {
                lines.push((
                    key,
                    LineSpan {
                        text: text.to_string(),
                        bbox,
                    },
                ));
            }
        }

        words.push(WordSpan {
            text: text.to_string(),
            bbox,
            confidence,
        });
    }

    let lines: Vec<LineSpan> = lines.into_iter().map(|(_, span)| span).collect();
    let text = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    OcrResult { text, words, lines }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineKey {
    page: u32,
    block: u32,
    par: u32,
    line: u32,
}

#[async_trait]
impl OcrBackend for TesseractCliBackend {
    fn name(&self) -> &str {
        "tesseract-cli"
    }

    fn supports_language(&self, lang: &str) -> bool {
        // Language availability depends on installed traineddata; defer the
        // real check to the binary and only reject obviously malformed codes.
        !lang.is_empty() && lang.chars().all(|c| c.is_ascii_alphabetic() || c == '_' || c == '+')
    }

    async fn recognize(
        &self,
        image_bytes: &[u8],
        config: &OcrConfig,
        progress: &ProgressSink,
    ) -> Result<OcrResult> {
        if image_bytes.is_empty() {
            return Err(DataExtractError::validation("Empty image data"));
        }
        config.validate()?;

        progress(OcrProgress::new(0.0, "Preparing image"));

        let temp_path = std::env::temp_dir().join(format!(
            "dataextract_ocr_{}_{}.png",
            std::process::id(),
            uuid::Uuid::new_v4()
        ));

        // RAII guard ensures cleanup on all paths including panic
        let _temp_guard = TempFile::new(temp_path.clone());
        fs::write(&temp_path, image_bytes).await?;

        progress(OcrProgress::new(0.2, "Running OCR"));
        tracing::debug!(
            backend = self.name(),
            language = %config.language,
            accuracy = config.accuracy,
            "invoking tesseract"
        );
        let tsv = self.run_tsv(&temp_path, config).await?;

        progress(OcrProgress::new(0.9, "Parsing OCR output"));
        let result = parse_tsv(&tsv);

        progress(OcrProgress::new(1.0, "OCR complete"));
        Ok(result)
    }

    async fn recognize_file(
        &self,
        path: &Path,
        config: &OcrConfig,
        progress: &ProgressSink,
    ) -> Result<OcrResult> {
        config.validate()?;
        progress(OcrProgress::new(0.2, "Running OCR"));
        let tsv = self.run_tsv(path, config).await?;
        progress(OcrProgress::new(0.9, "Parsing OCR output"));
        let result = parse_tsv(&tsv);
        progress(OcrProgress::new(1.0, "OCR complete"));
        Ok(result)
    }
}
