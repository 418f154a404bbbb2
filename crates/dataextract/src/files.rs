//! Upload handling: MIME validation, the pending file list, size formatting.

use crate::classify::classify_filename;
use crate::error::{DataExtractError, Result};
use crate::types::UploadedFile;
use chrono::Utc;
use uuid::Uuid;

/// Human-readable size with 1024-based units and up to two decimals.
///
/// Matches the upload list rendering: `0 Bytes`, `1.5 KB`, `2.25 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);

    // Trim trailing zeros from the 2-decimal rendering.
    let rounded = (value * 100.0).round() / 100.0;
    let formatted = format!("{}", rounded);
    format!("{} {}", formatted, UNITS[exponent])
}

/// Check that `mime` is an accepted upload type (`image/*` or
/// `application/pdf`).
fn mime_accepted(mime: &str) -> bool {
    mime.starts_with("image/") || mime == "application/pdf"
}

/// Resolve a file's MIME type, preferring content sniffing over the
/// extension.
fn resolve_mime(name: &str, bytes: &[u8]) -> Option<String> {
    if let Some(kind) = infer::get(bytes) {
        return Some(kind.mime_type().to_string());
    }
    mime_guess::from_path(name)
        .first()
        .map(|m| m.essence_str().to_string())
}

/// Validate and wrap an upload into an [`UploadedFile`].
///
/// # Errors
///
/// Returns `DataExtractError::UnsupportedFormat` for anything that is not an
/// image or a PDF.
pub fn accept_upload(name: &str, bytes: Vec<u8>) -> Result<UploadedFile> {
    let mime = resolve_mime(name, &bytes);
    match mime.as_deref() {
        Some(mime) if mime_accepted(mime) => {}
        other => {
            tracing::warn!(file = name, mime = ?other, "rejected upload");
            return Err(DataExtractError::UnsupportedFormat(
                "Only image files and PDFs are supported".to_string(),
            ));
        }
    }

    let size = format_file_size(bytes.len() as u64);
    Ok(UploadedFile {
        id: Uuid::new_v4(),
        name: name.to_string(),
        size,
        label: classify_filename(name),
        bytes,
        uploaded_at: Utc::now(),
    })
}

/// Ordered list of files waiting for analysis.
#[derive(Debug, Default)]
pub struct FileSet {
    files: Vec<UploadedFile>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an upload.
    pub fn add(&mut self, name: &str, bytes: Vec<u8>) -> Result<&UploadedFile> {
        let file = accept_upload(name, bytes)?;
        self.files.push(file);
        Ok(self.files.last().unwrap())
    }

    /// Remove by position; out-of-range indices are a no-op.
    pub fn remove(&mut self, index: usize) -> Option<UploadedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentLabel;

    // Minimal valid PNG header, enough for content sniffing.
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const PDF_MAGIC: &[u8] = b"%PDF-1.4\n";

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2_359_296), "2.25 MB");
        assert_eq!(format_file_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn test_accept_png_upload() {
        let file = accept_upload("sales_table.png", PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(file.name, "sales_table.png");
        assert_eq!(file.label, ContentLabel::Table);
        assert_eq!(file.size, "12 Bytes");
    }

    #[test]
    fn test_accept_pdf_upload() {
        let file = accept_upload("survey.pdf", PDF_MAGIC.to_vec()).unwrap();
        assert_eq!(file.label, ContentLabel::Form);
    }

    #[test]
    fn test_reject_non_image_upload() {
        let err = accept_upload("notes.txt", b"plain text".to_vec()).unwrap_err();
        assert!(matches!(err, DataExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_extension_fallback_when_content_unknown() {
        // Bytes that sniff to nothing; extension decides.
        let file = accept_upload("scan.jpg", vec![0u8; 4]).unwrap();
        assert_eq!(file.name, "scan.jpg");
    }

    #[test]
    fn test_file_set_add_remove_clear() {
        let mut set = FileSet::new();
        set.add("a.png", PNG_MAGIC.to_vec()).unwrap();
        set.add("b.png", PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(set.len(), 2);

        let removed = set.remove(0).unwrap();
        assert_eq!(removed.name, "a.png");
        assert_eq!(set.files()[0].name, "b.png");

        assert!(set.remove(5).is_none());

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_file_set_rejects_invalid_without_adding() {
        let mut set = FileSet::new();
        assert!(set.add("doc.txt", b"text".to_vec()).is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_upload_order_preserved() {
        let mut set = FileSet::new();
        for name in ["1.png", "2.png", "3.png"] {
            set.add(name, PNG_MAGIC.to_vec()).unwrap();
        }
        let names: Vec<&str> = set.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["1.png", "2.png", "3.png"]);
    }
}
