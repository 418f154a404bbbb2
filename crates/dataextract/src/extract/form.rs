//! Form structure extraction.

use crate::ocr::OcrResult;
use crate::types::{FormField, StructuredRecord};
use once_cell::sync::Lazy;
use regex::Regex;

static FIELD_MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:_\[\]]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Infer an input type from the field label and the raw line.
fn infer_field_type(label: &str, raw_line: &str) -> &'static str {
    let lower = label.to_lowercase();
    if lower.contains("email") {
        "email"
    } else if lower.contains("password") {
        "password"
    } else if lower.contains("phone") {
        "tel"
    } else if lower.contains("date") {
        "date"
    } else if raw_line.contains("[]") {
        "checkbox"
    } else {
        "text"
    }
}

/// Recover form fields from label-like OCR lines.
///
/// A line counts as a field when it contains `:`, `__` or `[]`. The label is
/// the line with all `:`, `_`, `[`, `]` characters removed; the machine name
/// is the lowercased label with whitespace runs collapsed to `_`. A `*`
/// anywhere in the line marks the field required.
pub fn extract_form(ocr: &OcrResult) -> StructuredRecord {
    let mut fields = Vec::new();

    for line in &ocr.lines {
        let text = line.text.trim();
        if !(text.contains(':') || text.contains("__") || text.contains("[]")) {
            continue;
        }

        let label = FIELD_MARKUP.replace_all(text, "").trim().to_string();
        let field_type = infer_field_type(&label, text);
        let name = WHITESPACE_RUN
            .replace_all(&label.to_lowercase(), "_")
            .into_owned();

        fields.push(FormField {
            name,
            label,
            field_type: field_type.to_string(),
            required: text.contains('*'),
        });
    }

    StructuredRecord::Form { fields }
}
