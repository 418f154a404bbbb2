//! Heuristic structure extractors.
//!
//! One extractor per content label; [`extract_structure`] dispatches on the
//! classifier's label. All extractors are infallible over valid OCR output:
//! degenerate input yields an empty shape, never an error.

pub mod chart;
pub mod flowchart;
pub mod form;
pub mod table;
pub mod text;

use crate::ocr::OcrResult;
use crate::types::{ContentLabel, StructuredRecord};

pub use chart::extract_chart;
pub use flowchart::extract_flowchart;
pub use form::extract_form;
pub use table::extract_table;
pub use text::extract_text;

/// Run the extractor matching `label` over an OCR result.
///
/// Mindmap has no dedicated parser and falls back to the text extractor.
pub fn extract_structure(label: ContentLabel, ocr: &OcrResult) -> StructuredRecord {
    match label {
        ContentLabel::Table => extract_table(ocr),
        ContentLabel::Flowchart => extract_flowchart(ocr),
        ContentLabel::Form => extract_form(ocr),
        ContentLabel::Chart => extract_chart(ocr),
        ContentLabel::Mindmap | ContentLabel::Text => extract_text(ocr),
    }
}
