//! Plain text extraction, the fallback for unrecognized layouts.

use crate::ocr::OcrResult;
use crate::types::StructuredRecord;

/// Wrap the OCR output as plain text with line and word breakdown.
///
/// Also used for mindmap-classified files, which have no dedicated parser.
pub fn extract_text(ocr: &OcrResult) -> StructuredRecord {
    StructuredRecord::Text {
        content: ocr.text.clone(),
        lines: ocr.lines.iter().map(|l| l.text.clone()).collect(),
        word_count: ocr.text.split_whitespace().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(input: &str) -> (String, Vec<String>, usize) {
        match extract_text(&OcrResult::from_text(input)) {
            StructuredRecord::Text {
                content,
                lines,
                word_count,
            } => (content, lines, word_count),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_content_and_counts() {
        let (content, lines, word_count) = text("first line\nsecond line here");
        assert_eq!(content, "first line\nsecond line here");
        assert_eq!(lines, vec!["first line", "second line here"]);
        assert_eq!(word_count, 5);
    }

    #[test]
    fn test_empty_input() {
        let (content, lines, word_count) = text("");
        assert!(content.is_empty());
        assert!(lines.is_empty());
        assert_eq!(word_count, 0);
    }

    #[test]
    fn test_repeated_whitespace_counts_words_once() {
        let (_, _, word_count) = text("a   b\t\tc");
        assert_eq!(word_count, 3);
    }
}
