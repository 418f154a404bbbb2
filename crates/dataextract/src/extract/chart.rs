//! Chart structure extraction.

use crate::ocr::OcrResult;
use crate::types::StructuredRecord;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

/// Pull numeric series and axis labels out of recognized words.
///
/// Purely numeric words become data points; words longer than one character
/// that don't start with a digit become labels. Labels are truncated to the
/// data point count. The chart type is assumed to be `bar`.
pub fn extract_chart(ocr: &OcrResult) -> StructuredRecord {
    let mut data: Vec<f64> = Vec::new();
    let mut labels: Vec<String> = Vec::new();

    for word in &ocr.words {
        let text = word.text.as_str();
        if NUMERIC.is_match(text) {
            // Matched words are always parseable.
            if let Ok(value) = text.parse::<f64>() {
                data.push(value);
            }
        } else if text.chars().count() > 1 && !text.starts_with(|c: char| c.is_ascii_digit()) {
            labels.push(text.to_string());
        }
    }

    labels.truncate(data.len());

    StructuredRecord::Chart {
        data,
        labels,
        chart_type: "bar".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(text: &str) -> (Vec<f64>, Vec<String>, String) {
        match extract_chart(&OcrResult::from_text(text)) {
            StructuredRecord::Chart {
                data,
                labels,
                chart_type,
            } => (data, labels, chart_type),
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn test_numbers_and_labels() {
        let (data, labels, chart_type) = chart("Q1 120 Q2 95.5 Q3 140");
        assert_eq!(data, vec![120.0, 95.5, 140.0]);
        assert_eq!(labels, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(chart_type, "bar");
    }

    #[test]
    fn test_mixed_words_collect_in_scan_order() {
        let (data, labels, _) = chart("Sales 10 20 Q1");
        assert_eq!(data, vec![10.0, 20.0]);
        // Both non-numeric words survive: the truncation cap (2) is not hit.
        assert_eq!(labels, vec!["Sales", "Q1"]);
    }

    #[test]
    fn test_labels_truncated_to_data_count() {
        let (data, labels, _) = chart("North South East West 10 20");
        assert_eq!(data.len(), 2);
        assert_eq!(labels, vec!["North", "South"]);
    }

    #[test]
    fn test_single_char_words_ignored() {
        let (data, labels, _) = chart("x 5 y 7");
        assert_eq!(data, vec![5.0, 7.0]);
        assert!(labels.is_empty());
    }

    #[test]
    fn test_digit_initial_words_are_not_labels() {
        // "3rd" is neither purely numeric nor a label.
        let (data, labels, _) = chart("3rd 42");
        assert_eq!(data, vec![42.0]);
        assert!(labels.is_empty());
    }

    #[test]
    fn test_decimal_values() {
        let (data, _, _) = chart("0.5 99.99");
        assert_eq!(data, vec![0.5, 99.99]);
    }

    #[test]
    fn test_negative_numbers_are_not_data() {
        // The numeric pattern has no sign support, so "-5" falls through
        // to the label branch.
        let (data, labels, _) = chart("-5 10");
        assert_eq!(data, vec![10.0]);
        assert_eq!(labels, vec!["-5"]);
    }

    #[test]
    fn test_empty_input() {
        let (data, labels, chart_type) = chart("");
        assert!(data.is_empty());
        assert!(labels.is_empty());
        assert_eq!(chart_type, "bar");
    }
}
