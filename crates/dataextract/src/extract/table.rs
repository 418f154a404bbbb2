//! Table structure extraction.

use crate::ocr::OcrResult;
use crate::types::StructuredRecord;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Cell separators: pipe, tab, or a run of 2+ whitespace characters.
static CELL_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\||\t|\s{2,}").unwrap());

/// Split one OCR line into trimmed, non-empty cells.
fn split_table_row(text: &str) -> Vec<String> {
    CELL_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a tabular layout from OCR line spans.
///
/// The first non-empty row becomes the header row. Data rows map cells onto
/// headers positionally; cells beyond the header count get synthetic
/// `Column<N>` keys (1-based). No input produces an empty table.
pub fn extract_table(ocr: &OcrResult) -> StructuredRecord {
    let rows: Vec<&str> = ocr
        .lines
        .iter()
        .map(|l| l.text.trim())
        .filter(|t| !t.is_empty())
        .collect();

    if rows.is_empty() {
        return StructuredRecord::Table {
            headers: vec![],
            data: vec![],
        };
    }

    let headers = split_table_row(rows[0]);

    let mut data = Vec::new();
    for row in &rows[1..] {
        let cells = split_table_row(row);
        if cells.is_empty() {
            continue;
        }

        let mut record: IndexMap<String, String> = IndexMap::new();
        for (index, cell) in cells.into_iter().enumerate() {
            let key = headers
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("Column{}", index + 1));
            record.insert(key, cell);
        }
        data.push(record);
    }

    StructuredRecord::Table { headers, data }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> (Vec<String>, Vec<IndexMap<String, String>>) {
        match extract_table(&OcrResult::from_text(text)) {
            StructuredRecord::Table { headers, data } => (headers, data),
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_pipe_separated_table() {
        let (headers, data) = table("Name | Age | City\nAlice | 30 | Berlin\nBob | 25 | Paris");
        assert_eq!(headers, vec!["Name", "Age", "City"]);
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["Name"], "Alice");
        assert_eq!(data[1]["City"], "Paris");
    }

    #[test]
    fn test_multi_space_separated_table() {
        let (headers, data) = table("Product  Price\nWidget  9.99");
        assert_eq!(headers, vec!["Product", "Price"]);
        assert_eq!(data[0]["Price"], "9.99");
    }

    #[test]
    fn test_tab_separated_table() {
        let (headers, data) = table("A\tB\n1\t2");
        assert_eq!(headers, vec!["A", "B"]);
        assert_eq!(data[0]["B"], "2");
    }

    #[test]
    fn test_overflow_cells_get_synthetic_headers() {
        let (headers, data) = table("Name | Age\nAlice | 30 | Berlin | extra");
        assert_eq!(headers, vec!["Name", "Age"]);
        assert_eq!(data[0]["Column3"], "Berlin");
        assert_eq!(data[0]["Column4"], "extra");
    }

    #[test]
    fn test_empty_input() {
        let (headers, data) = table("");
        assert!(headers.is_empty());
        assert!(data.is_empty());
    }

    #[test]
    fn test_header_only_table() {
        let (headers, data) = table("Name | Age");
        assert_eq!(headers, vec!["Name", "Age"]);
        assert!(data.is_empty());
    }

    #[test]
    fn test_single_space_is_not_a_separator() {
        let (headers, _) = table("First Name | Age\nAlice Smith | 30");
        assert_eq!(headers, vec!["First Name", "Age"]);
    }

    #[test]
    fn test_row_order_preserved() {
        let (_, data) = table("K | V\na | 1\nb | 2\nc | 3");
        let firsts: Vec<&String> = data.iter().map(|r| &r["K"]).collect();
        assert_eq!(firsts, ["a", "b", "c"]);
    }
}
