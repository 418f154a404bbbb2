//! Content classification from file names.
//!
//! A cheap heuristic that looks at the uploaded file's name, not its pixels.
//! The pipeline's detection stage runs this before OCR so the structure
//! parser knows which extractor to dispatch to.

use crate::types::ContentLabel;

/// Keyword sets checked in priority order; first match wins.
const KEYWORD_SETS: [(&[&str], ContentLabel); 5] = [
    (&["table", "excel", "spreadsheet"], ContentLabel::Table),
    (&["chart", "graph", "plot"], ContentLabel::Chart),
    (&["diagram", "flowchart", "flow"], ContentLabel::Flowchart),
    (&["form", "survey"], ContentLabel::Form),
    (&["mindmap", "mind"], ContentLabel::Mindmap),
];

/// Classify a file by its name. Infallible; unmatched names are `text`.
pub fn classify_filename(filename: &str) -> ContentLabel {
    let name = filename.to_lowercase();
    for (keywords, label) in KEYWORD_SETS {
        if keywords.iter().any(|kw| name.contains(kw)) {
            return label;
        }
    }
    ContentLabel::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keywords() {
        assert_eq!(classify_filename("sales_table.png"), ContentLabel::Table);
        assert_eq!(classify_filename("Excel-Screenshot.jpg"), ContentLabel::Table);
        assert_eq!(classify_filename("q3_spreadsheet.png"), ContentLabel::Table);
    }

    #[test]
    fn test_chart_keywords() {
        assert_eq!(classify_filename("revenue_chart.png"), ContentLabel::Chart);
        assert_eq!(classify_filename("growth-GRAPH.jpeg"), ContentLabel::Chart);
        assert_eq!(classify_filename("scatter_plot.png"), ContentLabel::Chart);
    }

    #[test]
    fn test_flowchart_keywords() {
        assert_eq!(classify_filename("login_flowchart.png"), ContentLabel::Flowchart);
        assert_eq!(classify_filename("arch_diagram.png"), ContentLabel::Flowchart);
        assert_eq!(classify_filename("signup-flow.png"), ContentLabel::Flowchart);
    }

    #[test]
    fn test_form_and_mindmap_keywords() {
        assert_eq!(classify_filename("intake_form.pdf"), ContentLabel::Form);
        assert_eq!(classify_filename("customer-survey.png"), ContentLabel::Form);
        assert_eq!(classify_filename("ideas_mindmap.png"), ContentLabel::Mindmap);
    }

    #[test]
    fn test_priority_order_first_match_wins() {
        // "table" outranks "chart" when both keywords appear.
        assert_eq!(classify_filename("table_chart.png"), ContentLabel::Table);
        assert_eq!(classify_filename("chart_flow.png"), ContentLabel::Chart);
    }

    #[test]
    fn test_no_match_falls_back_to_text() {
        assert_eq!(classify_filename("IMG_2041.png"), ContentLabel::Text);
        assert_eq!(classify_filename("receipt.jpg"), ContentLabel::Text);
        assert_eq!(classify_filename(""), ContentLabel::Text);
    }
}
