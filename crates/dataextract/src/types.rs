//! Core data model shared across the extraction pipeline, converter and stores.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DataExtractError, Result};

/// Content label assigned by the classifier.
///
/// One label per uploaded file; drives which structure extractor runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentLabel {
    Table,
    Chart,
    Flowchart,
    Form,
    Mindmap,
    #[default]
    Text,
}

impl ContentLabel {
    /// All labels, in classifier priority order.
    pub const ALL: [ContentLabel; 6] = [
        ContentLabel::Table,
        ContentLabel::Chart,
        ContentLabel::Flowchart,
        ContentLabel::Form,
        ContentLabel::Mindmap,
        ContentLabel::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentLabel::Table => "table",
            ContentLabel::Chart => "chart",
            ContentLabel::Flowchart => "flowchart",
            ContentLabel::Form => "form",
            ContentLabel::Mindmap => "mindmap",
            ContentLabel::Text => "text",
        }
    }
}

impl std::fmt::Display for ContentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output serialization format for the structured editor buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Csv,
    Xml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Json,
        OutputFormat::Yaml,
        OutputFormat::Csv,
        OutputFormat::Xml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Csv => "csv",
            OutputFormat::Xml => "xml",
        }
    }

    /// File extension used for downloads and bulk export entries.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = DataExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "csv" => Ok(OutputFormat::Csv),
            "xml" => Ok(OutputFormat::Xml),
            other => Err(DataExtractError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// An uploaded file waiting for analysis.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub id: Uuid,
    /// Display name, also the classifier input.
    pub name: String,
    pub bytes: Vec<u8>,
    /// Human-formatted size string ("1.5 MB").
    pub size: String,
    pub label: ContentLabel,
    pub uploaded_at: DateTime<Utc>,
}

/// Node in an extracted flowchart. Ids are sequential within one extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowchartNode {
    pub id: u32,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

/// Directed edge between two flowchart node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowchartEdge {
    pub from: u32,
    pub to: u32,
    pub label: String,
}

/// A form field recovered from a label-like OCR line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
}

/// Label-specific structured shape produced by the heuristic extractors.
///
/// The serde `type` tag matches the content label the shape was extracted
/// for, except that mindmap input falls back to the `text` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuredRecord {
    Table {
        headers: Vec<String>,
        data: Vec<IndexMap<String, String>>,
    },
    Flowchart {
        nodes: Vec<FlowchartNode>,
        edges: Vec<FlowchartEdge>,
    },
    Form {
        fields: Vec<FormField>,
    },
    Chart {
        data: Vec<f64>,
        labels: Vec<String>,
        #[serde(rename = "chartType")]
        chart_type: String,
    },
    Text {
        content: String,
        lines: Vec<String>,
        #[serde(rename = "wordCount")]
        word_count: usize,
    },
}

/// One file's extraction outcome: the structured shape plus provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Classifier label the extraction ran under. Not part of the wire
    /// format; the serialized `type` tag comes from the record itself.
    #[serde(skip, default)]
    pub label: ContentLabel,
    pub filename: String,
    #[serde(rename = "extractedAt")]
    pub extracted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: StructuredRecord,
}

/// Envelope for multi-file analysis runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiFileExtraction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "extractedAt")]
    pub extracted_at: DateTime<Utc>,
    #[serde(rename = "fileCount")]
    pub file_count: usize,
    pub results: Vec<ExtractionRecord>,
}

/// Final output of one analysis run.
///
/// A single file's result passes through unwrapped; multiple files wrap
/// into a [`MultiFileExtraction`] envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
    Single(Box<ExtractionRecord>),
    Multi(MultiFileExtraction),
}

impl AnalysisOutput {
    /// Combine per-file records into the run output.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty record list; the pipeline
    /// never produces one.
    pub fn combine(mut records: Vec<ExtractionRecord>) -> Result<Self> {
        match records.len() {
            0 => Err(DataExtractError::validation(
                "analysis produced no extraction records",
            )),
            1 => Ok(AnalysisOutput::Single(Box::new(records.remove(0)))),
            n => Ok(AnalysisOutput::Multi(MultiFileExtraction {
                kind: "multi_file_extraction".to_string(),
                extracted_at: Utc::now(),
                file_count: n,
                results: records,
            })),
        }
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Canonical 2-space pretty-printed JSON of the run output.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One saved snapshot of the editor buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub content: String,
    pub format: OutputFormat,
    pub timestamp: DateTime<Utc>,
    pub preview: String,
}

/// User preferences, persisted on every change.
///
/// Serialized field names match the original storage record
/// (`ocrLanguage`, `ocrAccuracy`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub ocr_language: String,
    /// 1 = fast, 2 = medium, 3 = high.
    pub ocr_accuracy: u8,
    pub default_format: OutputFormat,
    pub language: String,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ocr_language: "eng".to_string(),
            ocr_accuracy: 2,
            default_format: OutputFormat::Json,
            language: "en".to_string(),
            theme: "light".to_string(),
        }
    }
}

impl Settings {
    /// Display label for the accuracy slider position.
    pub fn accuracy_label(&self) -> &'static str {
        match self.ocr_accuracy {
            1 => "Fast",
            3 => "High",
            _ => "Medium",
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=3).contains(&self.ocr_accuracy) {
            return Err(DataExtractError::validation(format!(
                "OCR accuracy must be 1-3, got {}",
                self.ocr_accuracy
            )));
        }
        Ok(())
    }
}
