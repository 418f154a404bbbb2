//! DataExtract - Screenshot-to-Structured-Data Extraction Library
//!
//! DataExtract turns images of tables, flowcharts, forms and charts into
//! editable structured data. It classifies an upload by name, runs OCR
//! through a pluggable backend, applies a per-label heuristic extractor and
//! renders the result as JSON, YAML, CSV or XML.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dataextract::config::OcrConfig;
//! use dataextract::files::FileSet;
//! use dataextract::pipeline::Pipeline;
//!
//! # async fn run() -> dataextract::Result<()> {
//! dataextract::ocr::register_default_backends();
//!
//! let mut files = FileSet::new();
//! files.add("sales_table.png", std::fs::read("sales_table.png")?)?;
//!
//! let pipeline = Pipeline::new(OcrConfig::default());
//! let output = pipeline.analyze(files.files()).await?;
//! println!("{}", output.to_pretty_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Classifier** (`classify`): filename keywords to content label
//! - **OCR** (`ocr`): backend trait, registry, Tesseract CLI wrapper
//! - **Extractors** (`extract`): one heuristic parser per content label
//! - **Pipeline** (`pipeline`): classify → OCR → parse → result, per file
//! - **Converter** (`convert`): JSON plus presentational YAML/CSV/XML
//! - **Stores** (`store`): capped history and persisted settings
//! - **Export** (`export`): zip bundles and single-result downloads

#![deny(unsafe_code)]

pub mod classify;
pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod extract;
pub mod files;
pub mod ocr;
pub mod pipeline;
pub mod store;
pub mod types;

pub use error::{DataExtractError, Result};
pub use types::*;

pub use classify::classify_filename;
pub use config::{DataExtractConfig, OcrConfig};
pub use convert::render;
pub use extract::extract_structure;
pub use files::{accept_upload, format_file_size, FileSet};
pub use pipeline::{Pipeline, PipelineEvent, StageKind, StageState};
pub use store::{HistoryStore, JsonFileStore, KeyValueStore, MemoryStore, SettingsStore};
