//! Extraction pipeline.
//!
//! Runs classify → OCR → structure parse → result generation per uploaded
//! file, strictly in upload order, then combines the per-file records into
//! one analysis output. One run at a time; re-entrant invocation is
//! rejected while a run is in flight.

use crate::classify::classify_filename;
use crate::config::OcrConfig;
use crate::error::{DataExtractError, Result};
use crate::extract::extract_structure;
use crate::ocr::{get_ocr_backend, OcrProgress};
use crate::types::{AnalysisOutput, ExtractionRecord, UploadedFile};
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// The four per-file pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    ContentDetection,
    OcrProcessing,
    StructureParsing,
    ResultGeneration,
}

impl StageKind {
    pub const ALL: [StageKind; 4] = [
        StageKind::ContentDetection,
        StageKind::OcrProcessing,
        StageKind::StructureParsing,
        StageKind::ResultGeneration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::ContentDetection => "content_detection",
            StageKind::OcrProcessing => "ocr_processing",
            StageKind::StructureParsing => "structure_parsing",
            StageKind::ResultGeneration => "result_generation",
        }
    }
}

/// Lifecycle of one stage for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    Pending,
    Active,
    Completed,
}

/// Progress events emitted to the pipeline observer.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A file has entered processing (0-based index into the batch).
    FileStarted { index: usize, filename: String },
    /// A stage changed state for the file currently processing.
    Stage { stage: StageKind, state: StageState },
    /// Fractional OCR progress forwarded from the backend.
    OcrProgress(OcrProgress),
    /// A file finished all four stages.
    FileCompleted { index: usize },
}

/// Observer callback receiving [`PipelineEvent`]s during a run.
pub type PipelineObserver = dyn Fn(PipelineEvent) + Send + Sync;

fn noop_observer(_: PipelineEvent) {}

/// Orchestrates analysis runs over batches of uploaded files.
pub struct Pipeline {
    ocr_config: OcrConfig,
    analyzing: Arc<AtomicBool>,
}

/// Clears the analyzing flag when the run exits, on success, error or panic.
struct AnalyzingGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for AnalyzingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Pipeline {
    pub fn new(ocr_config: OcrConfig) -> Self {
        Self {
            ocr_config,
            analyzing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a run is currently in flight.
    pub fn is_analyzing(&self) -> bool {
        self.analyzing.load(Ordering::SeqCst)
    }

    /// Analyze a batch of files without progress reporting.
    pub async fn analyze(&self, files: &[UploadedFile]) -> Result<AnalysisOutput> {
        self.analyze_with_observer(files, &noop_observer).await
    }

    /// Analyze a batch of files, emitting [`PipelineEvent`]s to `observer`.
    ///
    /// Files are processed strictly sequentially in slice order. An OCR
    /// failure aborts the whole batch and discards partial results.
    ///
    /// # Errors
    ///
    /// - `DataExtractError::Validation` - empty batch, or a run already in flight
    /// - `DataExtractError::Ocr` - the OCR backend failed for any file
    pub async fn analyze_with_observer(
        &self,
        files: &[UploadedFile],
        observer: &PipelineObserver,
    ) -> Result<AnalysisOutput> {
        if files.is_empty() {
            return Err(DataExtractError::validation("No files to analyze"));
        }

        // Single-run guard: only the caller that flips false -> true proceeds.
        if self
            .analyzing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(DataExtractError::validation(
                "An analysis run is already in progress",
            ));
        }
        let _guard = AnalyzingGuard {
            flag: Arc::clone(&self.analyzing),
        };

        let backend = get_ocr_backend(&self.ocr_config.backend)?;
        if !backend.supports_language(&self.ocr_config.language) {
            return Err(DataExtractError::validation(format!(
                "Backend '{}' does not support language '{}'",
                backend.name(),
                self.ocr_config.language
            )));
        }

        let mut records = Vec::with_capacity(files.len());

        for (index, file) in files.iter().enumerate() {
            tracing::info!(file = %file.name, index, "analyzing file");
            observer(PipelineEvent::FileStarted {
                index,
                filename: file.name.clone(),
            });

            let stage = |kind: StageKind, state: StageState| {
                observer(PipelineEvent::Stage { stage: kind, state });
            };
            for kind in StageKind::ALL {
                stage(kind, StageState::Pending);
            }

            stage(StageKind::ContentDetection, StageState::Active);
            let label = classify_filename(&file.name);
            tracing::debug!(file = %file.name, label = %label, "content detected");
            stage(StageKind::ContentDetection, StageState::Completed);

            stage(StageKind::OcrProcessing, StageState::Active);
            let ocr_result = backend
                .recognize(&file.bytes, &self.ocr_config, &|progress| {
                    observer(PipelineEvent::OcrProgress(progress));
                })
                .await?;
            stage(StageKind::OcrProcessing, StageState::Completed);

            stage(StageKind::StructureParsing, StageState::Active);
            let structured = extract_structure(label, &ocr_result);
            stage(StageKind::StructureParsing, StageState::Completed);

            stage(StageKind::ResultGeneration, StageState::Active);
            records.push(ExtractionRecord {
                label,
                filename: file.name.clone(),
                extracted_at: Utc::now(),
                record: structured,
            });
            stage(StageKind::ResultGeneration, StageState::Completed);

            observer(PipelineEvent::FileCompleted { index });
        }

        AnalysisOutput::combine(records)
    }
}
