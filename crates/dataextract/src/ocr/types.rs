//! OCR result types.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Smallest box covering both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = (self.left + self.width).max(other.left + other.width);
        let bottom = (self.top + self.height).max(other.top + other.height);
        BoundingBox {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }
}

/// A single recognized word with position and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSpan {
    pub text: String,
    pub bbox: BoundingBox,
    /// Engine confidence, 0.0-100.0.
    pub confidence: f32,
}

/// A recognized line of text, reassembled from its words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpan {
    pub text: String,
    pub bbox: BoundingBox,
}

/// Output of a single OCR pass over one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OcrResult {
    /// Full recognized text, lines joined with `\n`.
    pub text: String,
    /// Individual words in reading order.
    pub words: Vec<WordSpan>,
    /// Lines in reading order.
    pub lines: Vec<LineSpan>,
}

impl OcrResult {
    /// Build a result from plain text only, without positional data.
    ///
    /// Lines are split on `\n`; words get empty bounding boxes. Used by
    /// backends that cannot report geometry.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = text
            .lines()
            .map(|l| LineSpan {
                text: l.to_string(),
                bbox: BoundingBox::default(),
            })
            .collect();
        let words = text
            .split_whitespace()
            .map(|w| WordSpan {
                text: w.to_string(),
                bbox: BoundingBox::default(),
                confidence: 0.0,
            })
            .collect();
        Self { text, words, lines }
    }

    /// Mean word confidence, or `None` when no words carry one.
    pub fn mean_confidence(&self) -> Option<f32> {
        if self.words.is_empty() {
            return None;
        }
        let sum: f32 = self.words.iter().map(|w| w.confidence).sum();
        Some(sum / self.words.len() as f32)
    }
}

/// Progress report emitted by a backend during recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrProgress {
    /// Completion fraction in `[0.0, 1.0]`.
    pub fraction: f32,
    /// Short human-readable phase description.
    pub message: String,
}

impl OcrProgress {
    pub fn new(fraction: f32, message: impl Into<String>) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_union() {
        let a = BoundingBox { left: 10, top: 10, width: 20, height: 10 };
        let b = BoundingBox { left: 40, top: 5, width: 10, height: 30 };
        let u = a.union(&b);
        assert_eq!(u, BoundingBox { left: 10, top: 5, width: 40, height: 30 });
    }

    #[test]
    fn test_from_text_splits_lines_and_words() {
        let result = OcrResult::from_text("Name: Alice\nAge: 30");
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].text, "Name: Alice");
        assert_eq!(result.words.len(), 4);
        assert_eq!(result.words[3].text, "30");
    }

    #[test]
    fn test_mean_confidence_empty() {
        assert!(OcrResult::default().mean_confidence().is_none());
    }

    #[test]
    fn test_progress_clamps_fraction() {
        assert_eq!(OcrProgress::new(1.5, "done").fraction, 1.0);
        assert_eq!(OcrProgress::new(-0.2, "start").fraction, 0.0);
    }
}
