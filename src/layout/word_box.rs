//! Word box representation for layout analysis.
//!
//! A [`WordBox`] is one recognized word with its pixel bounding box, as
//! reported by the OCR engine. Word boxes are immutable once constructed;
//! bands, columns and lines borrow them and never modify them.

use crate::error::{Error, Result};
use crate::geometry::PixelRect;
use serde::Serialize;

/// Hierarchical position hints reported by the OCR engine.
///
/// These are not used by the layout algorithms; they are kept so that a
/// word in the output can be traced back to the engine's own segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WordPosition {
    /// Text block (Tesseract `block_num`, hOCR `ocr_carea`)
    pub block: u32,
    /// Paragraph within the block
    pub paragraph: u32,
    /// Line within the paragraph
    pub line: u32,
    /// Word within the line
    pub word: u32,
}

/// One recognized word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordBox {
    text: String,
    bbox: PixelRect,
    confidence: f32,
    position: Option<WordPosition>,
}

impl WordBox {
    /// Create a word box.
    ///
    /// The text is trimmed; blank text is a contract violation and returns
    /// [`Error::EmptyText`]. Parsers drop blank words before construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_reflow::geometry::PixelRect;
    /// use ocr_reflow::layout::WordBox;
    ///
    /// let word = WordBox::new(" Dressing: ", PixelRect::new(620, 410, 140, 32), 91.5).unwrap();
    /// assert_eq!(word.text(), "Dressing:");
    /// assert_eq!(word.right(), 760);
    /// ```
    pub fn new(text: impl Into<String>, bbox: PixelRect, confidence: f32) -> Result<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyText);
        }
        let text = if trimmed.len() == text.len() {
            text
        } else {
            trimmed.to_string()
        };
        Ok(Self {
            text,
            bbox,
            confidence,
            position: None,
        })
    }

    /// Attach the engine's hierarchical position hints.
    pub fn with_position(mut self, position: WordPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// The recognized text (trimmed, never empty).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bounding box in image pixels.
    pub fn bbox(&self) -> PixelRect {
        self.bbox
    }

    /// Recognition confidence (0-100).
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Engine position hints, if the source format carried them.
    pub fn position(&self) -> Option<WordPosition> {
        self.position
    }

    /// Left edge x-coordinate.
    pub fn left(&self) -> u32 {
        self.bbox.left
    }

    /// Top edge y-coordinate.
    pub fn top(&self) -> u32 {
        self.bbox.top
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.bbox.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.bbox.height
    }

    /// Right edge x-coordinate (`left + width`).
    pub fn right(&self) -> u32 {
        self.bbox.right()
    }

    /// Bottom edge y-coordinate (`top + height`).
    pub fn bottom(&self) -> u32 {
        self.bbox.bottom()
    }
}
