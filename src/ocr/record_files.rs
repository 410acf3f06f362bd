//! Word boxes from OCR output captured on disk.
//!
//! Useful to re-run layout with different settings without running OCR
//! again: save `tesseract page.png page tsv` output once, then point the
//! pipeline at the `.tsv` files.

use crate::error::Result;
use crate::layout::WordBox;
use crate::ocr::WordBoxSource;
use crate::parser::{parse_word_boxes, InputFormat, WordFilter};
use std::path::Path;

/// Treats each "page image" path as a TSV or hOCR file.
///
/// The format comes from the file extension when it is recognized, and from
/// the content otherwise.
#[derive(Debug, Clone, Default)]
pub struct RecordFileSource {
    /// Force a format instead of detecting it
    pub format: Option<InputFormat>,
    /// Record filter applied while parsing
    pub filter: WordFilter,
}

impl RecordFileSource {
    /// Create a source that detects the format per file.
    pub fn new(filter: WordFilter) -> Self {
        Self { format: None, filter }
    }

    /// Force the input format.
    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl WordBoxSource for RecordFileSource {
    fn word_boxes(&self, page_image: &Path) -> Result<Vec<WordBox>> {
        let content = std::fs::read_to_string(page_image)?;
        let format = self
            .format
            .or_else(|| InputFormat::from_extension(page_image))
            .unwrap_or_else(|| InputFormat::detect(&content));
        log::debug!("Reading {:?} records from {}", format, page_image.display());
        parse_word_boxes(&content, format, &self.filter)
    }

    fn name(&self) -> &'static str {
        "record files"
    }
}
