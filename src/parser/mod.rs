//! Parsers for OCR word-level output.
//!
//! Two input shapes are supported:
//! - **TSV**: Tesseract's tab-separated table (`tesseract img stdout tsv`)
//! - **hOCR**: markup with a `bbox L T R B` title on each word element
//!   (`tesseract img stdout hocr`)
//!
//! Both produce [`WordBox`]es in source order. Malformed records are skipped
//! rather than reported; ordering for output is established later by the
//! layout stage.

pub mod hocr;
pub mod tsv;

pub use hocr::parse_hocr;
pub use tsv::parse_tsv;

use crate::error::Result;
use crate::layout::WordBox;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Format of captured OCR output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Tab-separated word table
    Tsv,
    /// hOCR markup
    Hocr,
}

impl InputFormat {
    /// Guess the format from content: markup starts with `<`.
    pub fn detect(content: &str) -> Self {
        if content.trim_start().starts_with('<') {
            Self::Hocr
        } else {
            Self::Tsv
        }
    }

    /// Format implied by a file extension, if any.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "tsv" => Some(Self::Tsv),
            "hocr" | "html" | "xhtml" => Some(Self::Hocr),
            _ => None,
        }
    }

    /// Name used by Tesseract's output configs.
    pub fn tesseract_config(&self) -> &'static str {
        match self {
            Self::Tsv => "tsv",
            Self::Hocr => "hocr",
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" => Ok(Self::Tsv),
            "hocr" | "html" => Ok(Self::Hocr),
            other => Err(crate::error::Error::Config(format!("unknown input format '{}'", other))),
        }
    }
}

/// Record-level filter applied while parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordFilter {
    /// Words below this confidence are dropped (default: 0.0, which removes
    /// the negative-confidence structural rows)
    pub min_confidence: f32,
    /// Exact confidence values treated as synthetic noise (default: none;
    /// some Tesseract setups emit `95.0` for artefacts)
    pub excluded_confidences: Vec<f32>,
    /// Drop words taller than this many pixels (default: no limit)
    pub max_word_height: Option<u32>,
}

impl Default for WordFilter {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            excluded_confidences: Vec::new(),
            max_word_height: None,
        }
    }
}

impl WordFilter {
    /// Exclude an exact confidence value.
    pub fn excluding(mut self, confidence: f32) -> Self {
        self.excluded_confidences.push(confidence);
        self
    }

    /// Whether a record with this confidence and height is kept.
    pub fn accepts(&self, confidence: f32, height: u32) -> bool {
        if confidence.is_nan() || confidence < self.min_confidence {
            return false;
        }
        if self
            .excluded_confidences
            .iter()
            .any(|&excluded| (excluded - confidence).abs() < f32::EPSILON * 100.0)
        {
            return false;
        }
        self.max_word_height.map_or(true, |max| height <= max)
    }
}

/// Parse captured OCR output into word boxes.
///
/// TSV parsing never fails; hOCR parsing fails only when the markup itself
/// is not well-formed.
pub fn parse_word_boxes(content: &str, format: InputFormat, filter: &WordFilter) -> Result<Vec<WordBox>> {
    match format {
        InputFormat::Tsv => Ok(parse_tsv(content, filter)),
        InputFormat::Hocr => parse_hocr(content, filter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(InputFormat::detect("level\tpage_num"), InputFormat::Tsv);
        assert_eq!(InputFormat::detect("\n  <?xml version=\"1.0\"?>"), InputFormat::Hocr);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_extension(Path::new("p1.TSV")), Some(InputFormat::Tsv));
        assert_eq!(InputFormat::from_extension(Path::new("p1.hocr")), Some(InputFormat::Hocr));
        assert_eq!(InputFormat::from_extension(Path::new("p1.png")), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("HOCR".parse::<InputFormat>().unwrap(), InputFormat::Hocr);
        assert!("pdf".parse::<InputFormat>().is_err());
    }

    #[test]
    fn test_filter_defaults() {
        let filter = WordFilter::default();
        assert!(filter.accepts(0.0, 20));
        assert!(filter.accepts(96.5, 20));
        assert!(!filter.accepts(-1.0, 20));
        assert!(!filter.accepts(f32::NAN, 20));
    }

    #[test]
    fn test_filter_excluded_confidence() {
        let filter = WordFilter::default().excluding(95.0);
        assert!(!filter.accepts(95.0, 20));
        assert!(filter.accepts(95.5, 20));
    }

    #[test]
    fn test_filter_max_height() {
        let filter = WordFilter {
            max_word_height: Some(100),
            ..Default::default()
        };
        assert!(filter.accepts(90.0, 100));
        assert!(!filter.accepts(90.0, 101));
    }
}
