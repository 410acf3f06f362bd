//! Word boxes from the `tesseract` command-line tool.

use crate::error::{Error, Result};
use crate::layout::WordBox;
use crate::ocr::WordBoxSource;
use crate::parser::{parse_word_boxes, InputFormat, WordFilter};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs `tesseract <image> stdout --psm P --oem O -l LANG tsv|hocr` and parses
/// the captured output.
#[derive(Debug, Clone)]
pub struct TesseractSource {
    /// Executable to run (default: `tesseract` from `PATH`)
    pub binary: PathBuf,
    /// Language code(s) passed to `-l` (default: `nld`)
    pub language: String,
    /// Page segmentation mode (default: 3, fully automatic)
    pub psm: u32,
    /// OCR engine mode (default: 1, LSTM only)
    pub oem: u32,
    /// Output format requested from tesseract (default: TSV)
    pub format: InputFormat,
    /// Record filter applied while parsing
    pub filter: WordFilter,
}

impl Default for TesseractSource {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            language: "nld".to_string(),
            psm: 3,
            oem: 1,
            format: InputFormat::Tsv,
            filter: WordFilter::default(),
        }
    }
}

impl TesseractSource {
    /// Create a source with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recognition language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the page segmentation mode.
    pub fn with_psm(mut self, psm: u32) -> Self {
        self.psm = psm;
        self
    }

    /// Set the requested output format.
    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the record filter.
    pub fn with_filter(mut self, filter: WordFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Command line arguments for one page image.
    pub fn args(&self, page_image: &Path) -> Vec<String> {
        vec![
            page_image.to_string_lossy().into_owned(),
            "stdout".to_string(),
            "--psm".to_string(),
            self.psm.to_string(),
            "--oem".to_string(),
            self.oem.to_string(),
            "-l".to_string(),
            self.language.clone(),
            self.format.tesseract_config().to_string(),
        ]
    }

    /// Run tesseract and return its raw output.
    pub fn recognize(&self, page_image: &Path) -> Result<String> {
        if !page_image.is_file() {
            return Err(Error::Ocr(format!("page image not found: {}", page_image.display())));
        }

        log::debug!("Running {} on {}", self.binary.display(), page_image.display());
        let output = Command::new(&self.binary)
            .args(self.args(page_image))
            .output()
            .map_err(|e| Error::Ocr(format!("failed to execute {}: {}", self.binary.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Ocr(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl WordBoxSource for TesseractSource {
    fn word_boxes(&self, page_image: &Path) -> Result<Vec<WordBox>> {
        let output = self.recognize(page_image)?;
        parse_word_boxes(&output, self.format, &self.filter)
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let source = TesseractSource::new();
        assert_eq!(
            source.args(Path::new("/tmp/page-1.png")),
            vec!["/tmp/page-1.png", "stdout", "--psm", "3", "--oem", "1", "-l", "nld", "tsv"]
        );
    }

    #[test]
    fn test_builder_args() {
        let source = TesseractSource::new()
            .with_language("eng+nld")
            .with_psm(6)
            .with_format(InputFormat::Hocr);
        let args = source.args(Path::new("scan.png"));
        assert_eq!(args[3], "6");
        assert_eq!(args[7], "eng+nld");
        assert_eq!(args[8], "hocr");
    }

    #[test]
    fn test_missing_image_is_ocr_error() {
        let source = TesseractSource::new();
        let result = source.word_boxes(Path::new("/nonexistent/page-1.png"));
        assert!(matches!(result, Err(Error::Ocr(_))));
    }

    #[test]
    fn test_missing_binary_is_ocr_error() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("page-1.png");
        std::fs::write(&image, b"png").unwrap();

        let source = TesseractSource {
            binary: dir.path().join("no-such-tesseract"),
            ..Default::default()
        };
        assert!(matches!(source.word_boxes(&image), Err(Error::Ocr(_))));
    }
}
