//! Page pipeline: word boxes in, Markdown out.
//!
//! ```text
//! page image / captured OCR output
//!     ↓
//! [WordBoxSource] or [parse_word_boxes]   (→ Vec<WordBox>)
//!     ↓
//! [segment_bands]                          header / main / footer
//!     ↓
//! [ColumnDetector]                         main band → N columns
//!     ↓
//! [group_lines]                            every band and column
//!     ↓
//! [MarkdownRenderer]                       page body, then document
//! ```
//!
//! Pages are independent: a failing page becomes a placeholder body and the
//! rest of the document is still rendered. With the `parallel` feature pages
//! are processed on the rayon thread pool; output order is unchanged.
//!
//! [WordBoxSource]: crate::ocr::WordBoxSource
//! [parse_word_boxes]: crate::parser::parse_word_boxes
//! [segment_bands]: crate::layout::segment_bands
//! [ColumnDetector]: crate::layout::ColumnDetector
//! [group_lines]: crate::layout::group_lines
//! [MarkdownRenderer]: crate::converters::MarkdownRenderer

pub mod config;

pub use config::{LayoutConfig, LayoutPreset, OutputConfig};

use crate::converters::{MarkdownRenderer, PageOutcome};
use crate::error::Result;
use crate::layout::{Page, WordBox};
use crate::ocr::WordBoxSource;
use crate::parser::{parse_word_boxes, InputFormat};
use std::path::PathBuf;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Orchestrates layout analysis and rendering for pages and documents.
///
/// # Examples
///
/// ```
/// use ocr_reflow::parser::InputFormat;
/// use ocr_reflow::pipeline::PagePipeline;
///
/// let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
///            5\t1\t1\t1\t1\t1\t10\t10\t60\t20\t91\tVoorgerecht\n";
///
/// let pipeline = PagePipeline::new();
/// let markdown = pipeline.process_records(&[(tsv.to_string(), InputFormat::Tsv)]);
/// assert_eq!(markdown, "# Page 1\n\n# Column 1:\n\nVoorgerecht\n");
/// ```
#[derive(Debug, Clone)]
pub struct PagePipeline {
    config: LayoutConfig,
    renderer: MarkdownRenderer,
}

impl PagePipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        let renderer = MarkdownRenderer::with_output(config.output.clone());
        Self { config, renderer }
    }

    /// Get the pipeline configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Get the renderer used for pages and documents.
    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// Build the page structure for one page's word boxes.
    pub fn analyze_page<'a>(&self, number: usize, words: &'a [WordBox]) -> Page<'a> {
        Page::analyze(number, words, &self.config)
    }

    /// Turn one page's word boxes, or the error that prevented obtaining
    /// them, into a page outcome. Never fails.
    pub fn process_page(&self, number: usize, words: Result<Vec<WordBox>>) -> PageOutcome {
        let words = match words {
            Ok(words) => words,
            Err(e) => {
                log::warn!("Page {}: failed ({})", number, e);
                return PageOutcome::Failed(e.to_string());
            },
        };

        if words.is_empty() {
            log::info!("Page {}: no text recognized", number);
            return PageOutcome::Empty;
        }

        let page = self.analyze_page(number, &words);
        log::info!(
            "Page {}: {} word(s), {} header line(s), {} non-empty column(s), {} footer line(s)",
            number,
            page.word_count(),
            page.header.len(),
            page.columns.iter().filter(|c| !c.is_empty()).count(),
            page.footer.len()
        );
        PageOutcome::Rendered(self.renderer.render_page(&page))
    }

    /// OCR every page image with `source` and render the document.
    ///
    /// Page numbers follow slice order, starting at 1.
    pub fn process_document(&self, source: &dyn WordBoxSource, pages: &[PathBuf]) -> String {
        log::info!("Processing {} page(s) with {}", pages.len(), source.name());
        let outcomes = self.collect_outcomes(pages, |path| source.word_boxes(path));
        self.render_outcomes(&outcomes)
    }

    /// Render a document from already-captured OCR output, one record per page.
    pub fn process_records(&self, records: &[(String, InputFormat)]) -> String {
        let outcomes = self.collect_outcomes(records, |(content, format)| {
            parse_word_boxes(content, *format, &self.config.filter)
        });
        self.render_outcomes(&outcomes)
    }

    /// Render a document from per-page outcomes.
    pub fn render_outcomes(&self, outcomes: &[PageOutcome]) -> String {
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        if failed > 0 {
            log::warn!("{} of {} page(s) failed", failed, outcomes.len());
        }
        self.renderer.render_document(outcomes)
    }

    #[cfg(not(feature = "parallel"))]
    fn collect_outcomes<T, F>(&self, pages: &[T], words_for: F) -> Vec<PageOutcome>
    where
        F: Fn(&T) -> Result<Vec<WordBox>>,
    {
        pages
            .iter()
            .enumerate()
            .map(|(i, page)| self.process_page(i + 1, words_for(page)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn collect_outcomes<T, F>(&self, pages: &[T], words_for: F) -> Vec<PageOutcome>
    where
        T: Sync,
        F: Fn(&T) -> Result<Vec<WordBox>> + Sync,
    {
        pages
            .par_iter()
            .enumerate()
            .map(|(i, page)| self.process_page(i + 1, words_for(page)))
            .collect()
    }
}

impl Default for PagePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geometry::PixelRect;
    use std::path::Path;

    fn word(text: &str, left: u32, top: u32) -> WordBox {
        WordBox::new(text, PixelRect::new(left, top, 60, 20), 90.0).unwrap()
    }

    /// Serves canned word boxes keyed by file stem; `missing` fails.
    struct CannedSource;

    impl WordBoxSource for CannedSource {
        fn word_boxes(&self, page_image: &Path) -> Result<Vec<WordBox>> {
            match page_image.file_stem().and_then(|s| s.to_str()) {
                Some("full") => Ok(vec![word("Soep", 10, 10), word("Brood", 10, 300), word("Einde", 10, 900)]),
                Some("blank") => Ok(Vec::new()),
                _ => Err(Error::Ocr("tesseract exited with status 1".to_string())),
            }
        }

        fn name(&self) -> &'static str {
            "canned"
        }
    }

    #[test]
    fn test_process_page_empty() {
        let pipeline = PagePipeline::new();
        assert_eq!(pipeline.process_page(1, Ok(Vec::new())), PageOutcome::Empty);
    }

    #[test]
    fn test_process_page_failure() {
        let pipeline = PagePipeline::new();
        let outcome = pipeline.process_page(2, Err(Error::Ocr("boom".to_string())));
        assert_eq!(outcome, PageOutcome::Failed("OCR error: boom".to_string()));
    }

    #[test]
    fn test_process_page_rendered() {
        let pipeline = PagePipeline::new();
        let outcome = pipeline.process_page(1, Ok(vec![word("Soep", 10, 10), word("Brood", 10, 300), word("Einde", 10, 900)]));
        assert_eq!(
            outcome,
            PageOutcome::Rendered("Soep\n\n# Column 1:\n\nBrood\n\nEinde".to_string())
        );
    }

    #[test]
    fn test_process_document_keeps_page_order() {
        let pipeline = PagePipeline::new();
        let pages: Vec<PathBuf> = ["full.png", "missing.png", "blank.png"].iter().map(PathBuf::from).collect();
        let markdown = pipeline.process_document(&CannedSource, &pages);
        assert_eq!(
            markdown,
            "# Page 1\n\nSoep\n\n# Column 1:\n\nBrood\n\nEinde\
             \n---\n\
             # Page 2\n\n_Error: OCR error: tesseract exited with status 1_\
             \n---\n\
             # Page 3\n\n_No text recognized on this page._"
        );
    }

    #[test]
    fn test_process_document_without_pages() {
        assert_eq!(PagePipeline::new().process_document(&CannedSource, &[]), "");
    }

    #[test]
    fn test_process_records_broken_markup() {
        let pipeline = PagePipeline::new();
        let markdown = pipeline.process_records(&[("<html><body></div></html>".to_string(), InputFormat::Hocr)]);
        assert!(markdown.starts_with("# Page 1\n\n_Error: "));
    }

    #[test]
    fn test_config_output_reaches_renderer() {
        let mut config = LayoutConfig::default();
        config.output.page_headings = false;
        let pipeline = PagePipeline::with_config(config);
        let markdown = pipeline.process_records(&[(String::new(), InputFormat::Tsv)]);
        assert_eq!(markdown, "_No text recognized on this page._");
    }
}
