//! Markdown rendering of page structures.
//!
//! Output layout for one page:
//!
//! ```text
//! <header line>
//! <header line>
//!
//! # Column 1:
//!
//! <line>
//! <line>
//!
//! # Column 2:
//!
//! <line>
//!
//! <footer line>
//! ```
//!
//! Multi-page documents prefix each page with `# Page N` and separate pages
//! with a `---` line.

use crate::layout::{Line, Page};
use crate::pipeline::config::OutputConfig;

/// Body used for a page on which no word survived parsing.
pub const EMPTY_PAGE_PLACEHOLDER: &str = "_No text recognized on this page._";

/// What happened to one page of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Rendered Markdown body
    Rendered(String),
    /// The page had no words
    Empty,
    /// OCR or parsing failed for this page
    Failed(String),
}

impl PageOutcome {
    /// Markdown body for this page, placeholders included.
    pub fn body(&self) -> String {
        match self {
            Self::Rendered(markdown) => markdown.clone(),
            Self::Empty => EMPTY_PAGE_PLACEHOLDER.to_string(),
            Self::Failed(reason) => format!("_Error: {}_", reason),
        }
    }

    /// True for a failed page.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Renders pages as column-ordered Markdown.
///
/// # Examples
///
/// ```
/// use ocr_reflow::converters::MarkdownRenderer;
/// use ocr_reflow::geometry::PixelRect;
/// use ocr_reflow::layout::{Page, WordBox};
/// use ocr_reflow::pipeline::LayoutConfig;
///
/// let words = vec![WordBox::new("Saus", PixelRect::new(10, 10, 60, 20), 90.0).unwrap()];
/// let page = Page::analyze(1, &words, &LayoutConfig::default());
///
/// let markdown = MarkdownRenderer::new().render_page(&page);
/// assert_eq!(markdown, "# Column 1:\n\nSaus\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    output: OutputConfig,
}

impl MarkdownRenderer {
    /// Create a renderer with default output options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given output options.
    pub fn with_output(output: OutputConfig) -> Self {
        Self { output }
    }

    /// Render one page: header, non-empty columns, footer.
    pub fn render_page(&self, page: &Page<'_>) -> String {
        let mut markdown: Vec<String> = Vec::new();

        if !page.header.is_empty() {
            markdown.extend(page.header.iter().map(Line::text));
            markdown.push(String::new());
        }

        for column in page.columns.iter().filter(|c| !c.is_empty()) {
            if self.output.column_headings {
                markdown.push(format!("# Column {}:", column.index + 1));
                markdown.push(String::new());
            }
            markdown.extend(column.lines.iter().map(Line::text));
            markdown.push(String::new());
        }

        if !page.footer.is_empty() {
            if markdown.last().is_some_and(|line| !line.is_empty()) {
                markdown.push(String::new());
            }
            markdown.extend(page.footer.iter().map(Line::text));
        }

        markdown.join("\n")
    }

    /// Join page outcomes into one document.
    ///
    /// Pages are numbered from 1 in slice order.
    pub fn render_document(&self, pages: &[PageOutcome]) -> String {
        let separator = format!("\n{}\n", self.output.page_separator);
        pages
            .iter()
            .enumerate()
            .map(|(i, outcome)| {
                if self.output.page_headings {
                    format!("# Page {}\n\n{}", i + 1, outcome.body())
                } else {
                    outcome.body()
                }
            })
            .collect::<Vec<_>>()
            .join(&separator)
    }
}
