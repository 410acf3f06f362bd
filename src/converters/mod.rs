//! Output converters for analyzed pages.
//!
//! Markdown is the only output format: every non-empty column becomes a
//! `# Column N:` section between the page's header and footer lines, and
//! pages are joined under `# Page N` headings.
//!
//! # Examples
//!
//! ```
//! use ocr_reflow::converters::{MarkdownRenderer, PageOutcome};
//!
//! let pages = vec![PageOutcome::Rendered("# Column 1:\n\nSoep\n".to_string()), PageOutcome::Empty];
//! let markdown = MarkdownRenderer::new().render_document(&pages);
//! assert!(markdown.ends_with("# Page 2\n\n_No text recognized on this page._"));
//! ```

pub mod markdown;

// Re-export main types
pub use markdown::{MarkdownRenderer, PageOutcome, EMPTY_PAGE_PLACEHOLDER};
