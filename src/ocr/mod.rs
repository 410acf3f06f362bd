//! OCR collaborators: where word boxes come from.
//!
//! The layout pipeline only needs a [`WordBoxSource`] that turns one page
//! image into word boxes. Implementations:
//!
//! - [`TesseractSource`]: runs the `tesseract` binary and parses its TSV or
//!   hOCR output
//! - [`RecordFileSource`]: reads OCR output captured earlier
//!
//! Multi-page documents are first split into page images by a
//! [`PageRasterizer`] such as [`PdftoppmRasterizer`].

pub mod rasterizer;
pub mod record_files;
pub mod tesseract;

pub use rasterizer::PdftoppmRasterizer;
pub use record_files::RecordFileSource;
pub use tesseract::TesseractSource;

use crate::error::Result;
use crate::layout::WordBox;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Produces the word boxes of one page.
///
/// Implementations must be thread-safe so pages can be processed in
/// parallel.
pub trait WordBoxSource: Send + Sync {
    /// Recognize the words on one page image.
    fn word_boxes(&self, page_image: &Path) -> Result<Vec<WordBox>>;

    /// Get the source name (for logging).
    fn name(&self) -> &'static str;
}

/// Splits a document into one image per page.
pub trait PageRasterizer: Send + Sync {
    /// Rasterize every page of `document`, in page order.
    fn rasterize(&self, document: &Path) -> Result<RasterizedPages>;
}

/// Page images in page order.
///
/// When the images were generated into a temporary directory, that directory
/// is owned here and removed when this value is dropped.
#[derive(Debug)]
pub struct RasterizedPages {
    pages: Vec<PathBuf>,
    _workdir: Option<TempDir>,
}

impl RasterizedPages {
    /// Wrap existing page images; nothing is deleted on drop.
    pub fn from_images(pages: Vec<PathBuf>) -> Self {
        Self {
            pages,
            _workdir: None,
        }
    }

    /// Wrap page images living in `workdir`, which is removed on drop.
    pub fn in_workdir(pages: Vec<PathBuf>, workdir: TempDir) -> Self {
        Self {
            pages,
            _workdir: Some(workdir),
        }
    }

    /// Page image paths, first page first.
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no page was produced.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workdir_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let image = root.join("page-1.png");
        std::fs::write(&image, b"png").unwrap();

        let pages = RasterizedPages::in_workdir(vec![image.clone()], dir);
        assert_eq!(pages.len(), 1);
        assert!(image.exists());
        drop(pages);
        assert!(!root.exists());
    }

    #[test]
    fn test_from_images_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("scan.png");
        std::fs::write(&image, b"png").unwrap();

        drop(RasterizedPages::from_images(vec![image.clone()]));
        assert!(image.exists());
    }
}
