//! PDF rasterization with poppler's `pdftoppm`.

use crate::error::{Error, Result};
use crate::ocr::{PageRasterizer, RasterizedPages};
use std::path::{Path, PathBuf};
use std::process::Command;

const PAGE_PREFIX: &str = "page";

/// Runs `pdftoppm -png -scale-to N <pdf> <workdir>/page` and collects the
/// generated `page-N.png` images.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    /// Executable to run (default: `pdftoppm` from `PATH`)
    pub binary: PathBuf,
    /// Longest side of each page image in pixels (default: 1200)
    pub scale_to: u32,
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("pdftoppm"),
            scale_to: 1200,
        }
    }
}

impl PdftoppmRasterizer {
    /// Create a rasterizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target size of the longest page side.
    pub fn with_scale_to(mut self, scale_to: u32) -> Self {
        self.scale_to = scale_to;
        self
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, document: &Path) -> Result<RasterizedPages> {
        if !document.is_file() {
            return Err(Error::Rasterize(format!("document not found: {}", document.display())));
        }

        let workdir = tempfile::tempdir()?;
        let output = Command::new(&self.binary)
            .arg("-png")
            .arg("-scale-to")
            .arg(self.scale_to.to_string())
            .arg(document)
            .arg(workdir.path().join(PAGE_PREFIX))
            .output()
            .map_err(|e| Error::Rasterize(format!("failed to execute {}: {}", self.binary.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Rasterize(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let pages = collect_page_images(workdir.path())?;
        if pages.is_empty() {
            return Err(Error::Rasterize(format!("no pages produced for {}", document.display())));
        }

        log::info!("Rasterized {} page(s) from {}", pages.len(), document.display());
        Ok(RasterizedPages::in_workdir(pages, workdir))
    }
}

/// Page number encoded in a `page-N.png` file name.
///
/// pdftoppm zero-pads the number to the width of the last page number, so
/// `page-07.png` and `page-7.png` both yield 7.
pub fn page_number(path: &Path) -> Option<u32> {
    if path.extension()?.to_str()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let number = stem.strip_prefix(PAGE_PREFIX)?.strip_prefix('-')?;
    number.parse().ok()
}

/// All `page-N.png` files in `dir`, ordered by page number.
pub fn collect_page_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut numbered = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if let Some(number) = page_number(&path) {
            numbered.push((number, path));
        }
    }
    numbered.sort_by_key(|(number, _)| *number);
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}
