//! Header/main/footer band segmentation.
//!
//! A page's words are split into three horizontal strips using thresholds
//! measured from the vertical extent of the recognized text (not of the
//! image), so blank margins do not shift the bands.

use crate::layout::word_box::WordBox;
use serde::{Deserialize, Serialize};

/// One of the three horizontal strips of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Words above the header threshold
    Header,
    /// Body text between the thresholds
    Main,
    /// Words below the footer threshold
    Footer,
}

/// How the header and footer thresholds are derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BandMode {
    /// Fractions of the text span `max_bottom - min_top`.
    Fractional {
        /// Header band height as a fraction of the span (default: 0.15)
        header_fraction: f64,
        /// Footer band height as a fraction of the span (default: 0.15)
        footer_fraction: f64,
    },
    /// Absolute pixel offsets, for inputs with consistent page geometry.
    FixedPixels {
        /// Header band height below `min_top` (default: 200)
        header_offset: u32,
        /// Footer band height above `max_bottom` (default: 150)
        footer_offset: u32,
    },
}

impl BandMode {
    /// Default fractional mode (15% / 15%).
    pub fn fractional() -> Self {
        Self::Fractional {
            header_fraction: 0.15,
            footer_fraction: 0.15,
        }
    }

    /// Default fixed-pixel mode (200px / 150px).
    pub fn fixed_pixels() -> Self {
        Self::FixedPixels {
            header_offset: 200,
            footer_offset: 150,
        }
    }
}

impl Default for BandMode {
    fn default() -> Self {
        Self::fractional()
    }
}

/// Band segmentation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    /// Threshold derivation mode
    pub mode: BandMode,
}

/// Thresholds computed for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandThresholds {
    /// Smallest `top` over all words
    pub min_top: u32,
    /// Largest `bottom` over all words
    pub max_bottom: u32,
    /// Words with `top` strictly below this value are header
    pub header: f64,
    /// Words with `top` strictly above this value are footer
    pub footer: f64,
}

impl BandThresholds {
    /// Compute thresholds for a word set; `None` for an empty set.
    pub fn compute(words: &[WordBox], config: &BandConfig) -> Option<Self> {
        let min_top = words.iter().map(WordBox::top).min()?;
        let max_bottom = words.iter().map(WordBox::bottom).max()?;
        let span = f64::from(max_bottom) - f64::from(min_top);

        let (header, footer) = match config.mode {
            BandMode::Fractional {
                header_fraction,
                footer_fraction,
            } => (
                f64::from(min_top) + span * header_fraction,
                f64::from(max_bottom) - span * footer_fraction,
            ),
            BandMode::FixedPixels {
                header_offset,
                footer_offset,
            } => (
                f64::from(min_top) + f64::from(header_offset),
                f64::from(max_bottom) - f64::from(footer_offset),
            ),
        };

        Some(Self {
            min_top,
            max_bottom,
            header,
            footer,
        })
    }

    /// Classify a word by its top edge.
    ///
    /// Header wins when the thresholds cross (tiny pages in fixed-pixel mode).
    pub fn classify(&self, word: &WordBox) -> Band {
        let top = f64::from(word.top());
        if top < self.header {
            Band::Header
        } else if top > self.footer {
            Band::Footer
        } else {
            Band::Main
        }
    }
}

/// A page's words split into the three bands, in input order.
#[derive(Debug, Clone, Default)]
pub struct BandPartition<'a> {
    /// Header band
    pub header: Vec<&'a WordBox>,
    /// Main (body) band
    pub main: Vec<&'a WordBox>,
    /// Footer band
    pub footer: Vec<&'a WordBox>,
    /// Thresholds used, `None` when the page had no words
    pub thresholds: Option<BandThresholds>,
}

impl<'a> BandPartition<'a> {
    /// Total number of words across all bands.
    pub fn len(&self) -> usize {
        self.header.len() + self.main.len() + self.footer.len()
    }

    /// True when the page had no words.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Words of one band.
    pub fn band(&self, band: Band) -> &[&'a WordBox] {
        match band {
            Band::Header => &self.header,
            Band::Main => &self.main,
            Band::Footer => &self.footer,
        }
    }
}

/// Partition a page's words into header, main and footer bands.
///
/// Pure function: every input word lands in exactly one band.
///
/// # Examples
///
/// ```
/// use ocr_reflow::geometry::PixelRect;
/// use ocr_reflow::layout::{segment_bands, BandConfig, BandMode, WordBox};
///
/// let word = |text: &str, top| WordBox::new(text, PixelRect::new(10, top, 40, 20), 95.0).unwrap();
/// let words = vec![word("Menu", 0), word("Soep", 400), word("Pagina", 980)];
///
/// let bands = segment_bands(&words, &BandConfig { mode: BandMode::fractional() });
/// assert_eq!(bands.header.len(), 1);
/// assert_eq!(bands.main.len(), 1);
/// assert_eq!(bands.footer.len(), 1);
/// ```
pub fn segment_bands<'a>(words: &'a [WordBox], config: &BandConfig) -> BandPartition<'a> {
    let Some(thresholds) = BandThresholds::compute(words, config) else {
        return BandPartition::default();
    };

    let mut partition = BandPartition {
        thresholds: Some(thresholds),
        ..Default::default()
    };

    for word in words {
        match thresholds.classify(word) {
            Band::Header => partition.header.push(word),
            Band::Main => partition.main.push(word),
            Band::Footer => partition.footer.push(word),
        }
    }

    log::debug!(
        "Bands: top={} bottom={} header<{:.1} footer>{:.1} -> {} header, {} main, {} footer",
        thresholds.min_top,
        thresholds.max_bottom,
        thresholds.header,
        thresholds.footer,
        partition.header.len(),
        partition.main.len(),
        partition.footer.len()
    );

    partition
}
