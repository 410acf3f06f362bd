//! Page structure: header lines, ordered columns, footer lines.
//!
//! A [`Page`] borrows the word boxes it was built from. It is constructed
//! once per input image, handed to the renderer, and dropped; nothing is
//! shared between pages.

use crate::layout::band_segmenter::{segment_bands, BandPartition};
use crate::layout::column_detector::{BoundarySource, ColumnDetector};
use crate::layout::line_grouper::{group_lines, Line};
use crate::layout::word_box::WordBox;
use crate::pipeline::config::LayoutConfig;

/// One column of the main band with its lines.
#[derive(Debug, Clone)]
pub struct Column<'a> {
    /// Zero-based position from the left
    pub index: usize,
    /// Lines of the column, top to bottom
    pub lines: Vec<Line<'a>>,
}

impl<'a> Column<'a> {
    /// True when no word was assigned to this column.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of words in the column.
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }
}

/// The reading-order structure of one page.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    /// One-based page number
    pub number: usize,
    /// Header band lines
    pub header: Vec<Line<'a>>,
    /// Main band columns, left to right
    pub columns: Vec<Column<'a>>,
    /// Footer band lines
    pub footer: Vec<Line<'a>>,
    /// How the column boundaries were obtained
    pub boundary_source: BoundarySource,
}

impl<'a> Page<'a> {
    /// Build the page structure from a page's word boxes.
    ///
    /// Runs band segmentation, column detection on the main band and line
    /// grouping on every band and column. When the main band comes out empty
    /// on a non-empty page and `unify_empty_main` is set, the whole page is
    /// treated as a single column instead.
    pub fn analyze(number: usize, words: &'a [WordBox], config: &LayoutConfig) -> Self {
        let bands = segment_bands(words, &config.bands);
        let detector = ColumnDetector::new(config.columns);

        if bands.main.is_empty() && !bands.is_empty() && config.columns.unify_empty_main {
            log::debug!(
                "Page {}: main band is empty, treating {} word(s) as one column",
                number,
                bands.len()
            );
            let all: Vec<&'a WordBox> = words.iter().collect();
            return Self {
                number,
                header: Vec::new(),
                columns: vec![Column {
                    index: 0,
                    lines: group_lines(&all, &config.lines),
                }],
                footer: Vec::new(),
                boundary_source: BoundarySource::Degenerate,
            };
        }

        let BandPartition {
            header,
            main,
            footer,
            ..
        } = bands;
        let layout = detector.detect(&main);

        let columns = layout
            .columns
            .iter()
            .enumerate()
            .map(|(index, words)| Column {
                index,
                lines: group_lines(words, &config.lines),
            })
            .collect();

        Self {
            number,
            header: group_lines(&header, &config.lines),
            columns,
            footer: group_lines(&footer, &config.lines),
            boundary_source: layout.source,
        }
    }

    /// Total number of words on the page.
    pub fn word_count(&self) -> usize {
        self.header.iter().map(Line::len).sum::<usize>()
            + self.columns.iter().map(Column::word_count).sum::<usize>()
            + self.footer.iter().map(Line::len).sum::<usize>()
    }

    /// True when the page holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.word_count() == 0
    }
}
