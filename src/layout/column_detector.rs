//! Column detection for the main band of a page.
//!
//! Column boundaries in typeset, menu-like documents show up as horizontal
//! whitespace between the left edges of words. Two strategies find boundary
//! candidates:
//!
//! - [`ColumnStrategy::LeftEdgeHistogram`]: exact-value histogram of word
//!   left edges; a gap between consecutive, well-supported left edges marks
//!   the start of a new column.
//! - [`ColumnStrategy::LineSpans`]: group words into lines first, split lines
//!   at wide inter-word gaps, and look for gaps in the x-projection of the
//!   resulting segments.
//!
//! Both share boundary selection (first `N-1` candidates, else even spacing)
//! and assignment, so the detector always returns exactly `N` columns and
//! never fails.

use crate::geometry::PixelRect;
use crate::layout::line_grouper::{group_lines, LineGrouping};
use crate::layout::word_box::WordBox;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How boundary candidates are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnStrategy {
    /// Gaps between distinct word left edges (default)
    #[default]
    LeftEdgeHistogram,
    /// Gaps between the x-spans of line segments
    LineSpans,
}

/// Column detection configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Number of columns to produce (default: 3)
    pub column_count: usize,
    /// Minimum horizontal distance for a gap, in pixels (default: 20)
    pub gap_threshold: u32,
    /// A gap only counts when the left edge before it occurs more than this
    /// many times (default: 1; the strict variant uses 5)
    pub min_gap_support: usize,
    /// Boundary candidate strategy
    pub strategy: ColumnStrategy,
    /// Inter-word whitespace that splits a line into segments, used by
    /// [`ColumnStrategy::LineSpans`] (default: 100)
    pub segment_gap: u32,
    /// Treat the whole page as one column when the main band is empty
    /// (default: true)
    pub unify_empty_main: bool,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            column_count: 3,
            gap_threshold: 20,
            min_gap_support: 1,
            strategy: ColumnStrategy::LeftEdgeHistogram,
            segment_gap: 100,
            unify_empty_main: true,
        }
    }
}

impl ColumnConfig {
    /// Create a configuration for `column_count` columns with defaults otherwise.
    pub fn with_columns(column_count: usize) -> Self {
        Self {
            column_count,
            ..Default::default()
        }
    }

    /// Strict gap support: a left edge must occur more than five times.
    pub fn strict() -> Self {
        Self {
            min_gap_support: 5,
            ..Default::default()
        }
    }

    /// Lenient gaps: 15px threshold, support above one.
    pub fn lenient() -> Self {
        Self {
            gap_threshold: 15,
            min_gap_support: 1,
            ..Default::default()
        }
    }
}

/// A run of horizontal whitespace between two x-coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    /// Last occupied coordinate before the gap
    pub start: u32,
    /// First occupied coordinate after the gap (the column boundary)
    pub end: u32,
}

/// Where the column boundaries came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySource {
    /// Enough structural gaps were found
    Gaps,
    /// Too few gaps; `[min_left, max_left]` split into equal bands
    EvenSpacing,
    /// All left edges (nearly) coincide; everything is in column 0
    Degenerate,
    /// No words to place
    Empty,
}

/// Result of column detection.
#[derive(Debug, Clone)]
pub struct ColumnLayout<'a> {
    /// Ascending boundaries; column `i` holds `boundaries[i-1] <= left < boundaries[i]`
    pub boundaries: Vec<u32>,
    /// Exactly `column_count` columns, left to right (some may be empty)
    pub columns: Vec<Vec<&'a WordBox>>,
    /// How the boundaries were obtained
    pub source: BoundarySource,
}

impl<'a> ColumnLayout<'a> {
    fn empty(column_count: usize, source: BoundarySource) -> Self {
        Self {
            boundaries: Vec::new(),
            columns: vec![Vec::new(); column_count],
            source,
        }
    }

    /// Number of columns holding at least one word.
    pub fn non_empty_count(&self) -> usize {
        self.columns.iter().filter(|c| !c.is_empty()).count()
    }
}

/// Frequency of each distinct `left` coordinate (no binning).
pub fn left_edge_histogram(words: &[&WordBox]) -> BTreeMap<u32, usize> {
    let mut histogram = BTreeMap::new();
    for word in words {
        *histogram.entry(word.left()).or_insert(0) += 1;
    }
    histogram
}

/// Gaps between consecutive distinct left edges.
///
/// A gap `(x_prev, x_next)` qualifies when `x_next - x_prev > gap_threshold`
/// and `x_prev` occurs more than `min_support` times.
pub fn find_gaps(histogram: &BTreeMap<u32, usize>, gap_threshold: u32, min_support: usize) -> Vec<Gap> {
    histogram
        .iter()
        .zip(histogram.iter().skip(1))
        .filter(|&((&prev, &count), (&next, _))| next - prev > gap_threshold && count > min_support)
        .map(|((&prev, _), (&next, _))| Gap {
            start: prev,
            end: next,
        })
        .collect()
}

/// Assign a left coordinate to a column given ascending boundaries.
///
/// The column index is the number of boundaries at or left of `left`, so a
/// word sitting exactly on a boundary goes to the column after it.
pub fn column_index(boundaries: &[u32], left: u32) -> usize {
    boundaries.partition_point(|&b| b <= left)
}

/// Detects columns in a set of main-band words.
#[derive(Debug, Clone, Default)]
pub struct ColumnDetector {
    config: ColumnConfig,
}

impl ColumnDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: ColumnConfig) -> Self {
        Self { config }
    }

    /// The detector's configuration.
    pub fn config(&self) -> &ColumnConfig {
        &self.config
    }

    /// Partition words into exactly `column_count` columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_reflow::geometry::PixelRect;
    /// use ocr_reflow::layout::{ColumnConfig, ColumnDetector, WordBox};
    ///
    /// let word = |left, top| WordBox::new("x", PixelRect::new(left, top, 30, 20), 95.0).unwrap();
    /// let words: Vec<WordBox> = [10, 10, 12, 500, 500, 505]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, &left)| word(left, i as u32 * 30))
    ///     .collect();
    /// let refs: Vec<&WordBox> = words.iter().collect();
    ///
    /// let layout = ColumnDetector::new(ColumnConfig::with_columns(2)).detect(&refs);
    /// assert_eq!(layout.columns.len(), 2);
    /// assert_eq!(layout.columns[0].len(), 3);
    /// assert_eq!(layout.columns[1].len(), 3);
    /// ```
    pub fn detect<'a>(&self, words: &[&'a WordBox]) -> ColumnLayout<'a> {
        let column_count = self.config.column_count.max(1);

        let (Some(min_left), Some(max_left)) = (
            words.iter().map(|w| w.left()).min(),
            words.iter().map(|w| w.left()).max(),
        ) else {
            log::debug!("Column detection: no main-band words, {} empty columns", column_count);
            return ColumnLayout::empty(column_count, BoundarySource::Empty);
        };

        let candidates = match self.config.strategy {
            ColumnStrategy::LeftEdgeHistogram => self.histogram_candidates(words),
            ColumnStrategy::LineSpans => self.line_span_candidates(words),
        };

        let (boundaries, source) = if candidates.len() + 1 >= column_count {
            (candidates[..column_count - 1].to_vec(), BoundarySource::Gaps)
        } else {
            log::debug!(
                "Column detection: {} gap(s) for {} columns, using even spacing over [{}, {}]",
                candidates.len(),
                column_count,
                min_left,
                max_left
            );
            let column_width = (max_left - min_left) / column_count as u32;
            if column_width == 0 {
                let mut layout = ColumnLayout::empty(column_count, BoundarySource::Degenerate);
                layout.columns[0] = words.to_vec();
                return layout;
            }
            let boundaries = (1..column_count as u32)
                .map(|i| min_left + i * column_width)
                .collect();
            (boundaries, BoundarySource::EvenSpacing)
        };

        let mut columns: Vec<Vec<&'a WordBox>> = vec![Vec::new(); column_count];
        for &word in words {
            columns[column_index(&boundaries, word.left())].push(word);
        }

        log::debug!(
            "Column detection: boundaries={:?} ({:?}), words per column={:?}",
            boundaries,
            source,
            columns.iter().map(Vec::len).collect::<Vec<_>>()
        );

        ColumnLayout {
            boundaries,
            columns,
            source,
        }
    }

    fn histogram_candidates(&self, words: &[&WordBox]) -> Vec<u32> {
        let histogram = left_edge_histogram(words);
        let gaps = find_gaps(&histogram, self.config.gap_threshold, self.config.min_gap_support);
        log::debug!(
            "Left-edge histogram: {} distinct values, {} qualifying gap(s)",
            histogram.len(),
            gaps.len()
        );
        // Gaps come out of an ordered map, so their ends are already ascending.
        gaps.into_iter().map(|g| g.end).collect()
    }

    /// Boundary candidates from the x-projection of line segments.
    fn line_span_candidates(&self, words: &[&WordBox]) -> Vec<u32> {
        let lines = group_lines(words, &LineGrouping::default());

        let mut spans: Vec<(u32, u32)> = Vec::new();
        for line in &lines {
            let mut segment: Option<PixelRect> = None;
            for word in &line.words {
                let bbox = word.bbox();
                segment = match segment {
                    Some(current) if current.horizontal_gap_to(&bbox) <= i64::from(self.config.segment_gap) => {
                        Some(current.union(&bbox))
                    },
                    Some(done) => {
                        spans.push((done.left, done.right()));
                        Some(bbox)
                    },
                    None => Some(bbox),
                };
            }
            spans.extend(segment.map(|s| (s.left, s.right())));
        }
        spans.sort_unstable();

        let mut candidates = Vec::new();
        let mut merged_right: Option<u32> = None;
        for (left, right) in spans {
            match merged_right {
                Some(r) if left <= r => merged_right = Some(r.max(right)),
                Some(r) => {
                    if left - r > self.config.gap_threshold {
                        candidates.push(left);
                    }
                    merged_right = Some(right);
                },
                None => merged_right = Some(right),
            }
        }

        log::debug!(
            "Line spans: {} line(s), {} boundary candidate(s)",
            lines.len(),
            candidates.len()
        );
        candidates
    }
}
