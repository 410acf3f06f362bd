//! Layout analysis for OCR word boxes.
//!
//! This module turns an unordered set of word boxes into reading order:
//! - Band segmentation (header / main / footer)
//! - Column detection on the main band (left-edge gaps or line spans)
//! - Line grouping within each band and column
//! - The [`Page`] structure consumed by the Markdown renderer

pub mod band_segmenter;
pub mod column_detector;
pub mod line_grouper;
pub mod page;
pub mod word_box;

// Re-export main types
pub use band_segmenter::{segment_bands, Band, BandConfig, BandMode, BandPartition, BandThresholds};
pub use column_detector::{
    column_index, find_gaps, left_edge_histogram, BoundarySource, ColumnConfig, ColumnDetector,
    ColumnLayout, ColumnStrategy, Gap,
};
pub use line_grouper::{group_lines, Line, LineGrouping};
pub use page::{Column, Page};
pub use word_box::{WordBox, WordPosition};
