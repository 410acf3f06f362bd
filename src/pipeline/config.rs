//! Unified configuration for the reading-order pipeline.
//!
//! The layout heuristics have several tunable constants (gap size, line
//! tolerance, band fractions). They all live here with documented defaults so
//! that a page can be re-run with different settings without touching code.
//!
//! Configuration can be loaded from JSON; every field is optional and falls
//! back to its default:
//!
//! ```json
//! {
//!   "bands": { "mode": { "mode": "fixed_pixels", "header_offset": 200, "footer_offset": 150 } },
//!   "columns": { "column_count": 2, "gap_threshold": 15 },
//!   "lines": { "mode": "line_pitch", "max_line_gap": 20 },
//!   "filter": { "excluded_confidences": [95.0] }
//! }
//! ```

use crate::error::{Error, Result};
use crate::layout::{BandConfig, BandMode, ColumnConfig, ColumnStrategy, LineGrouping};
use crate::parser::WordFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Named configuration presets.
///
/// - Menu: fractional bands, three columns, left-edge gaps (the defaults)
/// - FixedGeometry: pixel bands for scans rendered at a consistent size
/// - Lenient: smaller gaps, line-pitch grouping, for loosely set text
/// - Strict: well-supported gaps only, line-span column detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPreset {
    /// Default settings for menu-like, three-column pages
    Menu,
    /// Fixed-pixel header/footer bands
    FixedGeometry,
    /// Permissive gap and line detection
    Lenient,
    /// Conservative gap detection
    Strict,
}

impl LayoutPreset {
    /// Create the configuration for this preset.
    pub fn create_config(&self) -> LayoutConfig {
        match self {
            Self::Menu => LayoutConfig::default(),
            Self::FixedGeometry => LayoutConfig {
                bands: BandConfig {
                    mode: BandMode::fixed_pixels(),
                },
                ..Default::default()
            },
            Self::Lenient => LayoutConfig {
                columns: ColumnConfig::lenient(),
                lines: LineGrouping::line_pitch(),
                ..Default::default()
            },
            Self::Strict => LayoutConfig {
                columns: ColumnConfig {
                    strategy: ColumnStrategy::LineSpans,
                    ..ColumnConfig::strict()
                },
                ..Default::default()
            },
        }
    }
}

impl std::str::FromStr for LayoutPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "menu" | "default" => Ok(Self::Menu),
            "fixed_geometry" | "fixed" => Ok(Self::FixedGeometry),
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(Error::Config(format!("unknown preset '{}'", other))),
        }
    }
}

/// Markdown output options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit `# Column N:` before each non-empty column (default: true)
    pub column_headings: bool,
    /// Emit `# Page N` before each page (default: true)
    pub page_headings: bool,
    /// Line placed between pages (default: `---`)
    pub page_separator: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            column_headings: true,
            page_headings: true,
            page_separator: "---".to_string(),
        }
    }
}

/// Complete configuration for word-box parsing, layout and output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Header/footer band thresholds
    pub bands: BandConfig,
    /// Column detection
    pub columns: ColumnConfig,
    /// Line grouping rule
    pub lines: LineGrouping,
    /// Record filter used by the parsers
    pub filter: WordFilter,
    /// Markdown output options
    pub output: OutputConfig,
}

impl LayoutConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded layout configuration from {}", path.as_ref().display());
        Self::from_json_str(&json)
    }

    /// Check the configuration for values the algorithms cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.columns.column_count == 0 {
            return Err(Error::Config("column_count must be at least 1".to_string()));
        }
        if let BandMode::Fractional {
            header_fraction,
            footer_fraction,
        } = self.bands.mode
        {
            for (name, value) in [("header_fraction", header_fraction), ("footer_fraction", footer_fraction)] {
                if !(0.0..1.0).contains(&value) {
                    return Err(Error::Config(format!("{} must be in [0, 1), got {}", name, value)));
                }
            }
            if header_fraction + footer_fraction >= 1.0 {
                return Err(Error::Config(format!(
                    "header_fraction + footer_fraction must be below 1, got {}",
                    header_fraction + footer_fraction
                )));
            }
        }
        if self.filter.min_confidence.is_nan() {
            return Err(Error::Config("min_confidence must be a number".to_string()));
        }
        Ok(())
    }

    /// Set the number of columns.
    pub fn with_columns(mut self, column_count: usize) -> Self {
        self.columns.column_count = column_count;
        self
    }

    /// Set the band mode.
    pub fn with_band_mode(mut self, mode: BandMode) -> Self {
        self.bands.mode = mode;
        self
    }

    /// Set the line grouping rule.
    pub fn with_line_grouping(mut self, lines: LineGrouping) -> Self {
        self.lines = lines;
        self
    }

    /// Set the record filter.
    pub fn with_filter(mut self, filter: WordFilter) -> Self {
        self.filter = filter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.columns.column_count, 3);
        assert_eq!(config.columns.gap_threshold, 20);
        assert_eq!(config.lines, LineGrouping::AnchorTolerance { tolerance: 10 });
        assert_eq!(config.bands.mode, BandMode::fractional());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LayoutConfig::from_json_str(r#"{ "columns": { "column_count": 2 } }"#).unwrap();
        assert_eq!(config.columns.column_count, 2);
        assert_eq!(config.columns.gap_threshold, 20);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "bands": { "mode": { "mode": "fixed_pixels", "header_offset": 180, "footer_offset": 120 } },
            "columns": { "column_count": 2, "strategy": "line_spans", "min_gap_support": 5 },
            "lines": { "mode": "line_pitch", "max_line_gap": 25 },
            "filter": { "excluded_confidences": [95.0] },
            "output": { "page_separator": "***" }
        }"#;
        let config = LayoutConfig::from_json_str(json).unwrap();
        assert_eq!(
            config.bands.mode,
            BandMode::FixedPixels {
                header_offset: 180,
                footer_offset: 120
            }
        );
        assert_eq!(config.columns.strategy, ColumnStrategy::LineSpans);
        assert_eq!(config.columns.min_gap_support, 5);
        assert_eq!(config.lines, LineGrouping::LinePitch { max_line_gap: 25 });
        assert_eq!(config.filter.excluded_confidences, vec![95.0]);
        assert_eq!(config.output.page_separator, "***");
        assert!(config.output.column_headings);
    }

    #[test]
    fn test_roundtrip_json() {
        let config = LayoutPreset::Strict.create_config();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(LayoutConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_zero_columns() {
        let config = LayoutConfig::default().with_columns(0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_overlapping_bands() {
        let config = LayoutConfig::default().with_band_mode(BandMode::Fractional {
            header_fraction: 0.6,
            footer_fraction: 0.5,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets() {
        assert_eq!("fixed-geometry".parse::<LayoutPreset>().unwrap(), LayoutPreset::FixedGeometry);
        assert!("unknown".parse::<LayoutPreset>().is_err());
        let lenient = LayoutPreset::Lenient.create_config();
        assert_eq!(lenient.columns.gap_threshold, 15);
        assert_eq!(lenient.lines, LineGrouping::line_pitch());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(LayoutConfig::from_json_str("{ not json"), Err(Error::Json(_))));
    }
}
