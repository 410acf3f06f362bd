//! Pixel geometry for OCR word boxes.
//!
//! OCR engines report integer pixel coordinates in the source image's
//! coordinate system (origin top-left, y grows downwards). Extents are
//! unsigned so a box can never have a negative width or height.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    /// X coordinate of the left edge
    pub left: u32,
    /// Y coordinate of the top edge
    pub top: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelRect {
    /// Create a rectangle from its top-left corner and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_reflow::geometry::PixelRect;
    ///
    /// let rect = PixelRect::new(10, 20, 100, 30);
    /// assert_eq!(rect.right(), 110);
    /// assert_eq!(rect.bottom(), 50);
    /// ```
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle from corner coordinates (`bbox L T R B` in hOCR).
    ///
    /// Fails when the right/bottom corner lies before the left/top one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_reflow::geometry::PixelRect;
    ///
    /// let rect = PixelRect::from_corners(10, 20, 110, 50).unwrap();
    /// assert_eq!(rect.width, 100);
    /// assert!(PixelRect::from_corners(110, 20, 10, 50).is_err());
    /// ```
    pub fn from_corners(left: u32, top: u32, right: u32, bottom: u32) -> Result<Self> {
        if right < left || bottom < top {
            return Err(Error::InvalidGeometry(format!(
                "corners ({}, {}) - ({}, {}) are inverted",
                left, top, right, bottom
            )));
        }
        Ok(Self::new(left, top, right - left, bottom - top))
    }

    /// Create a rectangle from signed source values, rejecting negatives.
    pub fn try_from_signed(left: i64, top: i64, width: i64, height: i64) -> Result<Self> {
        let convert = |name: &str, value: i64| {
            u32::try_from(value).map_err(|_| {
                Error::InvalidGeometry(format!("{} = {} is out of range", name, value))
            })
        };
        Ok(Self::new(
            convert("left", left)?,
            convert("top", top)?,
            convert("width", width)?,
            convert("height", height)?,
        ))
    }

    /// X coordinate of the right edge.
    pub fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }

    /// Y coordinate of the bottom edge.
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    /// Smallest rectangle containing both rectangles.
    pub fn union(&self, other: &PixelRect) -> PixelRect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        PixelRect::new(left, top, right - left, bottom - top)
    }

    /// Horizontal whitespace between this box and one to its right.
    ///
    /// Negative when the boxes overlap horizontally.
    pub fn horizontal_gap_to(&self, other: &PixelRect) -> i64 {
        i64::from(other.left) - i64::from(self.right())
    }
}
