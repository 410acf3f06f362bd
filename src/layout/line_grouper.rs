//! Grouping of words into visual text lines.
//!
//! Words are visited in `(top, left)` order and accumulated into the current
//! line until the next word is too far below it. Two proximity rules are
//! available; they disagree on dense multi-row OCR output, so the choice is
//! configuration rather than a hidden constant.

use crate::layout::word_box::WordBox;
use serde::{Deserialize, Serialize};

/// Rule deciding whether the next word continues the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LineGrouping {
    /// Join when `|word.top - anchor_top| <= tolerance`, where the anchor is
    /// the top of the line's first word.
    AnchorTolerance {
        /// Maximum vertical distance in pixels (default: 10)
        tolerance: u32,
    },
    /// Join when `word.top - previous_word.bottom <= max_line_gap`.
    LinePitch {
        /// Maximum whitespace between consecutive rows in pixels (default: 20)
        max_line_gap: u32,
    },
}

impl Default for LineGrouping {
    fn default() -> Self {
        Self::AnchorTolerance { tolerance: 10 }
    }
}

impl LineGrouping {
    /// Default line-pitch variant.
    pub fn line_pitch() -> Self {
        Self::LinePitch { max_line_gap: 20 }
    }

    fn continues(&self, anchor_top: u32, previous: &WordBox, word: &WordBox) -> bool {
        match *self {
            Self::AnchorTolerance { tolerance } => word.top().abs_diff(anchor_top) <= tolerance,
            Self::LinePitch { max_line_gap } => {
                i64::from(word.top()) - i64::from(previous.bottom()) <= i64::from(max_line_gap)
            },
        }
    }
}

/// Words judged to lie on one visual line, ordered left-to-right.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    /// Words of the line, sorted by `left`
    pub words: Vec<&'a WordBox>,
    /// Top of the first word assigned to the line
    pub anchor_top: u32,
}

impl<'a> Line<'a> {
    /// Word texts joined by single spaces.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(word.text());
        }
        text
    }

    /// Number of words on the line.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True for a line without words (never produced by [`group_lines`]).
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Leftmost x-coordinate of the line.
    pub fn left(&self) -> Option<u32> {
        self.words.iter().map(|w| w.left()).min()
    }

    /// Rightmost x-coordinate of the line.
    pub fn right(&self) -> Option<u32> {
        self.words.iter().map(|w| w.right()).max()
    }

    fn close(mut words: Vec<&'a WordBox>, anchor_top: u32) -> Self {
        // Stable: words sharing a left edge keep their top order.
        words.sort_by_key(|w| w.left());
        Self { words, anchor_top }
    }
}

/// Group an unordered set of words into top-to-bottom lines.
///
/// # Examples
///
/// ```
/// use ocr_reflow::geometry::PixelRect;
/// use ocr_reflow::layout::{group_lines, LineGrouping, WordBox};
///
/// let word = |text: &str, left, top| WordBox::new(text, PixelRect::new(left, top, 40, 20), 95.0).unwrap();
/// let words = vec![word("zout", 120, 52), word("Peper", 10, 50), word("suiker", 10, 90)];
/// let refs: Vec<&WordBox> = words.iter().collect();
///
/// let lines = group_lines(&refs, &LineGrouping::default());
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].text(), "Peper zout");
/// assert_eq!(lines[1].text(), "suiker");
/// ```
pub fn group_lines<'a>(words: &[&'a WordBox], grouping: &LineGrouping) -> Vec<Line<'a>> {
    let mut sorted: Vec<&'a WordBox> = words.to_vec();
    sorted.sort_by_key(|w| (w.top(), w.left()));

    let mut lines = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return lines;
    };

    let mut anchor_top = first.top();
    let mut previous = first;
    let mut current = vec![first];

    for word in iter {
        if grouping.continues(anchor_top, previous, word) {
            current.push(word);
        } else {
            lines.push(Line::close(std::mem::take(&mut current), anchor_top));
            anchor_top = word.top();
            current.push(word);
        }
        previous = word;
    }
    lines.push(Line::close(current, anchor_top));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PixelRect;

    fn word(text: &str, left: u32, top: u32) -> WordBox {
        WordBox::new(text, PixelRect::new(left, top, 40, 20), 90.0).unwrap()
    }

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(Line::text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(group_lines(&[], &LineGrouping::default()).is_empty());
    }

    #[test]
    fn test_single_word() {
        let words = [word("Saus", 10, 10)];
        let refs: Vec<&WordBox> = words.iter().collect();
        let lines = group_lines(&refs, &LineGrouping::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].anchor_top, 10);
    }

    #[test]
    fn test_words_within_tolerance_share_line() {
        let words = [word("rode", 60, 108), word("wijn", 110, 100), word("2 dl", 10, 104)];
        let refs: Vec<&WordBox> = words.iter().collect();
        let lines = group_lines(&refs, &LineGrouping::default());
        assert_eq!(texts(&lines), vec!["2 dl rode wijn"]);
        assert_eq!(lines[0].anchor_top, 100);
    }

    #[test]
    fn test_anchor_is_first_word() {
        // 100 -> 109 -> 118: the third word is 18px below the anchor
        let words = [word("a", 10, 100), word("b", 60, 109), word("c", 110, 118)];
        let refs: Vec<&WordBox> = words.iter().collect();
        let lines = group_lines(&refs, &LineGrouping::default());
        assert_eq!(texts(&lines), vec!["a b", "c"]);
    }

    #[test]
    fn test_line_pitch_variant() {
        // rows of height 20 separated by 15px whitespace stay together
        let words = [word("een", 10, 100), word("twee", 10, 135), word("drie", 10, 200)];
        let refs: Vec<&WordBox> = words.iter().collect();
        let lines = group_lines(&refs, &LineGrouping::line_pitch());
        assert_eq!(texts(&lines), vec!["een twee", "drie"]);
        assert_eq!(lines[1].anchor_top, 200);
    }

    #[test]
    fn test_lines_are_top_to_bottom() {
        let words = [word("third", 10, 300), word("first", 10, 10), word("second", 10, 150)];
        let refs: Vec<&WordBox> = words.iter().collect();
        let lines = group_lines(&refs, &LineGrouping::default());
        assert_eq!(texts(&lines), vec!["first", "second", "third"]);
        assert!(lines.windows(2).all(|w| w[0].anchor_top <= w[1].anchor_top));
    }

    #[test]
    fn test_line_extent() {
        let words = [word("a", 30, 10), word("b", 200, 12)];
        let refs: Vec<&WordBox> = words.iter().collect();
        let lines = group_lines(&refs, &LineGrouping::default());
        assert_eq!(lines[0].left(), Some(30));
        assert_eq!(lines[0].right(), Some(240));
    }
}
