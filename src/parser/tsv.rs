//! Tesseract TSV parsing.
//!
//! Column layout, one record per line:
//!
//! ```text
//! level  page_num  block_num  par_num  line_num  word_num  left  top  width  height  conf  text
//! ```
//!
//! Levels 1-4 are page/block/paragraph/line rows with `conf = -1`; only
//! level 5 (word) rows become word boxes.

use crate::geometry::PixelRect;
use crate::layout::{WordBox, WordPosition};
use crate::parser::WordFilter;

/// Hierarchy level of word rows.
pub const WORD_LEVEL: u32 = 5;

/// Records with fewer fields are malformed (text may be absent).
pub const MIN_FIELDS: usize = 11;

const FIELD_COUNT: usize = 12;

/// Parse Tesseract TSV output into word boxes, in source order.
///
/// The header row and any malformed row are skipped; rows that are not at
/// word level, have blank text, or are rejected by `filter` are dropped.
///
/// # Examples
///
/// ```
/// use ocr_reflow::parser::{parse_tsv, WordFilter};
///
/// let tsv = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext\n\
///            4\t1\t1\t1\t1\t0\t36\t92\t300\t28\t-1\t\n\
///            5\t1\t1\t1\t1\t1\t36\t92\t120\t28\t96.2\tGarnituur:\n";
///
/// let words = parse_tsv(tsv, &WordFilter::default());
/// assert_eq!(words.len(), 1);
/// assert_eq!(words[0].text(), "Garnituur:");
/// assert_eq!(words[0].left(), 36);
/// ```
pub fn parse_tsv(content: &str, filter: &WordFilter) -> Vec<WordBox> {
    let mut words = Vec::new();
    let mut skipped = 0usize;

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line, filter) {
            Record::Word(word) => words.push(word),
            Record::Dropped => {},
            Record::Malformed(reason) => {
                // The header row is expected to fail the numeric parse.
                if line_no > 0 {
                    log::debug!("TSV line {}: skipping malformed row ({})", line_no + 1, reason);
                    skipped += 1;
                }
            },
        }
    }

    log::debug!("TSV: parsed {} word(s), skipped {} malformed row(s)", words.len(), skipped);
    words
}

enum Record {
    Word(WordBox),
    Dropped,
    Malformed(&'static str),
}

fn parse_record(line: &str, filter: &WordFilter) -> Record {
    let fields: Vec<&str> = line.splitn(FIELD_COUNT, '\t').collect();
    if fields.len() < MIN_FIELDS {
        return Record::Malformed("too few fields");
    }

    let mut ints = [0i64; 10];
    for (slot, field) in ints.iter_mut().zip(&fields[..10]) {
        match field.trim().parse::<i64>() {
            Ok(value) => *slot = value,
            Err(_) => return Record::Malformed("non-numeric field"),
        }
    }
    let Ok(confidence) = fields[10].trim().parse::<f32>() else {
        return Record::Malformed("non-numeric confidence");
    };

    let [level, _page, block, paragraph, line_num, word_num, left, top, width, height] = ints;
    if level != i64::from(WORD_LEVEL) {
        return Record::Dropped;
    }

    let Ok(bbox) = PixelRect::try_from_signed(left, top, width, height) else {
        return Record::Malformed("negative geometry");
    };

    let text = fields.get(11).copied().unwrap_or("");
    if text.trim().is_empty() || !filter.accepts(confidence, bbox.height) {
        return Record::Dropped;
    }

    let position = WordPosition {
        block: hint(block),
        paragraph: hint(paragraph),
        line: hint(line_num),
        word: hint(word_num),
    };

    match WordBox::new(text, bbox, confidence) {
        Ok(word) => Record::Word(word.with_position(position)),
        Err(_) => Record::Dropped,
    }
}

fn hint(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
