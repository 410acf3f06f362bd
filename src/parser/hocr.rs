//! hOCR parsing.
//!
//! Tesseract's hOCR output nests word elements inside area, paragraph and
//! line elements:
//!
//! ```text
//! <div class='ocr_carea' ...>
//!   <p class='ocr_par' ...>
//!     <span class='ocr_line' title='bbox 36 92 510 120; baseline 0 -6'>
//!       <span class='ocrx_word' title='bbox 36 92 156 120; x_wconf 96'>Garnituur:</span>
//! ```
//!
//! The four integers after `bbox` are taken positionally as
//! `left top right bottom`; everything after the first `;` is metadata, of
//! which only `x_wconf` is read.

use crate::error::{Error, Result};
use crate::geometry::PixelRect;
use crate::layout::{WordBox, WordPosition};
use crate::parser::WordFilter;
use lazy_static::lazy_static;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

lazy_static! {
    /// `bbox L T R B` at the start of a title attribute
    static ref RE_BBOX: Regex = Regex::new(r"^\s*bbox\s+(\d+)\s+(\d+)\s+(\d+)\s+(\d+)\s*$").unwrap();

    /// Word confidence in the title metadata
    static ref RE_WCONF: Regex = Regex::new(r"\bx_wconf\s+(-?\d+(?:\.\d+)?)").unwrap();
}

/// Confidence assumed for words whose title carries no `x_wconf`.
pub const DEFAULT_CONFIDENCE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Block,
    Paragraph,
    Line,
    Word,
    Other,
}

impl ElementKind {
    fn from_class(class: &str) -> Self {
        let mut kind = Self::Other;
        for name in class.split_whitespace() {
            kind = match name {
                "ocrx_word" => return Self::Word,
                "ocr_carea" => Self::Block,
                "ocr_par" => Self::Paragraph,
                "ocr_line" | "ocr_caption" | "ocr_header" | "ocr_textfloat" => Self::Line,
                _ => kind,
            };
        }
        kind
    }
}

/// A word element whose closing tag has not been seen yet.
struct PendingWord {
    title: String,
    text: String,
    position: WordPosition,
}

/// Running block/paragraph/line/word counters, numbered like Tesseract TSV.
#[derive(Default)]
struct Counters {
    block: u32,
    paragraph: u32,
    line: u32,
    word: u32,
}

impl Counters {
    fn enter(&mut self, kind: ElementKind) {
        match kind {
            ElementKind::Block => {
                self.block += 1;
                self.paragraph = 0;
            },
            ElementKind::Paragraph => {
                self.paragraph += 1;
                self.line = 0;
            },
            ElementKind::Line => {
                self.line += 1;
                self.word = 0;
            },
            ElementKind::Word => self.word += 1,
            ElementKind::Other => {},
        }
    }

    fn position(&self) -> WordPosition {
        WordPosition {
            block: self.block,
            paragraph: self.paragraph,
            line: self.line,
            word: self.word,
        }
    }
}

/// Parse hOCR markup into word boxes, in document order.
///
/// Word elements with a missing or malformed `bbox`, blank text, or a
/// confidence rejected by `filter` are skipped. Fails only when the markup
/// is not well-formed.
///
/// # Examples
///
/// ```
/// use ocr_reflow::parser::{parse_hocr, WordFilter};
///
/// let hocr = "<div class='ocr_page'><span class='ocr_line' title='bbox 10 20 200 44'>\
///             <span class='ocrx_word' title='bbox 10 20 90 44; x_wconf 93'>Ananas</span>\
///             <span class='ocrx_word' title='bbox 100 20 200 44; x_wconf 88'><strong>saus:</strong></span>\
///             </span></div>";
///
/// let words = parse_hocr(hocr, &WordFilter::default()).unwrap();
/// assert_eq!(words.len(), 2);
/// assert_eq!(words[1].text(), "saus:");
/// assert_eq!(words[1].right(), 200);
/// ```
pub fn parse_hocr(content: &str, filter: &WordFilter) -> Result<Vec<WordBox>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut words = Vec::new();
    let mut stack: Vec<ElementKind> = Vec::new();
    let mut counters = Counters::default();
    let mut pending: Option<PendingWord> = None;
    let mut skipped = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let kind = get_attribute(e, "class")
                    .map(|class| ElementKind::from_class(&class))
                    .unwrap_or(ElementKind::Other);
                counters.enter(kind);
                if kind == ElementKind::Word && pending.is_none() {
                    pending = Some(PendingWord {
                        title: get_attribute(e, "title").unwrap_or_default(),
                        text: String::new(),
                        position: counters.position(),
                    });
                }
                stack.push(kind);
            },
            Ok(Event::Text(e)) => {
                if let Some(word) = pending.as_mut() {
                    let text = e
                        .unescape()
                        .map(|t| t.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&e).into_owned());
                    word.text.push_str(&text);
                }
            },
            Ok(Event::End(_)) => {
                if stack.pop() == Some(ElementKind::Word) {
                    if let Some(word) = pending.take() {
                        match finish_word(word, filter) {
                            Some(word) => words.push(word),
                            None => skipped += 1,
                        }
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Markup(format!(
                    "hOCR parse error at byte {}: {}",
                    reader.buffer_position(),
                    e
                )));
            },
            _ => {},
        }
    }

    log::debug!("hOCR: parsed {} word(s), skipped {} word element(s)", words.len(), skipped);
    Ok(words)
}

/// Parse the `bbox` part of a title attribute.
pub fn parse_title_bbox(title: &str) -> Option<PixelRect> {
    let head = title.split(';').next()?;
    let caps = RE_BBOX.captures(head)?;
    let coord = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
    PixelRect::from_corners(coord(1)?, coord(2)?, coord(3)?, coord(4)?).ok()
}

/// Parse `x_wconf` from the metadata after the first `;`.
pub fn parse_title_confidence(title: &str) -> Option<f32> {
    let (_, metadata) = title.split_once(';')?;
    RE_WCONF.captures(metadata)?.get(1)?.as_str().parse().ok()
}

fn finish_word(word: PendingWord, filter: &WordFilter) -> Option<WordBox> {
    let Some(bbox) = parse_title_bbox(&word.title) else {
        log::debug!("hOCR: word '{}' has no usable bbox in '{}'", word.text.trim(), word.title);
        return None;
    };
    let confidence = parse_title_confidence(&word.title).unwrap_or(DEFAULT_CONFIDENCE);
    if word.text.trim().is_empty() || !filter.accepts(confidence, bbox.height) {
        return None;
    }
    WordBox::new(word.text, bbox, confidence)
        .ok()
        .map(|w| w.with_position(word.position))
}

/// Get an attribute value from an element.
fn get_attribute(e: &BytesStart<'_>, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return Some(match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            });
        }
    }
    None
}
