//! Integration tests for the TSV and hOCR word-box parsers.
//!
//! The fixtures mirror what `tesseract page.png stdout tsv|hocr` produces for
//! a small two-column menu fragment.

use ocr_reflow::geometry::PixelRect;
use ocr_reflow::parser::{parse_hocr, parse_tsv, parse_word_boxes, InputFormat, WordFilter};
use ocr_reflow::Error;

// ============================================================================
// Fixtures
// ============================================================================

const TSV_HEADER: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

/// A Tesseract-style TSV page: structural rows (levels 1-4) interleaved with
/// word rows.
fn menu_tsv() -> String {
    [
        TSV_HEADER,
        "1\t1\t0\t0\t0\t0\t0\t0\t1200\t1600\t-1\t",
        "2\t1\t1\t0\t0\t0\t40\t300\t400\t80\t-1\t",
        "3\t1\t1\t1\t0\t0\t40\t300\t400\t80\t-1\t",
        "4\t1\t1\t1\t1\t0\t40\t300\t400\t30\t-1\t",
        "5\t1\t1\t1\t1\t1\t40\t300\t130\t30\t95.12\tTomatensoep",
        "5\t1\t1\t1\t1\t2\t180\t301\t40\t30\t93.40\tmet",
        "5\t1\t1\t1\t1\t3\t230\t300\t120\t30\t91.00\tballetjes",
        "4\t1\t1\t1\t2\t0\t40\t350\t400\t30\t-1\t",
        "5\t1\t1\t1\t2\t1\t40\t350\t90\t30\t96.00\tGarnituur:",
        "2\t1\t2\t0\t0\t0\t640\t300\t400\t80\t-1\t",
        "5\t1\t2\t1\t1\t1\t640\t300\t150\t30\t89.77\tZalmfilet",
        "5\t1\t2\t1\t1\t2\t800\t300\t60\t30\t90.10\tmet",
        "5\t1\t2\t1\t1\t3\t870\t300\t100\t30\t88.00\tdille",
        "5\t1\t2\t1\t2\t1\t640\t350\t50\t30\t92.00\t€24,50",
    ]
    .join("\n")
}

// ============================================================================
// TSV
// ============================================================================

#[test]
fn test_tsv_keeps_word_rows_in_source_order() {
    let words = parse_tsv(&menu_tsv(), &WordFilter::default());
    let texts: Vec<&str> = words.iter().map(|w| w.text()).collect();
    assert_eq!(
        texts,
        vec!["Tomatensoep", "met", "balletjes", "Garnituur:", "Zalmfilet", "met", "dille", "€24,50"]
    );
    assert_eq!(words[1].bbox(), PixelRect::new(180, 301, 40, 30));
    assert!((words[0].confidence() - 95.12).abs() < 1e-4);
}

#[test]
fn test_tsv_malformed_row_among_valid_rows() {
    // Ten valid word rows and one with a non-numeric left coordinate.
    let mut rows = vec![TSV_HEADER.to_string()];
    for i in 0..10u32 {
        rows.push(format!("5\t1\t1\t1\t{}\t1\t{}\t{}\t80\t24\t90\tgerecht{}", i + 1, 40 + i, 100 + i * 40, i));
        if i == 4 {
            rows.push("5\t1\t1\t1\t5\t2\tabc\t260\t80\t24\t90\tkapot".to_string());
        }
    }

    let words = parse_tsv(&rows.join("\n"), &WordFilter::default());
    assert_eq!(words.len(), 10);
    assert!(words.iter().all(|w| w.text() != "kapot"));
}

#[test]
fn test_tsv_truncated_and_garbage_lines() {
    let tsv = format!(
        "{}\n5\t1\t1\n\nnot a record at all\n5\t1\t1\t1\t1\t1\t10\t10\t50\t20\t90\tSla\n",
        TSV_HEADER
    );
    let words = parse_tsv(&tsv, &WordFilter::default());
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].text(), "Sla");
}

#[test]
fn test_tsv_text_with_surrounding_whitespace_is_trimmed() {
    let tsv = format!("{}\n5\t1\t1\t1\t1\t1\t10\t10\t50\t20\t90\t  Sla  ", TSV_HEADER);
    let words = parse_tsv(&tsv, &WordFilter::default());
    assert_eq!(words[0].text(), "Sla");
}

#[test]
fn test_tsv_only_header() {
    assert!(parse_tsv(TSV_HEADER, &WordFilter::default()).is_empty());
    assert!(parse_tsv("", &WordFilter::default()).is_empty());
}

#[test]
fn test_tsv_excluded_confidence_noise() {
    let tsv = format!(
        "{}\n5\t1\t1\t1\t1\t1\t10\t10\t50\t20\t95\t|\n5\t1\t1\t1\t1\t2\t70\t10\t50\t20\t91\tBrood",
        TSV_HEADER
    );
    let words = parse_tsv(&tsv, &WordFilter::default().excluding(95.0));
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].text(), "Brood");
}

// ============================================================================
// hOCR
// ============================================================================

const MENU_HOCR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
 <body>
  <div class='ocr_page' id='page_1' title='image "page-1.png"; bbox 0 0 1200 1600; ppageno 0'>
   <div class='ocr_carea' id='block_1_1' title="bbox 40 300 350 380">
    <p class='ocr_par' id='par_1_1' title="bbox 40 300 350 380">
     <span class='ocr_line' id='line_1_1' title="bbox 40 300 350 331; baseline 0 -7">
      <span class='ocrx_word' id='word_1_1' title='bbox 40 300 170 330; x_wconf 95'>Tomatensoep</span>
      <span class='ocrx_word' id='word_1_2' title='bbox 180 301 220 331; x_wconf 93'>met</span>
      <span class='ocrx_word' id='word_1_3' title='bbox 230 300 350 330; x_wconf 91'>balletjes</span>
     </span>
    </p>
   </div>
   <div class='ocr_carea' id='block_1_2' title="bbox 640 300 970 330">
    <p class='ocr_par' id='par_1_2' title="bbox 640 300 970 330">
     <span class='ocr_line' id='line_1_2' title="bbox 640 300 970 330">
      <span class='ocrx_word' id='word_1_4' title='bbox 640 300 790 330; x_wconf 89'><strong>Zalmfilet</strong></span>
      <span class='ocrx_word' id='word_1_5' title='bbox 800 300 860 330'>met</span>
      <span class='ocrx_word' id='word_1_6' title='bbox 870 300 970 330; x_wconf 88'>dille &amp; citroen</span>
     </span>
    </p>
   </div>
  </div>
 </body>
</html>"#;

#[test]
fn test_hocr_words_and_geometry() {
    let words = parse_hocr(MENU_HOCR, &WordFilter::default()).unwrap();
    assert_eq!(words.len(), 6);
    assert_eq!(words[0].text(), "Tomatensoep");
    assert_eq!(words[0].bbox(), PixelRect::new(40, 300, 130, 30));
    assert_eq!(words[3].text(), "Zalmfilet");
    assert_eq!(words[5].text(), "dille & citroen");
}

#[test]
fn test_hocr_missing_confidence_defaults_to_100() {
    let words = parse_hocr(MENU_HOCR, &WordFilter::default()).unwrap();
    assert_eq!(words[4].confidence(), 100.0);
    assert_eq!(words[3].confidence(), 89.0);
}

#[test]
fn test_hocr_and_tsv_agree_on_shared_words() {
    let from_hocr = parse_hocr(MENU_HOCR, &WordFilter::default()).unwrap();
    let from_tsv = parse_tsv(&menu_tsv(), &WordFilter::default());
    for word in &from_hocr[..3] {
        let twin = from_tsv.iter().find(|w| w.text() == word.text() && w.left() == word.left());
        let twin = twin.unwrap_or_else(|| panic!("no TSV word for {}", word.text()));
        assert_eq!(twin.bbox(), word.bbox());
    }
}

#[test]
fn test_hocr_broken_markup() {
    let result = parse_hocr("<html><body><div class='ocr_page'></span></body></html>", &WordFilter::default());
    assert!(matches!(result, Err(Error::Markup(_))));
}

// ============================================================================
// Format dispatch
// ============================================================================

#[test]
fn test_parse_word_boxes_dispatch() {
    let tsv = menu_tsv();
    let format = InputFormat::detect(&tsv);
    assert_eq!(format, InputFormat::Tsv);
    assert_eq!(parse_word_boxes(&tsv, format, &WordFilter::default()).unwrap().len(), 8);

    let format = InputFormat::detect(MENU_HOCR);
    assert_eq!(format, InputFormat::Hocr);
    assert_eq!(parse_word_boxes(MENU_HOCR, format, &WordFilter::default()).unwrap().len(), 6);
}
