//! End-to-end reconciliation of the fixture page.

use std::fs::File;

use hyperpaper_core::{
    PageReconciler, Rect, ReconcilerConfig, extract_visible_rects, find_visible_text,
    load_bounding_boxes,
};

const OCR_PATH: &str = "tests/fixtures/page.tsv";
const LAYOUT_PATH: &str = "tests/fixtures/page.xml";

#[test]
fn test_fixture_boxes() {
    let boxes = load_bounding_boxes(File::open(OCR_PATH).unwrap()).unwrap();

    // Structural rows (FLOW, LINE, the second PAGE) are not words
    let texts: Vec<_> = boxes.iter().map(|b| b.text.as_str()).collect();
    assert_eq!(
        texts,
        ["吾輩は", "猫である", "名前は", "まだ無い", "図1", "余白", "二頁"]
    );
    assert_eq!(boxes[0].rect, Rect::new(0.1, 0.1, 0.1, 0.025));
    assert_eq!(boxes[6].page, 2);
}

#[test]
fn test_fixture_layout() {
    let rects = extract_visible_rects(File::open(LAYOUT_PATH).unwrap()).unwrap();
    assert_eq!(
        rects,
        [
            Rect::new(0.1, 0.1, 0.5, 0.025),
            Rect::new(0.1, 0.15, 0.5, 0.025),
        ]
    );
}

#[test]
fn test_fixture_visible_text() {
    let boxes = load_bounding_boxes(File::open(OCR_PATH).unwrap()).unwrap();
    let rects = extract_visible_rects(File::open(LAYOUT_PATH).unwrap()).unwrap();

    assert_eq!(
        find_visible_text(&boxes, 1, &rects),
        ["吾輩は", "猫である", "名前は", "まだ無い"]
    );

    // Layout lines carry no page, so page 2 words match page 1 lines
    assert_eq!(find_visible_text(&boxes, 2, &rects), ["二頁"]);
    assert!(find_visible_text(&boxes, 3, &rects).is_empty());
}

#[test]
fn test_fixture_reconciler() {
    let ocr = std::fs::read(OCR_PATH).unwrap();
    let layout = std::fs::read(LAYOUT_PATH).unwrap();

    let reconciler = PageReconciler::new(ReconcilerConfig::default());
    assert_eq!(
        reconciler.visible_text(&ocr, &layout, 1).unwrap(),
        ["吾輩は", "猫である", "名前は", "まだ無い"]
    );

    let strict = PageReconciler::new(ReconcilerConfig {
        strict_pages: true,
        ..Default::default()
    });
    assert!(strict.visible_text(&ocr, &layout, 2).unwrap().is_empty());

    let captions = PageReconciler::new(ReconcilerConfig {
        body_text_type: "キャプション".to_string(),
        ..Default::default()
    });
    assert_eq!(captions.visible_text(&ocr, &layout, 1).unwrap(), ["図1"]);
}
