//! End-to-end detector tests on synthetic frames

use crate::inference::{
    AnyDetector, ColorBandTable, DialogBubbleConfig, DialogBubbleDetector, Detector, Frame,
    MapFlyMenuDetector, NormalizedBox,
};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

const BACKGROUND: Rgba<u8> = Rgba([0x20, 0x20, 0x20, 255]);
const BORDER: Rgba<u8> = Rgba([0xf0, 0x90, 0x20, 255]);
const FILL: Rgba<u8> = Rgba([0xf8, 0xe8, 0x10, 255]);

fn blank() -> RgbaImage {
    RgbaImage::from_pixel(1920, 1080, BACKGROUND)
}

/// Orange 300x150 outline with a 200x80 yellow body, 50px / 35px inset.
fn draw_bubble(img: &mut RgbaImage, x: i32, y: i32) {
    draw_filled_rect_mut(img, Rect::at(x, y).of_size(300, 150), BORDER);
    draw_filled_rect_mut(img, Rect::at(x + 50, y + 35).of_size(200, 80), FILL);
}

fn bubble_detector() -> DialogBubbleDetector {
    DialogBubbleDetector::new(DialogBubbleConfig::default()).unwrap()
}

fn assert_box_near(actual: &NormalizedBox, expected: &NormalizedBox) {
    let eps = 1e-9;
    assert!(
        (actual.x - expected.x).abs() < eps
            && (actual.y - expected.y).abs() < eps
            && (actual.width - expected.width).abs() < eps
            && (actual.height - expected.height).abs() < eps,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn test_single_bubble_found() {
    let mut img = blank();
    draw_bubble(&mut img, 400, 300);
    let frame = Frame::new(img).unwrap();

    let hits = bubble_detector().detect_all(&frame).unwrap();

    assert_eq!(hits.len(), 1);
    assert_box_near(
        &hits[0].bbox,
        &NormalizedBox::new(450.0 / 1920.0, 335.0 / 1080.0, 200.0 / 1920.0, 80.0 / 1080.0),
    );
    assert_eq!(hits[0].label.as_deref(), Some("dialog_bubble"));
}

#[test]
fn test_bubble_touching_left_edge_rejected() {
    let mut img = blank();
    draw_filled_rect_mut(&mut img, Rect::at(0, 300).of_size(300, 150), BORDER);
    draw_filled_rect_mut(&mut img, Rect::at(0, 335).of_size(200, 80), FILL);
    let frame = Frame::new(img).unwrap();

    let detector = bubble_detector();
    assert!(detector.detect_all(&frame).unwrap().is_empty());
    assert!(!detector.detect(&frame).unwrap());
}

#[test]
fn test_two_bubbles_in_scan_order() {
    let mut img = blank();
    draw_bubble(&mut img, 1100, 600);
    draw_bubble(&mut img, 200, 150);
    let frame = Frame::new(img).unwrap();

    let hits = bubble_detector().detect_all(&frame).unwrap();

    assert_eq!(hits.len(), 2);
    // Row-major order of the outlines: the upper one comes first
    assert_box_near(
        &hits[0].bbox,
        &NormalizedBox::new(250.0 / 1920.0, 185.0 / 1080.0, 200.0 / 1920.0, 80.0 / 1080.0),
    );
    assert_box_near(
        &hits[1].bbox,
        &NormalizedBox::new(1150.0 / 1920.0, 635.0 / 1080.0, 200.0 / 1920.0, 80.0 / 1080.0),
    );
    for (i, a) in hits.iter().enumerate() {
        for b in hits.iter().skip(i + 1) {
            assert!(!a.bbox.intersects(&b.bbox));
        }
    }
}

/// One outline holding an L-shaped fill and a block tucked into the L's
/// bounding box. The two fills never touch, but their boxes overlap.
fn draw_nested_fills(img: &mut RgbaImage, with_l: bool) {
    draw_filled_rect_mut(img, Rect::at(400, 300).of_size(450, 200), BORDER);
    if with_l {
        draw_filled_rect_mut(img, Rect::at(450, 335).of_size(200, 15), FILL);
        draw_filled_rect_mut(img, Rect::at(450, 335).of_size(15, 80), FILL);
    }
    draw_filled_rect_mut(img, Rect::at(620, 390).of_size(180, 80), FILL);
}

#[test]
fn test_overlapping_fills_first_in_scan_order_wins() {
    let block = NormalizedBox::new(620.0 / 1920.0, 390.0 / 1080.0, 180.0 / 1920.0, 80.0 / 1080.0);

    // On its own the block is a valid bubble
    let mut img = blank();
    draw_nested_fills(&mut img, false);
    let hits = bubble_detector()
        .detect_all(&Frame::new(img).unwrap())
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_box_near(&hits[0].bbox, &block);

    // The L starts on an earlier row, so it is accepted and the block is dropped
    let mut img = blank();
    draw_nested_fills(&mut img, true);
    let hits = bubble_detector()
        .detect_all(&Frame::new(img).unwrap())
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_box_near(
        &hits[0].bbox,
        &NormalizedBox::new(450.0 / 1920.0, 335.0 / 1080.0, 200.0 / 1920.0, 80.0 / 1080.0),
    );
    assert!(hits[0].bbox.intersects(&block));
}

#[test]
fn test_detection_is_deterministic() {
    let mut img = blank();
    draw_bubble(&mut img, 200, 150);
    draw_bubble(&mut img, 1100, 600);
    let frame = Frame::new(img).unwrap();
    let detector = bubble_detector();

    let first = detector.detect_all(&frame).unwrap();
    let second = detector.detect_all(&frame).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_detect_agrees_with_detect_all() {
    let detector = bubble_detector();

    let mut with_bubble = blank();
    draw_bubble(&mut with_bubble, 700, 500);
    let frames = [Frame::new(with_bubble).unwrap(), Frame::new(blank()).unwrap()];

    for frame in &frames {
        assert_eq!(
            detector.detect(frame).unwrap(),
            !detector.detect_all(frame).unwrap().is_empty()
        );
    }
}

#[test]
fn test_thin_outline_fails_border_check() {
    // 1px outline: the 2px sampling strip is half background
    let mut img = blank();
    draw_filled_rect_mut(&mut img, Rect::at(449, 334).of_size(202, 82), BORDER);
    draw_filled_rect_mut(&mut img, Rect::at(450, 335).of_size(200, 80), FILL);
    let frame = Frame::new(img).unwrap();

    assert!(bubble_detector().detect_all(&frame).unwrap().is_empty());
}

#[test]
fn test_bubble_over_minimap_ignored() {
    let mut img = blank();
    draw_bubble(&mut img, 1500, 780);
    let frame = Frame::new(img).unwrap();

    assert!(bubble_detector().detect_all(&frame).unwrap().is_empty());
}

#[test]
fn test_small_fill_below_min_area_ignored() {
    let mut img = blank();
    draw_filled_rect_mut(&mut img, Rect::at(400, 300).of_size(300, 150), BORDER);
    draw_filled_rect_mut(&mut img, Rect::at(500, 360).of_size(15, 15), FILL);
    let frame = Frame::new(img).unwrap();

    assert!(bubble_detector().detect_all(&frame).unwrap().is_empty());
}

#[test]
fn test_small_outline_skipped_before_fill_pass() {
    // Well-formed bubble, but the outline is below the minimum object size
    let mut img = blank();
    draw_filled_rect_mut(&mut img, Rect::at(400, 300).of_size(90, 60), BORDER);
    draw_filled_rect_mut(&mut img, Rect::at(410, 310).of_size(70, 40), FILL);
    let frame = Frame::new(img).unwrap();

    assert!(bubble_detector().detect_all(&frame).unwrap().is_empty());
}

#[test]
fn test_same_bubble_at_half_resolution() {
    let mut img = RgbaImage::from_pixel(960, 540, BACKGROUND);
    draw_filled_rect_mut(&mut img, Rect::at(200, 150).of_size(150, 75), BORDER);
    draw_filled_rect_mut(&mut img, Rect::at(225, 167).of_size(100, 40), FILL);
    let frame = Frame::new(img).unwrap();

    let hits = bubble_detector().detect_all(&frame).unwrap();
    assert_eq!(hits.len(), 1);
    let (cx, cy) = hits[0].center();
    assert!((cx - 275.0 / 960.0).abs() < 1e-9);
    assert!((cy - 187.0 / 540.0).abs() < 1e-9);
}

#[test]
fn test_config_from_band_table() {
    let table = ColorBandTable::standard();
    let config = DialogBubbleConfig::from_bands(&table).unwrap();
    assert_eq!(config, DialogBubbleConfig::default());
}

#[test]
fn test_any_detector_dispatch() {
    let detectors: Vec<AnyDetector> = vec![
        bubble_detector().into(),
        MapFlyMenuDetector::default().into(),
    ];
    let mut img = blank();
    draw_bubble(&mut img, 400, 300);
    let frame = Frame::new(img).unwrap();

    let names: Vec<&str> = detectors.iter().map(|d| d.name()).collect();
    assert_eq!(names, ["DialogBubbleDetector", "MapFlyMenuDetector"]);
    assert!(detectors[0].detect(&frame).unwrap());
    assert!(!detectors[1].detect(&frame).unwrap());
}
