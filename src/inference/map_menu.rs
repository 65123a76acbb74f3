//! Map menu state checks
//!
//! Both menus share one slot on screen. When the fly menu is open the slot
//! shows two white buttons stacked; the destination menu shows only the
//! upper one and leaves the fly button's slot dark.

use super::boxes::NormalizedBox;
use super::color::Color;
use super::detector::{Detection, Detector};
use super::error::InferenceResult;
use super::frame::Frame;
use super::stats::{image_stats, is_white};

const FLY_MIDDLE: NormalizedBox = NormalizedBox::new(0.523, 0.680, 0.080, 0.010);
const FLY_BOTTOM: NormalizedBox = NormalizedBox::new(0.523, 0.744, 0.080, 0.020);
const DESTINATION_BOTTOM: NormalizedBox = NormalizedBox::new(0.523, 0.670, 0.080, 0.020);
const DESTINATION_FLY_SLOT: NormalizedBox = NormalizedBox::new(0.523, 0.744, 0.080, 0.020);

fn region_is_white(frame: &Frame, region: &NormalizedBox) -> InferenceResult<bool> {
    let view = frame.view_normalized(region)?;
    Ok(is_white(&image_stats(&view)))
}

/// Map opened with the "Fly" option available.
pub struct MapFlyMenuDetector {
    color: Color,
}

impl MapFlyMenuDetector {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Default for MapFlyMenuDetector {
    fn default() -> Self {
        Self::new(Color::RED)
    }
}

impl Detector for MapFlyMenuDetector {
    fn name(&self) -> &str {
        "MapFlyMenuDetector"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn detect_all(&self, frame: &Frame) -> InferenceResult<Vec<Detection>> {
        if region_is_white(frame, &FLY_MIDDLE)? && region_is_white(frame, &FLY_BOTTOM)? {
            return Ok(vec![Detection::new(FLY_MIDDLE)]);
        }
        Ok(Vec::new())
    }

    fn describe_regions(&self) -> Vec<NormalizedBox> {
        vec![FLY_MIDDLE, FLY_BOTTOM]
    }
}

/// Map opened in destination-only mode: no "Fly" button.
pub struct MapDestinationMenuDetector {
    color: Color,
}

impl MapDestinationMenuDetector {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Default for MapDestinationMenuDetector {
    fn default() -> Self {
        Self::new(Color::BLUE)
    }
}

impl Detector for MapDestinationMenuDetector {
    fn name(&self) -> &str {
        "MapDestinationMenuDetector"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn detect_all(&self, frame: &Frame) -> InferenceResult<Vec<Detection>> {
        if region_is_white(frame, &DESTINATION_BOTTOM)?
            && !region_is_white(frame, &DESTINATION_FLY_SLOT)?
        {
            return Ok(vec![Detection::new(DESTINATION_BOTTOM)]);
        }
        Ok(Vec::new())
    }

    fn describe_regions(&self) -> Vec<NormalizedBox> {
        vec![DESTINATION_BOTTOM, DESTINATION_FLY_SLOT]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const DARK: Rgba<u8> = Rgba([30, 30, 40, 255]);
    const WHITE: Rgba<u8> = Rgba([250, 250, 250, 255]);

    fn paint(img: &mut RgbaImage, region: &NormalizedBox, color: Rgba<u8>) {
        let px = region.to_pixel_box(img.width(), img.height()).unwrap();
        for y in px.min_y..px.max_y {
            for x in px.min_x..px.max_x {
                img.put_pixel(x, y, color);
            }
        }
    }

    fn frame_with(regions: &[NormalizedBox]) -> Frame {
        let mut img = RgbaImage::from_pixel(1920, 1080, DARK);
        for region in regions {
            paint(&mut img, region, WHITE);
        }
        Frame::new(img).unwrap()
    }

    #[test]
    fn test_fly_menu_needs_both_buttons() {
        let detector = MapFlyMenuDetector::default();

        let open = frame_with(&[FLY_MIDDLE, FLY_BOTTOM]);
        let hits = detector.detect_all(&open).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].bbox, FLY_MIDDLE);

        let half = frame_with(&[FLY_MIDDLE]);
        assert!(!detector.detect(&half).unwrap());
    }

    #[test]
    fn test_destination_menu_requires_empty_fly_slot() {
        let detector = MapDestinationMenuDetector::default();

        let destination = frame_with(&[DESTINATION_BOTTOM]);
        assert!(detector.detect(&destination).unwrap());

        // With the fly button present this is the fly menu instead
        let fly = frame_with(&[DESTINATION_BOTTOM, DESTINATION_FLY_SLOT]);
        assert!(!detector.detect(&fly).unwrap());
    }

    #[test]
    fn test_dark_screen_matches_neither() {
        let frame = frame_with(&[]);
        assert!(!MapFlyMenuDetector::default().detect(&frame).unwrap());
        assert!(!MapDestinationMenuDetector::default().detect(&frame).unwrap());
    }

    #[test]
    fn test_regions_and_colors() {
        let fly = MapFlyMenuDetector::new(Color::YELLOW);
        assert_eq!(fly.color(), Color::YELLOW);
        assert_eq!(fly.describe_regions().len(), 2);
        assert_eq!(MapDestinationMenuDetector::default().name(), "MapDestinationMenuDetector");
    }
}
