//! Frame-relative and pixel-space rectangles

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Rectangle in frame-relative coordinates. All fields are fractions of the
/// frame's width or height, so a box means the same thing at any resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box and check it lies inside the unit square.
    pub fn validated(
        name: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, ConfigError> {
        let b = Self::new(x, y, width, height);
        b.validate(name)?;
        Ok(b)
    }

    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let in_range = self.x >= 0.0
            && self.y >= 0.0
            && self.width >= 0.0
            && self.height >= 0.0
            && self.max_x() <= 1.0
            && self.max_y() <= 1.0;
        if in_range {
            Ok(())
        } else {
            Err(ConfigError::BoxOutOfRange {
                name: name.to_string(),
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Closed-interval overlap test: boxes sharing only an edge count as
    /// overlapping.
    pub fn intersects(&self, other: &NormalizedBox) -> bool {
        self.x <= other.max_x()
            && other.x <= self.max_x()
            && self.y <= other.max_y()
            && other.y <= self.max_y()
    }

    /// Is the point inside this box, with the lower edges pulled in by
    /// `tolerance`.
    pub fn contains_point(&self, px: f64, py: f64, tolerance: f64) -> bool {
        px >= self.x - tolerance && py >= self.y - tolerance && px <= self.max_x() && py <= self.max_y()
    }

    /// Convert to pixels of a `width`x`height` image, rounding both edges to
    /// the nearest pixel boundary. A box that rounds to nothing grows to one
    /// pixel. Returns `None` when the result does not fit in the image.
    pub fn to_pixel_box(&self, width: u32, height: u32) -> Option<PixelBox> {
        let (w, h) = (width as f64, height as f64);
        let min_x = (self.x * w + 0.5).floor();
        let min_y = (self.y * h + 0.5).floor();
        let max_x = (self.max_x() * w + 0.5).floor().max(min_x + 1.0);
        let max_y = (self.max_y() * h + 0.5).floor().max(min_y + 1.0);
        if min_x < 0.0 || min_y < 0.0 || max_x > w || max_y > h {
            return None;
        }
        Some(PixelBox::new(
            min_x as u32,
            min_y as u32,
            max_x as u32,
            max_y as u32,
        ))
    }
}

/// Rectangle in one image's pixel space. `max_*` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelBox {
    pub const fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_valid(&self) -> bool {
        self.max_x > self.min_x && self.max_y > self.min_y
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.is_valid() && self.max_x <= width && self.max_y <= height
    }

    pub fn to_normalized(&self, image_width: u32, image_height: u32) -> NormalizedBox {
        let (w, h) = (image_width as f64, image_height as f64);
        NormalizedBox::new(
            self.min_x as f64 / w,
            self.min_y as f64 / h,
            self.width() as f64 / w,
            self.height() as f64 / h,
        )
    }
}

/// Map `child`, given in pixels of a `crop_width`x`crop_height` crop, back
/// into the coordinates `parent` is expressed in:
/// `parent.origin + (child / crop_dims) * parent.size`.
pub fn translate_to_parent(
    parent: &NormalizedBox,
    crop_width: u32,
    crop_height: u32,
    child: &PixelBox,
) -> NormalizedBox {
    let sx = parent.width / crop_width as f64;
    let sy = parent.height / crop_height as f64;
    NormalizedBox::new(
        parent.x + child.min_x as f64 * sx,
        parent.y + child.min_y as f64 * sy,
        child.width() as f64 * sx,
        child.height() as f64 * sy,
    )
}

/// Order boxes left half first, then right half; top to bottom within a
/// half.
pub fn sort_by_screen_side(boxes: &mut [NormalizedBox]) {
    boxes.sort_by(|a, b| {
        let (ax, ay) = a.center();
        let (bx, by) = b.center();
        let a_left = ax < 0.5;
        let b_left = bx < 0.5;
        b_left
            .cmp(&a_left)
            .then(ay.partial_cmp(&by).unwrap_or(std::cmp::Ordering::Equal))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_box_normalizes_against_image() {
        let px = PixelBox::new(480, 270, 960, 540);
        let nb = px.to_normalized(1920, 1080);
        assert_eq!(nb, NormalizedBox::new(0.25, 0.25, 0.25, 0.25));
    }

    #[test]
    fn test_translate_to_parent_is_exact() {
        // Border at (400,300) 300x150 in a 1920x1080 frame
        let border_px = PixelBox::new(400, 300, 700, 450);
        let border = border_px.to_normalized(1920, 1080);
        // Fill at (50,35) 200x80 inside the crop
        let fill = PixelBox::new(50, 35, 250, 115);

        let translated = translate_to_parent(&border, 300, 150, &fill);

        assert!((translated.x - 450.0 / 1920.0).abs() < 1e-12);
        assert!((translated.y - 335.0 / 1080.0).abs() < 1e-12);
        assert!((translated.width - 200.0 / 1920.0).abs() < 1e-12);
        assert!((translated.height - 80.0 / 1080.0).abs() < 1e-12);
    }

    #[test]
    fn test_translate_round_trip_recovers_pixels() {
        for (frame_w, frame_h) in [(1920, 1080), (1280, 720), (1366, 768)] {
            let border_px = PixelBox::new(123, 77, 123 + 331, 77 + 157);
            let border = border_px.to_normalized(frame_w, frame_h);
            let fill = PixelBox::new(17, 9, 17 + 251, 9 + 101);

            let translated =
                translate_to_parent(&border, border_px.width(), border_px.height(), &fill);
            let back = translated.to_pixel_box(frame_w, frame_h).unwrap();

            let expected = PixelBox::new(140, 86, 140 + 251, 86 + 101);
            for (got, want) in [
                (back.min_x, expected.min_x),
                (back.min_y, expected.min_y),
                (back.max_x, expected.max_x),
                (back.max_y, expected.max_y),
            ] {
                assert!(got.abs_diff(want) <= 1, "{frame_w}x{frame_h}: {got} vs {want}");
            }
        }
    }

    #[test]
    fn test_to_pixel_box_rejects_outside_and_grows_empty() {
        assert_eq!(NormalizedBox::new(-0.01, 0.5, 0.1, 0.1).to_pixel_box(100, 100), None);
        assert_eq!(NormalizedBox::new(0.95, 0.5, 0.1, 0.1).to_pixel_box(100, 100), None);

        let thin = NormalizedBox::new(0.5, 0.5, 0.001, 0.2).to_pixel_box(100, 100).unwrap();
        assert_eq!(thin.width(), 1);
        assert_eq!(thin.height(), 20);
    }

    #[test]
    fn test_intersects_touching_edges() {
        let a = NormalizedBox::new(0.1, 0.1, 0.2, 0.2);
        let touching = NormalizedBox::new(0.3, 0.1, 0.2, 0.2);
        let apart = NormalizedBox::new(0.31, 0.1, 0.2, 0.2);
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_validate_unit_square() {
        assert!(NormalizedBox::validated("ok", 0.0, 0.0, 1.0, 1.0).is_ok());
        assert!(NormalizedBox::validated("wide", 0.5, 0.0, 0.6, 0.1).is_err());
        assert!(NormalizedBox::validated("neg", -0.1, 0.0, 0.1, 0.1).is_err());
    }

    #[test]
    fn test_sort_by_screen_side() {
        let mut boxes = vec![
            NormalizedBox::new(0.7, 0.1, 0.1, 0.1),
            NormalizedBox::new(0.1, 0.6, 0.1, 0.1),
            NormalizedBox::new(0.1, 0.2, 0.1, 0.1),
            NormalizedBox::new(0.7, 0.05, 0.1, 0.1),
        ];
        sort_by_screen_side(&mut boxes);
        let order: Vec<(f64, f64)> = boxes.iter().map(|b| (b.x, b.y)).collect();
        assert_eq!(order, vec![(0.1, 0.2), (0.1, 0.6), (0.7, 0.05), (0.7, 0.1)]);
    }
}
