//! Packed one-bit-per-pixel masks

use super::boxes::PixelBox;
use super::color::ColorRange;
use super::frame::ImageView;

const WORD_BITS: u32 = 64;

/// Bit `x % 64` of word `y * words_per_row + x / 64` is pixel `(x, y)`.
/// Padding bits past `width` in the last word of a row are always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    words_per_row: usize,
    words: Vec<u64>,
}

impl BinaryMask {
    pub fn new(width: u32, height: u32) -> Self {
        let words_per_row = width.div_ceil(WORD_BITS) as usize;
        Self {
            width,
            height,
            words_per_row,
            words: vec![0; words_per_row * height as usize],
        }
    }

    /// Segment a view: a bit is set where the pixel falls inside `range`.
    pub fn from_range(view: &ImageView<'_>, range: &ColorRange) -> Self {
        let mut mask = Self::new(view.width(), view.height());
        for y in 0..view.height() {
            let row = y as usize * mask.words_per_row;
            for x in 0..view.width() {
                if range.contains(view.pixel(x, y)) {
                    mask.words[row + (x / WORD_BITS) as usize] |= 1u64 << (x % WORD_BITS);
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    pub(crate) fn word_count(&self) -> usize {
        self.words.len()
    }

    pub(crate) fn word(&self, index: usize) -> u64 {
        self.words[index]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> (usize, u64) {
        (
            y as usize * self.words_per_row + (x / WORD_BITS) as usize,
            1u64 << (x % WORD_BITS),
        )
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        let (i, bit) = self.index(x, y);
        self.words[i] & bit != 0
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        let (i, bit) = self.index(x, y);
        if value {
            self.words[i] |= bit;
        } else {
            self.words[i] &= !bit;
        }
    }

    /// Clear a bit and report whether it was set.
    #[inline]
    pub(crate) fn take(&mut self, x: u32, y: u32) -> bool {
        let (i, bit) = self.index(x, y);
        let was_set = self.words[i] & bit != 0;
        self.words[i] &= !bit;
        was_set
    }

    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Set pixels inside `region`, which must fit in the mask.
    pub fn count_ones_in(&self, region: &PixelBox) -> u64 {
        let mut total = 0u64;
        for y in region.min_y..region.max_y {
            for x in region.min_x..region.max_x {
                total += self.get(x, y) as u64;
            }
        }
        total
    }

    /// Mean intensity of the black/white rendering over `region`, where set
    /// pixels render black (0) and clear pixels white (255).
    pub fn clear_intensity_in(&self, region: &PixelBox) -> f64 {
        let area = region.area();
        if area == 0 {
            return 0.0;
        }
        let clear = area - self.count_ones_in(region);
        255.0 * clear as f64 / area as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::frame::Frame;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_from_range_sets_matching_pixels() {
        let mut img = RgbaImage::from_pixel(70, 3, Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(65, 2, Rgba([255, 0, 0, 255]));
        let frame = Frame::new(img).unwrap();
        let red = ColorRange::new([200, 0, 0, 255], [255, 50, 50, 255]);

        let mask = BinaryMask::from_range(&frame.full_view(), &red);

        assert_eq!(mask.words_per_row(), 2);
        assert!(mask.get(0, 0));
        assert!(mask.get(65, 2));
        assert!(!mask.get(1, 0));
        assert_eq!(mask.count_ones(), 2);
    }

    #[test]
    fn test_take_clears_bit() {
        let mut mask = BinaryMask::new(8, 8);
        mask.set(3, 4, true);
        assert!(mask.take(3, 4));
        assert!(!mask.take(3, 4));
        assert_eq!(mask.count_ones(), 0);
    }

    #[test]
    fn test_clear_intensity() {
        let mut mask = BinaryMask::new(4, 4);
        for x in 0..4 {
            mask.set(x, 0, true);
        }
        assert_eq!(mask.clear_intensity_in(&PixelBox::new(0, 0, 4, 1)), 0.0);
        assert_eq!(mask.clear_intensity_in(&PixelBox::new(0, 0, 4, 2)), 127.5);
        assert_eq!(mask.clear_intensity_in(&PixelBox::new(0, 2, 4, 4)), 255.0);
    }
}
