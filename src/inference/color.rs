//! Colour bands and the per-pixel classifier

use super::error::ConfigError;
use image::Rgba;
use serde::{Deserialize, Serialize};

/// Inclusive RGBA band. A pixel is inside when every channel (alpha
/// included) lies within `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub min: [u8; 4],
    pub max: [u8; 4],
}

impl ColorRange {
    pub const fn new(min: [u8; 4], max: [u8; 4]) -> Self {
        Self { min, max }
    }

    /// Build from packed `0xAARRGGBB` constants.
    pub const fn from_argb(min: u32, max: u32) -> Self {
        Self {
            min: argb_to_rgba(min),
            max: argb_to_rgba(max),
        }
    }

    #[inline]
    pub fn contains(&self, pixel: &Rgba<u8>) -> bool {
        let p = pixel.0;
        p[0] >= self.min[0]
            && p[0] <= self.max[0]
            && p[1] >= self.min[1]
            && p[1] <= self.max[1]
            && p[2] >= self.min[2]
            && p[2] <= self.max[2]
            && p[3] >= self.min[3]
            && p[3] <= self.max[3]
    }

    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        match (0..4).find(|&c| self.min[c] > self.max[c]) {
            Some(channel) => Err(ConfigError::InvertedColorRange {
                name: name.to_string(),
                channel,
            }),
            None => Ok(()),
        }
    }
}

const fn argb_to_rgba(argb: u32) -> [u8; 4] {
    [
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
        (argb >> 24) as u8,
    ]
}

/// Overlay colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const RED: Color = Color([255, 0, 0, 255]);
    pub const GREEN: Color = Color([0, 255, 0, 255]);
    pub const BLUE: Color = Color([0, 0, 255, 255]);
    pub const YELLOW: Color = Color([255, 255, 0, 255]);
    pub const MAGENTA: Color = Color([255, 0, 255, 255]);
    pub const DARK_BLUE: Color = Color([0, 0, 192, 255]);

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_argb_unpacks_channels() {
        let range = ColorRange::from_argb(0xffc07000, 0xffffc550);
        assert_eq!(range.min, [0xc0, 0x70, 0x00, 0xff]);
        assert_eq!(range.max, [0xff, 0xc5, 0x50, 0xff]);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = ColorRange::new([10, 20, 30, 255], [40, 50, 60, 255]);
        assert!(range.contains(&Rgba([10, 20, 30, 255])));
        assert!(range.contains(&Rgba([40, 50, 60, 255])));
        assert!(!range.contains(&Rgba([9, 20, 30, 255])));
        assert!(!range.contains(&Rgba([40, 51, 60, 255])));
        assert!(!range.contains(&Rgba([20, 30, 40, 254])), "alpha is part of the band");
    }

    #[test]
    fn test_validate_rejects_inverted_channel() {
        let range = ColorRange::new([0, 200, 0, 0], [255, 100, 255, 255]);
        assert_eq!(
            range.validate("fill"),
            Err(ConfigError::InvertedColorRange {
                name: "fill".to_string(),
                channel: 1
            })
        );
        assert!(ColorRange::from_argb(0xff000000, 0xffffffff).validate("all").is_ok());
    }
}
