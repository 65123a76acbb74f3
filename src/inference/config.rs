//! Configuration for the dialog bubble detector

use super::bands::ColorBandTable;
use super::boxes::NormalizedBox;
use super::color::{Color, ColorRange};
use super::error::{ConfigError, InferenceError, InferenceResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Resolution the pixel-sized thresholds are written for.
pub const REFERENCE_WIDTH: f64 = 1920.0;
pub const REFERENCE_HEIGHT: f64 = 1080.0;

pub const BAND_DIALOG_BORDER: &str = "dialog_border";
pub const BAND_DIALOG_FILL: &str = "dialog_fill";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogBubbleConfig {
    /// Label attached to every detection
    pub label: Option<String>,
    /// Region drawn for debugging; detection always scans the whole frame
    pub search_box: NormalizedBox,
    pub overlay_color: Color,
    /// Outline colour of a bubble (orange)
    pub border: ColorRange,
    /// Interior colour of a bubble (yellow)
    pub fill: ColorRange,
    /// Pixel cutoff for the whole-frame border pass
    pub border_min_area: u64,
    /// Pixel cutoff for the fill pass inside each border
    pub fill_min_area: u64,
    /// Minimum border object size in pixels at 1920x1080
    pub min_object_width_px: f64,
    pub min_object_height_px: f64,
    /// Accepted fill size envelope, frame-relative
    pub min_width: f64,
    pub min_height: f64,
    pub max_height: f64,
    /// Persistent UI (the mini map) that shares the bubble colours
    pub exclusion_zone: NormalizedBox,
    /// Distance from the frame edge that counts as touching it; also the
    /// thickness of the sampled border strips
    pub edge_tolerance: f64,
    /// Inset of the border strips away from the rounded corners
    pub corner_margin_x: f64,
    pub corner_margin_y: f64,
    /// Max mean brightness of a strip in the border black/white rendering
    pub border_brightness_max: f64,
    /// Reject candidates taller than they are wide (in pixels)
    pub require_wider_than_tall: bool,
}

impl Default for DialogBubbleConfig {
    fn default() -> Self {
        Self {
            label: Some("dialog_bubble".to_string()),
            search_box: NormalizedBox::new(0.0, 0.0, 0.999, 0.999),
            overlay_color: Color::GREEN,
            border: ColorRange::from_argb(0xffc07000, 0xffffc550),
            fill: ColorRange::from_argb(0xffd0b000, 0xffffff30),
            border_min_area: 50,
            fill_min_area: 300,
            min_object_width_px: 100.0,
            min_object_height_px: 70.0,
            min_width: 0.052,
            min_height: 0.065,
            max_height: 0.13,
            exclusion_zone: NormalizedBox::new(0.82, 0.68, 0.18, 0.32),
            edge_tolerance: 0.001,
            corner_margin_x: 0.021,
            corner_margin_y: 0.03,
            border_brightness_max: 50.0,
            require_wider_than_tall: true,
        }
    }
}

impl DialogBubbleConfig {
    /// Default thresholds with colour bands taken from the shared table.
    pub fn from_bands(table: &ColorBandTable) -> InferenceResult<Self> {
        Ok(Self {
            border: table.get(BAND_DIALOG_BORDER)?,
            fill: table.get(BAND_DIALOG_FILL)?,
            ..Self::default()
        })
    }

    /// Read a JSON config; missing fields take their defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> InferenceResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| InferenceError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|source| InferenceError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.border.validate("border")?;
        self.fill.validate("fill")?;
        self.search_box.validate("search_box")?;
        self.exclusion_zone.validate("exclusion_zone")?;
        if self.exclusion_zone.area() <= 0.0 {
            return Err(ConfigError::EmptyExclusionZone);
        }

        for (name, value) in [
            ("edge_tolerance", self.edge_tolerance),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("max_height", self.max_height),
            ("min_object_width_px", self.min_object_width_px),
            ("min_object_height_px", self.min_object_height_px),
            ("corner_margin_x", self.corner_margin_x),
            ("corner_margin_y", self.corner_margin_y),
            ("border_brightness_max", self.border_brightness_max),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite {
                    name: name.to_string(),
                    value,
                });
            }
        }

        for (name, value) in [
            ("edge_tolerance", self.edge_tolerance),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("max_height", self.max_height),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive {
                    name: name.to_string(),
                    value,
                });
            }
        }
        // Edge bands from both sides would cover the whole frame
        if self.edge_tolerance >= 0.5 {
            return Err(ConfigError::OutOfRange {
                name: "edge_tolerance".to_string(),
                value: self.edge_tolerance,
                expected: "below 0.5",
            });
        }

        for (name, value) in [
            ("min_object_width_px", self.min_object_width_px),
            ("min_object_height_px", self.min_object_height_px),
            ("corner_margin_x", self.corner_margin_x),
            ("corner_margin_y", self.corner_margin_y),
            ("border_brightness_max", self.border_brightness_max),
        ] {
            if value < 0.0 {
                return Err(ConfigError::OutOfRange {
                    name: name.to_string(),
                    value,
                    expected: "zero or more",
                });
            }
        }
        if self.min_height > self.max_height {
            return Err(ConfigError::InvalidSizeEnvelope {
                min_height: self.min_height,
                max_height: self.max_height,
            });
        }

        // Each strip keeps some length after both corner insets
        if 2.0 * self.corner_margin_x >= self.min_width {
            return Err(ConfigError::CornerMarginTooLarge {
                margin: self.corner_margin_x,
                side: self.min_width,
            });
        }
        if 2.0 * self.corner_margin_y >= self.min_height {
            return Err(ConfigError::CornerMarginTooLarge {
                margin: self.corner_margin_y,
                side: self.min_height,
            });
        }
        Ok(())
    }

    /// Minimum border object size scaled to a concrete frame.
    pub fn min_object_size(&self, frame_width: u32, frame_height: u32) -> (u32, u32) {
        (
            (frame_width as f64 / REFERENCE_WIDTH * self.min_object_width_px) as u32,
            (frame_height as f64 / REFERENCE_HEIGHT * self.min_object_height_px) as u32,
        )
    }
}

/// Fewer false positives: cleaner borders and bigger bubbles required
pub fn create_strict_config() -> DialogBubbleConfig {
    DialogBubbleConfig {
        min_object_width_px: 180.0,
        min_width: 0.07,
        border_brightness_max: 25.0,
        ..DialogBubbleConfig::default()
    }
}

/// Tolerates partly occluded borders and smaller bubbles
pub fn create_loose_config() -> DialogBubbleConfig {
    DialogBubbleConfig {
        fill_min_area: 200,
        min_width: 0.045,
        min_height: 0.062,
        border_brightness_max: 90.0,
        ..DialogBubbleConfig::default()
    }
}
