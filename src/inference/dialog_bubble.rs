//! Two-pass dialog bubble detector
//!
//! Bubbles are a yellow body inside an orange outline. The first waterfill
//! pass finds orange objects across the whole frame; the second looks for
//! yellow only inside each orange object's bounding box. Yellow regions
//! that survive the geometric rules become detections. Overlapping bubbles
//! yield a single detection.

use super::binary::BinaryMask;
use super::boxes::{NormalizedBox, translate_to_parent};
use super::color::Color;
use super::config::DialogBubbleConfig;
use super::detector::{Detection, Detector};
use super::error::InferenceResult;
use super::frame::Frame;
use super::waterfill::WaterfillSession;

/// Why a candidate was dropped, in the order the rules are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Touches a frame edge, so the bubble is probably cut off
    Edge,
    /// Bottom-right corner sits in the excluded UI zone
    ExclusionZone,
    /// Outside the expected size envelope
    Size,
    /// Taller than wide
    AspectRatio,
    /// The outline around the body is not consistently border coloured
    BorderSanity,
    /// Intersects a bubble accepted earlier in this frame
    Overlap,
}

pub struct DialogBubbleDetector {
    config: DialogBubbleConfig,
}

impl DialogBubbleDetector {
    pub fn new(config: DialogBubbleConfig) -> InferenceResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DialogBubbleConfig {
        &self.config
    }

    /// Run both passes. With `stop_at_first` the scan ends at the first
    /// accepted bubble.
    fn scan(&self, frame: &Frame, stop_at_first: bool) -> InferenceResult<Vec<NormalizedBox>> {
        let cfg = &self.config;
        let (frame_width, frame_height) = (frame.width(), frame.height());
        let (min_object_width, min_object_height) =
            cfg.min_object_size(frame_width, frame_height);

        // Kept intact for the border strip checks; the session erases its copy
        let border_mask = BinaryMask::from_range(&frame.full_view(), &cfg.border);
        let mut border_session = WaterfillSession::new(border_mask.clone());

        let mut accepted: Vec<NormalizedBox> = Vec::new();
        let mut border_objects = 0usize;

        for border in border_session.iter(cfg.border_min_area) {
            if border.width() < min_object_width || border.height() < min_object_height {
                continue;
            }
            border_objects += 1;

            let border_box = border.bounds.to_normalized(frame_width, frame_height);
            let crop = frame.view(border.bounds)?;
            let fill_mask = BinaryMask::from_range(&crop, &cfg.fill);
            let mut fill_session = WaterfillSession::new(fill_mask);

            for fill in fill_session.iter(cfg.fill_min_area) {
                let candidate =
                    translate_to_parent(&border_box, crop.width(), crop.height(), &fill.bounds);

                if let Err(rule) = self.classify(
                    &candidate,
                    frame_width,
                    frame_height,
                    &border_mask,
                    &accepted,
                ) {
                    log::trace!(
                        "🚫 Bubble candidate at ({:.3},{:.3}) {:.3}x{:.3} rejected: {:?}",
                        candidate.x,
                        candidate.y,
                        candidate.width,
                        candidate.height,
                        rule
                    );
                    continue;
                }

                accepted.push(candidate);
                if stop_at_first {
                    return Ok(accepted);
                }
            }
        }

        log::debug!(
            "🔍 Dialog bubbles: {} border objects, {} accepted ({}x{})",
            border_objects,
            accepted.len(),
            frame_width,
            frame_height
        );
        Ok(accepted)
    }

    /// Apply the rejection rules in order and report the first that fails.
    pub(crate) fn classify(
        &self,
        candidate: &NormalizedBox,
        frame_width: u32,
        frame_height: u32,
        border_mask: &BinaryMask,
        accepted: &[NormalizedBox],
    ) -> Result<(), Rejection> {
        let cfg = &self.config;
        let t = cfg.edge_tolerance;
        let (min_x, min_y) = (candidate.x, candidate.y);
        let (max_x, max_y) = (candidate.max_x(), candidate.max_y());

        if min_x < t || min_y < t || max_x >= 1.0 - t || max_y >= 1.0 - t {
            return Err(Rejection::Edge);
        }

        if cfg.exclusion_zone.contains_point(max_x, max_y, t) {
            return Err(Rejection::ExclusionZone);
        }

        if candidate.width < cfg.min_width
            || candidate.height < cfg.min_height
            || candidate.height > cfg.max_height
        {
            return Err(Rejection::Size);
        }

        if cfg.require_wider_than_tall
            && candidate.width * (frame_width as f64) < candidate.height * (frame_height as f64)
        {
            return Err(Rejection::AspectRatio);
        }

        if !self.has_clean_border(candidate, frame_width, frame_height, border_mask) {
            return Err(Rejection::BorderSanity);
        }

        if accepted.iter().any(|found| candidate.intersects(found)) {
            return Err(Rejection::Overlap);
        }

        Ok(())
    }

    /// Sample thin strips just outside each side, away from the corners. In
    /// the black/white rendering of the border band a real outline is dark.
    fn has_clean_border(
        &self,
        candidate: &NormalizedBox,
        frame_width: u32,
        frame_height: u32,
        border_mask: &BinaryMask,
    ) -> bool {
        let cfg = &self.config;
        let t = cfg.edge_tolerance;
        let (cx, cy) = (cfg.corner_margin_x, cfg.corner_margin_y);
        let (min_x, min_y) = (candidate.x, candidate.y);
        let (max_x, max_y) = (candidate.max_x(), candidate.max_y());
        let side_len = candidate.height - 2.0 * cy;
        let top_len = candidate.width - 2.0 * cx;

        let strips = [
            NormalizedBox::new(min_x - t, min_y + cy, t, side_len),
            NormalizedBox::new(max_x, min_y + cy, t, side_len),
            NormalizedBox::new(min_x + cx, min_y - t, top_len, t),
            NormalizedBox::new(min_x + cx, max_y, top_len, t),
        ];

        strips.iter().all(|strip| {
            // A strip we cannot sample cannot confirm the outline
            let Some(pixels) = strip.to_pixel_box(frame_width, frame_height) else {
                return false;
            };
            border_mask.clear_intensity_in(&pixels) <= cfg.border_brightness_max
        })
    }
}

impl Detector for DialogBubbleDetector {
    fn name(&self) -> &str {
        "DialogBubbleDetector"
    }

    fn color(&self) -> Color {
        self.config.overlay_color
    }

    fn detect(&self, frame: &Frame) -> InferenceResult<bool> {
        Ok(!self.scan(frame, true)?.is_empty())
    }

    fn detect_all(&self, frame: &Frame) -> InferenceResult<Vec<Detection>> {
        Ok(self
            .scan(frame, false)?
            .into_iter()
            .map(|bbox| Detection::new(bbox).with_label(self.config.label.clone()))
            .collect())
    }

    fn describe_regions(&self) -> Vec<NormalizedBox> {
        vec![self.config.search_box]
    }
}
