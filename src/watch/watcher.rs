// Stateful wrappers that feed frames to detectors and remember the result
use super::overlay::{OverlayBoxPool, OverlayId, OverlaySink};
use crate::inference::{Color, Detection, Detector, Frame, InferenceResult, NormalizedBox};
use std::sync::Arc;
use tokio::time::Instant;

/// Enough for every bubble a frame realistically shows
pub const DEFAULT_OVERLAY_CAPACITY: usize = 16;

/// Live hits are drawn in this colour, whatever the detector's own colour.
pub const HIT_COLOR: Color = Color::MAGENTA;

pub trait VisualWatcher: Send {
    fn name(&self) -> &str;

    /// Analyse one frame, replacing the stored result. True when anything
    /// was found. Timestamps are expected to increase.
    fn update(&mut self, frame: &Frame, timestamp: Instant) -> InferenceResult<bool>;

    /// Result of the latest update; empty before the first.
    fn last_result(&self) -> &[Detection];

    fn describe_regions(&self) -> Vec<NormalizedBox>;
}

/// Owns its overlay entries: static regions and one hit layer, removed on drop.
pub struct DetectorWatcher<D: Detector> {
    detector: D,
    last: Vec<Detection>,
    last_timestamp: Option<Instant>,
    pool: OverlayBoxPool,
    overlay: Arc<dyn OverlaySink>,
    regions: Vec<OverlayId>,
    hit_layer: OverlayId,
}

impl<D: Detector> DetectorWatcher<D> {
    pub fn new(detector: D, overlay: Arc<dyn OverlaySink>) -> Self {
        Self::with_capacity(detector, overlay, DEFAULT_OVERLAY_CAPACITY)
    }

    /// Draws the detector's static regions once, in its colour.
    pub fn with_capacity(detector: D, overlay: Arc<dyn OverlaySink>, capacity: usize) -> Self {
        let regions = detector
            .describe_regions()
            .into_iter()
            .map(|region| overlay.add(detector.color(), region))
            .collect();
        let hit_layer = overlay.add_layer(HIT_COLOR);
        Self {
            detector,
            last: Vec::new(),
            last_timestamp: None,
            pool: OverlayBoxPool::with_capacity(capacity),
            overlay,
            regions,
            hit_layer,
        }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn last_timestamp(&self) -> Option<Instant> {
        self.last_timestamp
    }
}

impl<D: Detector> VisualWatcher for DetectorWatcher<D> {
    fn name(&self) -> &str {
        self.detector.name()
    }

    fn update(&mut self, frame: &Frame, timestamp: Instant) -> InferenceResult<bool> {
        if let Some(previous) = self.last_timestamp {
            if timestamp < previous {
                log::debug!("{}: frame older than the previous one", self.detector.name());
            }
        }

        let detections = self.detector.detect_all(frame)?;

        self.pool.reset();
        for detection in &detections {
            if !self.pool.push(detection.bbox) {
                break;
            }
        }
        self.overlay.publish(self.hit_layer, self.pool.as_slice());

        self.last = detections;
        self.last_timestamp = Some(timestamp);
        Ok(!self.last.is_empty())
    }

    fn last_result(&self) -> &[Detection] {
        &self.last
    }

    fn describe_regions(&self) -> Vec<NormalizedBox> {
        self.detector.describe_regions()
    }
}

impl<D: Detector> Drop for DetectorWatcher<D> {
    fn drop(&mut self) {
        for region in self.regions.drain(..) {
            self.overlay.remove(region);
        }
        self.overlay.remove(self.hit_layer);
    }
}
