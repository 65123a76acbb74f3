//! Detector interface shared by every visual check

use super::boxes::NormalizedBox;
use super::color::Color;
use super::dialog_bubble::DialogBubbleDetector;
use super::error::InferenceResult;
use super::frame::Frame;
use super::map_menu::{MapDestinationMenuDetector, MapFlyMenuDetector};
use serde::Serialize;

/// One accepted hit, in frame-relative coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub bbox: NormalizedBox,
    pub label: Option<String>,
}

impl Detection {
    pub fn new(bbox: NormalizedBox) -> Self {
        Self { bbox, label: None }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn center(&self) -> (f64, f64) {
        self.bbox.center()
    }
}

/// Stateless, reusable check against a single frame.
///
/// `Err` means the input or the detector is broken; a frame that simply does
/// not show the target is `Ok(false)` / `Ok(vec![])`.
pub trait Detector: Send + Sync {
    fn name(&self) -> &str;

    /// Colour used when drawing [`Detector::describe_regions`].
    fn color(&self) -> Color;

    /// True iff [`Detector::detect_all`] would be non-empty. Implementations
    /// may stop at the first hit.
    fn detect(&self, frame: &Frame) -> InferenceResult<bool> {
        Ok(!self.detect_all(frame)?.is_empty())
    }

    /// All hits, in scan order.
    fn detect_all(&self, frame: &Frame) -> InferenceResult<Vec<Detection>>;

    /// Static regions of interest for debug overlays.
    fn describe_regions(&self) -> Vec<NormalizedBox>;
}

/// Closed set of bundled detectors, chosen at configuration time.
pub enum AnyDetector {
    DialogBubble(DialogBubbleDetector),
    MapFlyMenu(MapFlyMenuDetector),
    MapDestinationMenu(MapDestinationMenuDetector),
}

impl Detector for AnyDetector {
    fn name(&self) -> &str {
        match self {
            AnyDetector::DialogBubble(d) => d.name(),
            AnyDetector::MapFlyMenu(d) => d.name(),
            AnyDetector::MapDestinationMenu(d) => d.name(),
        }
    }

    fn color(&self) -> Color {
        match self {
            AnyDetector::DialogBubble(d) => d.color(),
            AnyDetector::MapFlyMenu(d) => d.color(),
            AnyDetector::MapDestinationMenu(d) => d.color(),
        }
    }

    fn detect(&self, frame: &Frame) -> InferenceResult<bool> {
        match self {
            AnyDetector::DialogBubble(d) => d.detect(frame),
            AnyDetector::MapFlyMenu(d) => d.detect(frame),
            AnyDetector::MapDestinationMenu(d) => d.detect(frame),
        }
    }

    fn detect_all(&self, frame: &Frame) -> InferenceResult<Vec<Detection>> {
        match self {
            AnyDetector::DialogBubble(d) => d.detect_all(frame),
            AnyDetector::MapFlyMenu(d) => d.detect_all(frame),
            AnyDetector::MapDestinationMenu(d) => d.detect_all(frame),
        }
    }

    fn describe_regions(&self) -> Vec<NormalizedBox> {
        match self {
            AnyDetector::DialogBubble(d) => d.describe_regions(),
            AnyDetector::MapFlyMenu(d) => d.describe_regions(),
            AnyDetector::MapDestinationMenu(d) => d.describe_regions(),
        }
    }
}

impl From<DialogBubbleDetector> for AnyDetector {
    fn from(d: DialogBubbleDetector) -> Self {
        AnyDetector::DialogBubble(d)
    }
}

impl From<MapFlyMenuDetector> for AnyDetector {
    fn from(d: MapFlyMenuDetector) -> Self {
        AnyDetector::MapFlyMenu(d)
    }
}

impl From<MapDestinationMenuDetector> for AnyDetector {
    fn from(d: MapDestinationMenuDetector) -> Self {
        AnyDetector::MapDestinationMenu(d)
    }
}
