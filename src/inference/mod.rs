// Frame analysis: colour segmentation, connected components and the
// detectors built on top of them.

pub mod bands;
pub mod binary;
pub mod boxes;
pub mod color;
pub mod config;
pub mod detector;
pub mod dialog_bubble;
pub mod error;
pub mod frame;
pub mod map_menu;
pub mod stats;
pub mod waterfill;

pub use bands::{ColorBandTable, bands, install_bands};
pub use binary::BinaryMask;
pub use boxes::{NormalizedBox, PixelBox, sort_by_screen_side, translate_to_parent};
pub use color::{Color, ColorRange};
pub use config::{DialogBubbleConfig, create_loose_config, create_strict_config};
pub use detector::{AnyDetector, Detection, Detector};
pub use dialog_bubble::{DialogBubbleDetector, Rejection};
pub use error::{ConfigError, InferenceError, InferenceResult};
pub use frame::{Frame, ImageView};
pub use map_menu::{MapDestinationMenuDetector, MapFlyMenuDetector};
pub use stats::{ImageStats, image_stats, is_white};
pub use waterfill::{Component, WaterfillSession};

#[cfg(test)]
mod tests;
