use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for inference operations.
pub type InferenceResult<T> = Result<T, InferenceError>;

/// Errors raised while building or running a detector.
///
/// "Nothing detected" is never an error. Everything here is either a
/// configuration mistake (caught once, at construction) or malformed input
/// that points at a bug in the caller.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Frame has no pixels ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },

    #[error(
        "Crop [{min_x},{min_y})-[{max_x},{max_y}) lies outside the {image_width}x{image_height} image"
    )]
    CropOutOfBounds {
        min_x: u32,
        min_y: u32,
        max_x: u32,
        max_y: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Invalid detector configuration: {source}")]
    InvalidConfig {
        #[from]
        source: ConfigError,
    },

    #[error("Colour band table has not been installed")]
    BandsNotInstalled,

    #[error("Colour band table is already installed")]
    BandsAlreadyInstalled,

    #[error("Colour band '{name}' is missing from the band table")]
    UnknownBand { name: String },

    #[error("Failed to read config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Configuration problems. These are not retryable: the same configuration
/// fails the same way every time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Colour range '{name}' has min > max on channel {channel}")]
    InvertedColorRange { name: String, channel: usize },

    #[error("Exclusion zone has zero area")]
    EmptyExclusionZone,

    #[error("Box '{name}' is outside the unit square: {x},{y} {width}x{height}")]
    BoxOutOfRange {
        name: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    #[error("Size envelope is empty: min height {min_height} > max height {max_height}")]
    InvalidSizeEnvelope { min_height: f64, max_height: f64 },

    #[error("Corner margin {margin} leaves no border strip on a side of minimum length {side}")]
    CornerMarginTooLarge { margin: f64, side: f64 },

    #[error("'{name}' must be positive, got {value}")]
    NonPositive { name: String, value: f64 },

    #[error("'{name}' must be a finite number, got {value}")]
    NotFinite { name: String, value: f64 },

    #[error("'{name}' must be {expected}, got {value}")]
    OutOfRange {
        name: String,
        value: f64,
        expected: &'static str,
    },
}
