use crate::inference::InferenceError;
use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for frame sources.
pub type SourceResult<T> = Result<T, SourceError>;

/// A specialized `Result` type for waiting on watchers.
pub type WatchResult<T> = Result<T, WatchError>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Frame source closed")]
    Closed,

    #[error("No frames found in {path:?}")]
    EmptyDirectory { path: PathBuf },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode frame {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Unusable frame: {source}")]
    Frame {
        #[from]
        source: InferenceError,
    },
}

/// Failures of [`crate::watch::wait_until`]. Timeout and cancellation are
/// outcomes, not errors.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Frame source closed before any watcher was satisfied")]
    SourceClosed,

    #[error("Frame source failed: {source}")]
    Source { source: SourceError },

    #[error("Watcher update failed: {source}")]
    Inference {
        #[from]
        source: InferenceError,
    },
}

impl From<SourceError> for WatchError {
    fn from(source: SourceError) -> Self {
        match source {
            SourceError::Closed => WatchError::SourceClosed,
            other => WatchError::Source { source: other },
        }
    }
}
