// Watch module
// Drives detectors over a stream of frames: sources deliver snapshots,
// watchers keep the latest result, and the multiplexer waits for the first
// watcher to fire.

pub mod channels;
pub mod error;
pub mod multiplexer;
pub mod overlay;
pub mod source;
pub mod types;
pub mod watcher;


// Re-export the main types and functions for easy access
pub use channels::{CancelHandle, CancelSignal, create_cancel_channel, create_frame_channel};
pub use error::{SourceError, SourceResult, WatchError, WatchResult};
pub use multiplexer::wait_until;
pub use overlay::{ImageOverlay, NullOverlay, OverlayBoxPool, OverlayId, OverlaySink};
pub use source::{ChannelFrameSource, FrameSource, ReplayFrameSource};
pub use types::{FrameSnapshot, WaitOutcome, WaitState};
pub use watcher::{DetectorWatcher, VisualWatcher};
