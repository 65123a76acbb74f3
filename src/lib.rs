pub mod inference;
pub mod watch;

pub use inference::{AnyDetector, Detection, Detector, Frame, NormalizedBox};
pub use watch::{VisualWatcher, WaitOutcome, wait_until};
