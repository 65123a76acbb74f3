// Channels connecting capture and control tasks to the wait loop
use super::source::ChannelFrameSource;
use super::types::FrameSnapshot;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Frames buffered between a capture task and the wait loop
pub const FRAME_CHANNEL_CAPACITY: usize = 4;

/// Capture side sends snapshots, the wait loop pulls them from the source.
pub fn create_frame_channel() -> (mpsc::Sender<FrameSnapshot>, ChannelFrameSource) {
    let (frame_tx, frame_rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
    (frame_tx, ChannelFrameSource::new(frame_rx))
}

pub fn create_cancel_channel() -> (CancelHandle, CancelSignal) {
    let token = CancellationToken::new();
    (
        CancelHandle {
            token: token.clone(),
        },
        CancelSignal { token },
    )
}

/// Requests cancellation. Cloneable; cancelling is idempotent.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

/// Observes cancellation requests.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    token: CancellationToken,
}

impl CancelSignal {
    /// A signal nobody can trigger.
    pub fn never() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Follow a token owned by the caller, e.g. a service-wide shutdown.
    pub fn from_token(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once cancellation is requested.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}
