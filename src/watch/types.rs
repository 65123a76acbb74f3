// Types shared by sources, watchers and the wait loop
use crate::inference::Frame;
use std::fmt;
use tokio::time::Instant;

/// A frame together with the moment it was captured.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub frame: Frame,
    pub timestamp: Instant,
}

impl FrameSnapshot {
    pub fn new(frame: Frame, timestamp: Instant) -> Self {
        Self { frame, timestamp }
    }

    /// Stamp with the current time.
    pub fn now(frame: Frame) -> Self {
        Self::new(frame, Instant::now())
    }
}

/// States of one wait. Only `Polling` loops; the rest are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    Polling,
    Satisfied(usize),
    TimedOut,
    Cancelled,
}

impl WaitState {
    pub fn outcome(self) -> Option<WaitOutcome> {
        match self {
            WaitState::Polling => None,
            WaitState::Satisfied(i) => Some(WaitOutcome::Satisfied(i)),
            WaitState::TimedOut => Some(WaitOutcome::TimedOut),
            WaitState::Cancelled => Some(WaitOutcome::Cancelled),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Index of the first watcher that fired
    Satisfied(usize),
    TimedOut,
    Cancelled,
}

impl WaitOutcome {
    /// Only a timeout is worth waiting again for; cancellation was asked for.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WaitOutcome::TimedOut)
    }
}

impl fmt::Display for WaitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitOutcome::Satisfied(i) => write!(f, "satisfied by watcher {}", i),
            WaitOutcome::TimedOut => write!(f, "timed out"),
            WaitOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}
