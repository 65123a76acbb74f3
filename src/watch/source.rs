//! Where frames come from
//!
//! The wait loop only needs "give me the next frame". A live capture task
//! feeds a [`ChannelFrameSource`]; recorded screenshots play back through a
//! [`ReplayFrameSource`].

use super::error::{SourceError, SourceResult};
use super::types::FrameSnapshot;
use crate::inference::Frame;
use std::path::Path;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, sleep};

#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Wait for the next frame. `SourceError::Closed` once no more frames
    /// will ever arrive.
    async fn next_frame(&mut self) -> SourceResult<FrameSnapshot>;
}

/// Receiving end of [`super::channels::create_frame_channel`].
pub struct ChannelFrameSource {
    rx: mpsc::Receiver<FrameSnapshot>,
}

impl ChannelFrameSource {
    pub fn new(rx: mpsc::Receiver<FrameSnapshot>) -> Self {
        Self { rx }
    }
}

impl FrameSource for ChannelFrameSource {
    async fn next_frame(&mut self) -> SourceResult<FrameSnapshot> {
        self.rx.recv().await.ok_or(SourceError::Closed)
    }
}

/// Plays back pre-recorded frames, one every `interval`.
pub struct ReplayFrameSource {
    frames: Vec<Frame>,
    interval: Duration,
    looping: bool,
    next: usize,
    last_emit: Option<Instant>,
}

impl ReplayFrameSource {
    pub fn new(frames: Vec<Frame>, interval: Duration) -> Self {
        Self {
            frames,
            interval,
            looping: false,
            next: 0,
            last_emit: None,
        }
    }

    /// Start over from the first frame instead of closing at the end.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Load every PNG/JPEG in `dir`, in file name order.
    pub fn from_dir<P: AsRef<Path>>(dir: P, interval: Duration) -> SourceResult<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|source| SourceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SourceError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
                .unwrap_or(false);
            if is_image {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(SourceError::EmptyDirectory {
                path: dir.to_path_buf(),
            });
        }

        let mut frames = Vec::with_capacity(paths.len());
        for path in &paths {
            let image = image::open(path).map_err(|source| SourceError::Decode {
                path: path.clone(),
                source,
            })?;
            frames.push(Frame::from_dynamic(image)?);
        }
        log::info!("📂 Loaded {} frames from {}", frames.len(), dir.display());
        Ok(Self::new(frames, interval))
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for ReplayFrameSource {
    async fn next_frame(&mut self) -> SourceResult<FrameSnapshot> {
        if self.next >= self.frames.len() {
            if !self.looping || self.frames.is_empty() {
                return Err(SourceError::Closed);
            }
            self.next = 0;
        }

        if let Some(last) = self.last_emit {
            sleep((last + self.interval).saturating_duration_since(Instant::now())).await;
        }

        let snapshot = FrameSnapshot::now(self.frames[self.next].clone());
        self.last_emit = Some(snapshot.timestamp);
        self.next += 1;
        Ok(snapshot)
    }
}
