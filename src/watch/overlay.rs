//! Debug overlays: boxes drawn on top of frames
//!
//! Every static box and every layer of live hits is owned through the
//! [`OverlayId`] the sink hands out. Owners remove what they added; a
//! watcher does so when it is dropped.

use crate::inference::{Color, Frame, NormalizedBox};
use image::RgbaImage;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Handle to a box or layer shown by an [`OverlaySink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(u64);

pub trait OverlaySink: Send + Sync {
    /// Show a static box until `remove` is called with the returned id.
    fn add(&self, color: Color, bbox: NormalizedBox) -> OverlayId;

    /// Open an empty layer whose boxes are replaced as a group.
    fn add_layer(&self, color: Color) -> OverlayId;

    /// Replace a layer's boxes. Ids that are not open layers are ignored.
    fn publish(&self, layer: OverlayId, boxes: &[NormalizedBox]);

    fn remove(&self, id: OverlayId);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOverlay;

impl OverlaySink for NullOverlay {
    fn add(&self, _color: Color, _bbox: NormalizedBox) -> OverlayId {
        OverlayId(0)
    }

    fn add_layer(&self, _color: Color) -> OverlayId {
        OverlayId(0)
    }

    fn publish(&self, _layer: OverlayId, _boxes: &[NormalizedBox]) {}

    fn remove(&self, _id: OverlayId) {}
}

#[derive(Debug)]
enum Entry {
    Fixed(Color, NormalizedBox),
    Layer(Color, Vec<NormalizedBox>),
}

#[derive(Debug, Default)]
struct OverlayState {
    next_id: u64,
    entries: BTreeMap<OverlayId, Entry>,
}

impl OverlayState {
    fn insert(&mut self, entry: Entry) -> OverlayId {
        self.next_id += 1;
        let id = OverlayId(self.next_id);
        self.entries.insert(id, entry);
        id
    }
}

/// Records boxes and renders them onto a copy of a frame.
#[derive(Debug, Default)]
pub struct ImageOverlay {
    state: Mutex<OverlayState>,
}

impl ImageOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut OverlayState) -> R) -> R {
        // A panic mid-update leaves at worst a stale box list
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    /// Everything currently shown, in the order it was added.
    pub fn boxes(&self) -> Vec<(Color, NormalizedBox)> {
        self.with_state(|state| {
            let mut all = Vec::new();
            for entry in state.entries.values() {
                match entry {
                    Entry::Fixed(color, bbox) => all.push((*color, *bbox)),
                    Entry::Layer(color, boxes) => all.extend(boxes.iter().map(|b| (*color, *b))),
                }
            }
            all
        })
    }

    /// Number of open static boxes and layers, empty layers included.
    pub fn entry_count(&self) -> usize {
        self.with_state(|state| state.entries.len())
    }

    pub fn clear(&self) {
        self.with_state(|state| state.entries.clear());
    }

    pub fn render(&self, frame: &Frame) -> RgbaImage {
        let mut canvas = frame.image().clone();
        let (width, height) = (canvas.width(), canvas.height());
        for (color, bbox) in self.boxes() {
            let Some(px) = bbox.to_pixel_box(width, height) else {
                log::debug!("Overlay box {:?} outside {}x{}, skipped", bbox, width, height);
                continue;
            };
            let rect = Rect::at(px.min_x as i32, px.min_y as i32).of_size(px.width(), px.height());
            draw_hollow_rect_mut(&mut canvas, rect, color.to_rgba());
        }
        canvas
    }
}

impl OverlaySink for ImageOverlay {
    fn add(&self, color: Color, bbox: NormalizedBox) -> OverlayId {
        self.with_state(|state| state.insert(Entry::Fixed(color, bbox)))
    }

    fn add_layer(&self, color: Color) -> OverlayId {
        self.with_state(|state| state.insert(Entry::Layer(color, Vec::new())))
    }

    fn publish(&self, layer: OverlayId, boxes: &[NormalizedBox]) {
        self.with_state(|state| match state.entries.get_mut(&layer) {
            Some(Entry::Layer(_, current)) => {
                current.clear();
                current.extend_from_slice(boxes);
            }
            _ => log::debug!("Publish to {:?}, which is not an open layer", layer),
        });
    }

    fn remove(&self, id: OverlayId) {
        self.with_state(|state| state.entries.remove(&id));
    }
}

/// Fixed-capacity per-frame box storage. Reset before each frame; boxes
/// beyond capacity are dropped.
#[derive(Debug)]
pub struct OverlayBoxPool {
    boxes: Vec<NormalizedBox>,
    capacity: usize,
    dropped: usize,
}

impl OverlayBoxPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn reset(&mut self) {
        self.boxes.clear();
        self.dropped = 0;
    }

    /// Returns false when the pool is full.
    pub fn push(&mut self, bbox: NormalizedBox) -> bool {
        if self.boxes.len() >= self.capacity {
            if self.dropped == 0 {
                log::warn!(
                    "⚠️ Overlay pool full ({} boxes), dropping the rest of this frame",
                    self.capacity
                );
            }
            self.dropped += 1;
            return false;
        }
        self.boxes.push(bbox);
        true
    }

    pub fn as_slice(&self) -> &[NormalizedBox] {
        &self.boxes
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
