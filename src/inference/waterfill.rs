//! Waterfill: lazy connected-component enumeration over a binary mask
//!
//! A session owns a working copy of the mask and erases every pixel it
//! visits, so across the whole enumeration each pixel is touched a bounded
//! number of times no matter how many components are pulled. Components are
//! 8-connected: anti-aliased borders often meet only at a diagonal, and
//! 4-connectivity would split one outline into several pieces.

use super::binary::BinaryMask;
use super::boxes::PixelBox;

/// One connected region of set pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub pixel_count: u64,
    pub bounds: PixelBox,
}

impl Component {
    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    pub fn height(&self) -> u32 {
        self.bounds.height()
    }
}

pub struct WaterfillSession {
    mask: BinaryMask,
    /// First word that may still hold a set bit.
    cursor: usize,
    stack: Vec<(u32, u32)>,
}

impl WaterfillSession {
    pub fn new(mask: BinaryMask) -> Self {
        Self {
            mask,
            cursor: 0,
            stack: Vec::new(),
        }
    }

    /// Next component in row-major order of its first pixel, skipping (but
    /// consuming) components smaller than `min_area` pixels.
    pub fn find_next(&mut self, min_area: u64) -> Option<Component> {
        loop {
            let (x, y) = self.next_seed()?;
            let component = self.fill_from(x, y);
            if component.pixel_count >= min_area {
                return Some(component);
            }
        }
    }

    pub fn iter(&mut self, min_area: u64) -> WaterfillIter<'_> {
        WaterfillIter {
            session: self,
            min_area,
        }
    }

    fn next_seed(&mut self) -> Option<(u32, u32)> {
        let words_per_row = self.mask.words_per_row();
        while self.cursor < self.mask.word_count() {
            let word = self.mask.word(self.cursor);
            if word != 0 {
                let y = (self.cursor / words_per_row) as u32;
                let x = (self.cursor % words_per_row) as u32 * 64 + word.trailing_zeros();
                return Some((x, y));
            }
            self.cursor += 1;
        }
        None
    }

    fn fill_from(&mut self, x: u32, y: u32) -> Component {
        let (width, height) = (self.mask.width(), self.mask.height());
        let mut count = 0u64;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);

        self.mask.take(x, y);
        self.stack.clear();
        self.stack.push((x, y));

        while let Some((cx, cy)) = self.stack.pop() {
            count += 1;
            min_x = min_x.min(cx);
            max_x = max_x.max(cx);
            min_y = min_y.min(cy);
            max_y = max_y.max(cy);

            let x0 = cx.saturating_sub(1);
            let x1 = (cx + 1).min(width - 1);
            let y0 = cy.saturating_sub(1);
            let y1 = (cy + 1).min(height - 1);
            for ny in y0..=y1 {
                for nx in x0..=x1 {
                    if self.mask.take(nx, ny) {
                        self.stack.push((nx, ny));
                    }
                }
            }
        }

        Component {
            pixel_count: count,
            bounds: PixelBox::new(min_x, min_y, max_x + 1, max_y + 1),
        }
    }
}

pub struct WaterfillIter<'a> {
    session: &'a mut WaterfillSession,
    min_area: u64,
}

impl Iterator for WaterfillIter<'_> {
    type Item = Component;

    fn next(&mut self) -> Option<Component> {
        self.session.find_next(self.min_area)
    }
}
