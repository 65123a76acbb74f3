//! Immutable frames and borrowed crops

use super::boxes::{NormalizedBox, PixelBox};
use super::error::{InferenceError, InferenceResult};
use image::{DynamicImage, Rgba, RgbaImage};
use std::sync::Arc;

/// One captured video frame. Pixels are never written after construction;
/// clones share the same buffer.
#[derive(Debug, Clone)]
pub struct Frame {
    image: Arc<RgbaImage>,
}

impl Frame {
    pub fn new(image: RgbaImage) -> InferenceResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(InferenceError::EmptyFrame {
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(Self {
            image: Arc::new(image),
        })
    }

    pub fn from_dynamic(image: DynamicImage) -> InferenceResult<Self> {
        Self::new(image.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn full_view(&self) -> ImageView<'_> {
        ImageView {
            image: &self.image,
            bounds: PixelBox::new(0, 0, self.width(), self.height()),
        }
    }

    /// Borrow a pixel-space window. Out-of-bounds requests are errors, never
    /// clamped.
    pub fn view(&self, bounds: PixelBox) -> InferenceResult<ImageView<'_>> {
        self.full_view().sub_view(bounds)
    }

    /// Borrow the window covered by a frame-relative box.
    pub fn view_normalized(&self, bbox: &NormalizedBox) -> InferenceResult<ImageView<'_>> {
        match bbox.to_pixel_box(self.width(), self.height()) {
            Some(bounds) => self.view(bounds),
            None => Err(out_of_bounds_normalized(bbox, self.width(), self.height())),
        }
    }
}

/// Rectangular window into a frame, addressed in its own coordinates.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    image: &'a RgbaImage,
    bounds: PixelBox,
}

impl<'a> ImageView<'a> {
    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Where this view sits in the underlying frame.
    pub fn bounds(&self) -> PixelBox {
        self.bounds
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &'a Rgba<u8> {
        self.image
            .get_pixel(self.bounds.min_x + x, self.bounds.min_y + y)
    }

    /// Window relative to this view.
    pub fn sub_view(&self, local: PixelBox) -> InferenceResult<ImageView<'a>> {
        if !local.fits_within(self.width(), self.height()) {
            return Err(InferenceError::CropOutOfBounds {
                min_x: local.min_x,
                min_y: local.min_y,
                max_x: local.max_x,
                max_y: local.max_y,
                image_width: self.width(),
                image_height: self.height(),
            });
        }
        Ok(ImageView {
            image: self.image,
            bounds: PixelBox::new(
                self.bounds.min_x + local.min_x,
                self.bounds.min_y + local.min_y,
                self.bounds.min_x + local.max_x,
                self.bounds.min_y + local.max_y,
            ),
        })
    }

    /// Copy the window out, e.g. for debug dumps.
    pub fn to_image(&self) -> RgbaImage {
        image::imageops::crop_imm(
            self.image,
            self.bounds.min_x,
            self.bounds.min_y,
            self.width(),
            self.height(),
        )
        .to_image()
    }
}

fn out_of_bounds_normalized(bbox: &NormalizedBox, width: u32, height: u32) -> InferenceError {
    let (w, h) = (width as f64, height as f64);
    InferenceError::CropOutOfBounds {
        min_x: (bbox.x * w).max(0.0) as u32,
        min_y: (bbox.y * h).max(0.0) as u32,
        max_x: (bbox.max_x() * w).max(0.0) as u32,
        max_y: (bbox.max_y() * h).max(0.0) as u32,
        image_width: width,
        image_height: height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_rejected() {
        let err = Frame::new(RgbaImage::new(0, 10)).unwrap_err();
        assert!(matches!(err, InferenceError::EmptyFrame { width: 0, height: 10 }));
    }

    #[test]
    fn test_sub_view_addresses_parent_pixels() {
        let mut img = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 255]));
        img.put_pixel(7, 4, Rgba([1, 2, 3, 255]));
        let frame = Frame::new(img).unwrap();

        let outer = frame.view(PixelBox::new(5, 2, 15, 8)).unwrap();
        let inner = outer.sub_view(PixelBox::new(1, 1, 4, 4)).unwrap();

        assert_eq!(outer.pixel(2, 2), &Rgba([1, 2, 3, 255]));
        assert_eq!(inner.pixel(1, 1), &Rgba([1, 2, 3, 255]));
        assert_eq!(inner.bounds(), PixelBox::new(6, 3, 9, 6));
        assert_eq!(inner.to_image().dimensions(), (3, 3));
    }

    #[test]
    fn test_crop_outside_is_error_not_clamped() {
        let frame = Frame::new(RgbaImage::new(20, 10)).unwrap();
        assert!(matches!(
            frame.view(PixelBox::new(15, 0, 25, 5)),
            Err(InferenceError::CropOutOfBounds { image_width: 20, .. })
        ));
        let view = frame.view(PixelBox::new(0, 0, 10, 10)).unwrap();
        assert!(view.sub_view(PixelBox::new(0, 0, 11, 1)).is_err());
        assert!(view.sub_view(PixelBox::new(3, 3, 3, 5)).is_err(), "empty crop");
    }

    #[test]
    fn test_clones_share_pixels() {
        let frame = Frame::new(RgbaImage::new(4, 4)).unwrap();
        let copy = frame.clone();
        assert!(std::ptr::eq(frame.image(), copy.image()));
    }
}
