//! Pixel buffer types shared between the context and the filters.

use image::RgbaImage;

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// A decoded RGBA source image plus its natural extent.
///
/// A `SourceImage` is owned by the view that loaded it and is only ever
/// replaced wholesale, never partially mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Wrap a decoded RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyExtent`] if either dimension is zero.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(Error::EmptyExtent);
        }
        Ok(Self { pixels })
    }

    /// Wrap a buffer already known to be non-empty.
    pub(crate) fn from_nonempty(pixels: RgbaImage) -> Self {
        debug_assert!(pixels.width() > 0 && pixels.height() > 0);
        Self { pixels }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The image's full extent as a rectangle at the origin.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn extent(&self) -> Rect {
        Rect::of_extent(self.pixels.width() as f32, self.pixels.height() as f32)
    }

    /// Borrow the underlying pixel buffer.
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// A rasterized RGBA bitmap ready for painting.
///
/// Bitmaps are scoped per redraw: produced by the context, painted, and
/// dropped within the same frame. Nothing retains one across frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    pub(crate) fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The RGBA pixel bytes, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_image() {
        let empty = RgbaImage::new(0, 5);
        assert!(matches!(
            SourceImage::from_rgba(empty),
            Err(Error::EmptyExtent)
        ));
    }

    #[test]
    fn test_extent_matches_dimensions() {
        let img = SourceImage::from_rgba(RgbaImage::new(640, 427)).unwrap();
        assert_eq!(img.extent().pixel_size(), (640, 427));
    }
}
