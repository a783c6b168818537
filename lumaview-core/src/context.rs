//! The image-processing context consumed by the view widgets.
//!
//! Widgets never touch pixel decoding or resampling directly; they go
//! through [`ImageContext`], which exposes exactly the operations the views
//! need. [`SoftwareContext`] is the plain-Rust implementation.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::raster::{Bitmap, SourceImage};

/// Operations the view widgets require from an image-processing backend.
pub trait ImageContext {
    /// Resolve and decode a named image resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingResource`] when the name does not resolve and
    /// [`Error::Image`] when decoding fails.
    fn load_image(&self, name: &str) -> Result<SourceImage>;

    /// Apply an affine scale to an image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for non-positive factors and
    /// [`Error::EmptyExtent`] when the scaled image has no pixels.
    fn scale(&self, image: &SourceImage, sx: f64, sy: f64) -> Result<SourceImage>;

    /// Rasterize an image into a bitmap of `rect`'s pixel dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyExtent`] when `rect` covers zero pixels.
    fn rasterize(&self, image: &SourceImage, rect: Rect) -> Result<Bitmap>;
}

/// Software implementation of [`ImageContext`] on RGBA buffers.
#[derive(Debug, Clone, Default)]
pub struct SoftwareContext {
    resource_dir: PathBuf,
}

impl SoftwareContext {
    /// Context resolving resources against the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context resolving resources against `dir`.
    #[must_use]
    pub fn with_resource_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            resource_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The deterministic gradient image used as the default view source.
    #[must_use]
    pub fn placeholder(width: u32, height: u32) -> SourceImage {
        let width = width.max(1);
        let height = height.max(1);
        let dx = width.saturating_sub(1).max(1);
        let dy = height.saturating_sub(1).max(1);
        let pixels = RgbaImage::from_fn(width, height, |x, y| {
            let r = u8::try_from(u64::from(x) * 255 / u64::from(dx)).unwrap_or(255);
            let g = u8::try_from(u64::from(y) * 255 / u64::from(dy)).unwrap_or(255);
            let b = r / 2 + g / 2;
            Rgba([r, g, b, 255])
        });
        SourceImage::from_nonempty(pixels)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn scaled_dimension(size: u32, factor: f64) -> u32 {
        // Truncate fractional extents, matching Rect::pixel_size.
        (f64::from(size) * factor) as u32
    }
}

impl ImageContext for SoftwareContext {
    fn load_image(&self, name: &str) -> Result<SourceImage> {
        let path = self.resource_dir.join(name);
        if !path.is_file() {
            return Err(Error::MissingResource(path));
        }
        log::debug!("loading image resource {}", path.display());
        let decoded = image::open(&path)?.to_rgba8();
        SourceImage::from_rgba(decoded)
    }

    fn scale(&self, image: &SourceImage, sx: f64, sy: f64) -> Result<SourceImage> {
        if !(sx.is_finite() && sx > 0.0) {
            return Err(Error::InvalidParameter {
                name: "sx",
                reason: format!("scale factor must be positive, got {sx}"),
            });
        }
        if !(sy.is_finite() && sy > 0.0) {
            return Err(Error::InvalidParameter {
                name: "sy",
                reason: format!("scale factor must be positive, got {sy}"),
            });
        }

        let width = Self::scaled_dimension(image.width(), sx);
        let height = Self::scaled_dimension(image.height(), sy);
        if width == 0 || height == 0 {
            return Err(Error::EmptyExtent);
        }

        log::debug!(
            "scaling {}x{} by ({sx}, {sy}) -> {width}x{height}",
            image.width(),
            image.height()
        );
        let resized = imageops::resize(image.pixels(), width, height, FilterType::Nearest);
        SourceImage::from_rgba(resized)
    }

    fn rasterize(&self, image: &SourceImage, rect: Rect) -> Result<Bitmap> {
        let (width, height) = rect.pixel_size();
        if width == 0 || height == 0 {
            return Err(Error::EmptyExtent);
        }

        if (width, height) == (image.width(), image.height()) {
            return Ok(Bitmap::new(width, height, image.pixels().as_raw().clone()));
        }

        let resized = imageops::resize(image.pixels(), width, height, FilterType::Nearest);
        Ok(Bitmap::new(width, height, resized.into_raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_truncates_dimensions() {
        let ctx = SoftwareContext::new();
        let img = SoftwareContext::placeholder(640, 427);
        let scaled = ctx.scale(&img, 0.1, 0.1).unwrap();
        assert_eq!((scaled.width(), scaled.height()), (64, 42));
    }

    #[test]
    fn test_scale_to_nothing_is_empty_extent() {
        let ctx = SoftwareContext::new();
        let img = SoftwareContext::placeholder(1, 1);
        assert!(matches!(ctx.scale(&img, 0.1, 0.1), Err(Error::EmptyExtent)));
    }

    #[test]
    fn test_scale_rejects_non_positive_factor() {
        let ctx = SoftwareContext::new();
        let img = SoftwareContext::placeholder(8, 8);
        assert!(matches!(
            ctx.scale(&img, 0.0, 1.0),
            Err(Error::InvalidParameter { name: "sx", .. })
        ));
        assert!(matches!(
            ctx.scale(&img, 1.0, -2.0),
            Err(Error::InvalidParameter { name: "sy", .. })
        ));
    }

    #[test]
    fn test_rasterize_respects_rect_dimensions() {
        let ctx = SoftwareContext::new();
        let img = SoftwareContext::placeholder(16, 16);
        let bitmap = ctx.rasterize(&img, Rect::of_extent(256.0, 100.0)).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (256, 100));
        assert_eq!(bitmap.data().len(), 256 * 100 * 4);
    }

    #[test]
    fn test_rasterize_identity_keeps_pixels() {
        let ctx = SoftwareContext::new();
        let img = SoftwareContext::placeholder(10, 10);
        let bitmap = ctx.rasterize(&img, img.extent()).unwrap();
        assert_eq!(bitmap.data(), img.pixels().as_raw().as_slice());
    }

    #[test]
    fn test_rasterize_empty_rect_fails() {
        let ctx = SoftwareContext::new();
        let img = SoftwareContext::placeholder(10, 10);
        assert!(matches!(
            ctx.rasterize(&img, Rect::of_extent(0.0, 100.0)),
            Err(Error::EmptyExtent)
        ));
    }

    #[test]
    fn test_load_image_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = SoftwareContext::with_resource_dir(dir.path());
        assert!(matches!(
            ctx.load_image("nope.png"),
            Err(Error::MissingResource(_))
        ));
    }

    #[test]
    fn test_load_image_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        SoftwareContext::placeholder(4, 3)
            .pixels()
            .save(&path)
            .unwrap();

        let ctx = SoftwareContext::with_resource_dir(dir.path());
        let loaded = ctx.load_image("tiny.png").unwrap();
        assert_eq!((loaded.width(), loaded.height()), (4, 3));
    }
}
