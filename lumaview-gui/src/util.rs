//! Conversion helpers for lumaview-gui.

use egui::ColorImage;
use lumaview_core::Bitmap;

/// Convert a rasterized bitmap into an egui color image for texture upload.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn bitmap_to_color_image(bitmap: &Bitmap) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [bitmap.width() as usize, bitmap.height() as usize],
        bitmap.data(),
    )
}

/// Convert u32 to f32 with allowed precision loss.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn u32_to_f32(value: u32) -> f32 {
    value as f32
}

#[cfg(test)]
mod tests {
    use lumaview_core::{ImageContext, Rect, SoftwareContext};

    use super::*;

    #[test]
    fn test_bitmap_dimensions_carry_over() {
        let ctx = SoftwareContext::new();
        let img = SoftwareContext::placeholder(8, 6);
        let bitmap = ctx.rasterize(&img, Rect::of_extent(8.0, 6.0)).unwrap();
        let color = bitmap_to_color_image(&bitmap);
        assert_eq!(color.size, [8, 6]);
    }
}
