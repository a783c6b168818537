//! Image display view backed by the image context.

use eframe::egui;
use lumaview_core::{Bitmap, ImageContext, Rect, Result, SoftwareContext, SourceImage};

use crate::util::bitmap_to_color_image;

/// Paints a source image through the image context on every frame.
///
/// The view holds a source image and a display rectangle. Each frame it
/// rasterizes the source at its full extent and paints the bitmap into the
/// display rectangle; the bitmap and the uploaded texture are scoped to that
/// frame. Nothing is cached between frames.
pub struct ImageView {
    context: Box<dyn ImageContext>,
    source: SourceImage,
    display_rect: Rect,
    frame_texture: Option<egui::TextureHandle>,
}

impl ImageView {
    /// Natural extent of the default placeholder source.
    pub const DEFAULT_EXTENT: (u32, u32) = (640, 427);

    /// View over a software context displaying the placeholder image.
    #[must_use]
    pub fn new() -> Self {
        let (width, height) = Self::DEFAULT_EXTENT;
        Self {
            context: Box::new(SoftwareContext::new()),
            source: SoftwareContext::placeholder(width, height),
            display_rect: Rect::of_extent(640.0, 427.0),
            frame_texture: None,
        }
    }

    /// Use a different image context.
    #[must_use]
    pub fn with_context(mut self, context: Box<dyn ImageContext>) -> Self {
        self.context = context;
        self
    }

    /// Replace the source image wholesale.
    ///
    /// The view does not resize itself: callers that want the display to
    /// track the new image's natural extent must also call
    /// [`ImageView::set_display_rect`].
    pub fn set_source(&mut self, source: SourceImage) {
        self.source = source;
    }

    /// Set the rectangle the bitmap is painted into.
    pub fn set_display_rect(&mut self, rect: Rect) {
        self.display_rect = rect;
    }

    /// The current source image.
    #[must_use]
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// The current display rectangle.
    #[must_use]
    pub fn display_rect(&self) -> Rect {
        self.display_rect
    }

    /// The texture uploaded by the most recent [`ImageView::show`], if any.
    #[must_use]
    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        self.frame_texture.as_ref()
    }

    /// Rasterize the current source at its full extent.
    ///
    /// # Errors
    ///
    /// Propagates context failures unchanged.
    pub fn render(&self) -> Result<Bitmap> {
        self.context.rasterize(&self.source, self.source.extent())
    }

    /// Rasterize and paint into the display rectangle.
    ///
    /// On failure the error is logged and nothing is painted this frame.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        match self.render() {
            Ok(bitmap) => {
                let color = bitmap_to_color_image(&bitmap);
                let texture =
                    ui.ctx()
                        .load_texture("lumaview_image", color, egui::TextureOptions::LINEAR);
                ui.add(egui::Image::new(&texture).fit_to_exact_size(egui::vec2(
                    self.display_rect.width,
                    self.display_rect.height,
                )));
                // Holding the handle until next frame's replacement keeps the
                // texture alive through paint; the old one is freed on drop.
                self.frame_texture = Some(texture);
            }
            Err(err) => {
                self.frame_texture = None;
                log::error!("image view render failed: {err}");
            }
        }
    }
}

impl Default for ImageView {
    fn default() -> Self {
        Self::new()
    }
}
