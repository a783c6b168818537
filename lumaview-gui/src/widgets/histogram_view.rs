//! Histogram view running the two-stage filter pipeline each frame.

use eframe::egui;
use lumaview_core::{
    AreaHistogram, Bitmap, HistogramDisplay, HistogramParams, ImageContext, Result,
    SoftwareContext, SourceImage,
};

use crate::util::{bitmap_to_color_image, u32_to_f32};

/// Computes and paints a channel histogram of its source image.
///
/// Every frame the view downscales the source, accumulates an area
/// histogram, renders it as a bar chart, and rasterizes the chart. There is
/// no caching: the pipeline is a pure function of the current source and
/// parameters, so an unchanged state yields a bit-identical bitmap.
pub struct HistogramView {
    context: Box<dyn ImageContext>,
    source: SourceImage,
    params: HistogramParams,
    frame_texture: Option<egui::TextureHandle>,
}

impl HistogramView {
    /// View over a software context with default parameters and the
    /// placeholder source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            context: Box::new(SoftwareContext::new()),
            source: SoftwareContext::placeholder(640, 427),
            params: HistogramParams::default(),
            frame_texture: None,
        }
    }

    /// Use a different image context.
    #[must_use]
    pub fn with_context(mut self, context: Box<dyn ImageContext>) -> Self {
        self.context = context;
        self
    }

    /// Use non-default pipeline parameters.
    #[must_use]
    pub fn with_params(mut self, params: HistogramParams) -> Self {
        self.params = params;
        self
    }

    /// Replace the source image wholesale.
    pub fn set_source(&mut self, source: SourceImage) {
        self.source = source;
    }

    /// The current pipeline parameters.
    #[must_use]
    pub fn params(&self) -> HistogramParams {
        self.params
    }

    /// The current source image.
    #[must_use]
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// The texture uploaded by the most recent [`HistogramView::show`], if any.
    #[must_use]
    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        self.frame_texture.as_ref()
    }

    /// Run the full pipeline: downscale, accumulate, render, rasterize.
    ///
    /// # Errors
    ///
    /// Propagates parameter validation and context failures unchanged.
    pub fn render(&self) -> Result<Bitmap> {
        self.params.validate()?;
        let scaled = self
            .context
            .scale(&self.source, self.params.downscale, self.params.downscale)?;
        let row = AreaHistogram::from_params(&self.params).run(&scaled)?;
        let chart = HistogramDisplay::from_params(&self.params).run(&row)?;
        self.context.rasterize(&chart, chart.extent())
    }

    /// Run the pipeline and paint the chart at its natural size.
    ///
    /// On failure the error is logged and nothing is painted this frame.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        match self.render() {
            Ok(bitmap) => {
                let size = egui::vec2(u32_to_f32(bitmap.width()), u32_to_f32(bitmap.height()));
                let color = bitmap_to_color_image(&bitmap);
                let texture =
                    ui.ctx()
                        .load_texture("lumaview_histogram", color, egui::TextureOptions::NEAREST);
                ui.add(egui::Image::new(&texture).fit_to_exact_size(size));
                self.frame_texture = Some(texture);
            }
            Err(err) => {
                self.frame_texture = None;
                log::error!("histogram view render failed: {err}");
            }
        }
    }
}

impl Default for HistogramView {
    fn default() -> Self {
        Self::new()
    }
}
