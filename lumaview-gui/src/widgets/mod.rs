//! View widgets built on the lumaview image context.

mod histogram_view;
mod image_view;
mod labeled_slider;
mod titled_panel;

pub use histogram_view::HistogramView;
pub use image_view::ImageView;
pub use labeled_slider::{ChangeCallback, LabeledSlider};
pub use titled_panel::TitledPanel;
