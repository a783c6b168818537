//! egui view widgets for image-filter exploration.
//!
//! Four widgets over the `lumaview-core` image context: an image display
//! view, a histogram pipeline view, a titled container panel, and a labeled
//! slider with linear value conversion.

pub mod util;
pub mod widgets;

pub use widgets::{HistogramView, ImageView, LabeledSlider, TitledPanel};
