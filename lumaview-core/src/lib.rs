//! lumaview-core: image context, filters, and value mapping for lumaview widgets.
//!
//! This crate provides everything the view widgets consume that is not GUI:
//! the typed image-processing context, the histogram filter pipeline, and
//! the linear position/value mapping used by slider controls.

pub mod context;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod mapper;
pub mod raster;

pub use context::{ImageContext, SoftwareContext};
pub use error::{Error, Result};
pub use filter::{AreaHistogram, HistogramDisplay, HistogramParams, HistogramRow};
pub use geometry::Rect;
pub use mapper::LinearMap;
pub use raster::{Bitmap, SourceImage};
