//! Error types for lumaview-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for lumaview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for lumaview operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Inverse affine conversion with a zero slope.
    #[error("inverse mapping requires a non-zero slope")]
    ZeroSlope,

    /// Invalid filter or context parameter.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// An image with zero pixels reached a filter or the rasterizer.
    #[error("image extent is empty")]
    EmptyExtent,

    /// A named image resource could not be resolved.
    #[error("image resource not found: {}", .0.display())]
    MissingResource(PathBuf),

    /// Image decode failure.
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// Parameter file parse or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
