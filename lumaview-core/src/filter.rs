//! Histogram filter pipeline: area accumulation and bar-chart rendering.
//!
//! The two filters mirror the classic two-stage histogram graph: an area
//! histogram reduces an image to one row of per-bucket channel fractions,
//! and a display filter renders that row as a bar-chart image. Both are pure
//! functions of their inputs.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::raster::SourceImage;

/// Parameters for the histogram pipeline.
///
/// Loadable from a JSON file so a host application can ship alternative
/// presets without recompiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramParams {
    /// Number of histogram buckets per channel.
    pub bucket_count: u32,
    /// Downscale factor applied to the source before accumulation.
    pub downscale: f64,
    /// Amplitude multiplier applied to normalized bucket fractions.
    pub amplitude_scale: f32,
    /// Height of the rendered bar chart in pixels.
    pub display_height: u32,
    /// Bucket values at or above this fraction render as full-height bars.
    pub high_limit: f32,
}

impl Default for HistogramParams {
    fn default() -> Self {
        Self {
            bucket_count: 256,
            downscale: 0.1,
            amplitude_scale: 25.0,
            display_height: 100,
            high_limit: 1.0,
        }
    }
}

impl HistogramParams {
    /// Upper bound on `bucket_count`.
    pub const MAX_BUCKETS: u32 = 2048;

    /// Check every parameter against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 || self.bucket_count > Self::MAX_BUCKETS {
            return Err(Error::InvalidParameter {
                name: "bucket_count",
                reason: format!(
                    "must be in 1..={}, got {}",
                    Self::MAX_BUCKETS,
                    self.bucket_count
                ),
            });
        }
        if !(self.downscale.is_finite() && self.downscale > 0.0) {
            return Err(Error::InvalidParameter {
                name: "downscale",
                reason: format!("must be positive, got {}", self.downscale),
            });
        }
        if !(self.amplitude_scale.is_finite() && self.amplitude_scale >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "amplitude_scale",
                reason: format!("must be non-negative, got {}", self.amplitude_scale),
            });
        }
        if self.display_height == 0 {
            return Err(Error::InvalidParameter {
                name: "display_height",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.high_limit.is_finite() && self.high_limit > 0.0 && self.high_limit <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "high_limit",
                reason: format!("must be in (0, 1], got {}", self.high_limit),
            });
        }
        Ok(())
    }

    /// Load parameters from a JSON file and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on read failure and [`Error::Config`] on parse
    /// failure; validation errors pass through unchanged.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let params: Self =
            serde_json::from_reader(reader).map_err(|e| Error::Config(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Write parameters to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on write failure.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// One row of per-bucket channel fractions, the area histogram's output.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramRow {
    values: Vec<[f32; 3]>,
}

impl HistogramRow {
    /// Number of buckets in the row.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.values.len()
    }

    /// The `[r, g, b]` fractions per bucket, each clamped to `[0, 1]`.
    #[must_use]
    pub fn values(&self) -> &[[f32; 3]] {
        &self.values
    }
}

/// Accumulates an image region into per-bucket channel counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaHistogram {
    /// Number of buckets per channel.
    pub bucket_count: u32,
    /// Multiplier applied to normalized fractions before clamping.
    pub amplitude_scale: f32,
}

impl AreaHistogram {
    /// Filter configured from pipeline parameters.
    #[must_use]
    pub fn from_params(params: &HistogramParams) -> Self {
        Self {
            bucket_count: params.bucket_count,
            amplitude_scale: params.amplitude_scale,
        }
    }

    /// Accumulate the image's full extent into a histogram row.
    ///
    /// Each channel count is normalized by the total pixel count, multiplied
    /// by the amplitude scale, and clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for an out-of-range bucket count.
    #[allow(clippy::cast_precision_loss)]
    pub fn run(&self, image: &SourceImage) -> Result<HistogramRow> {
        if self.bucket_count == 0 || self.bucket_count > HistogramParams::MAX_BUCKETS {
            return Err(Error::InvalidParameter {
                name: "bucket_count",
                reason: format!(
                    "must be in 1..={}, got {}",
                    HistogramParams::MAX_BUCKETS,
                    self.bucket_count
                ),
            });
        }

        let buckets = self.bucket_count as usize;
        let mut counts = vec![[0u64; 3]; buckets];
        for pixel in image.pixels().pixels() {
            for channel in 0..3 {
                let bucket = usize::from(pixel.0[channel]) * buckets / 256;
                counts[bucket][channel] += 1;
            }
        }

        let total = u64::from(image.width()) * u64::from(image.height());
        log::debug!(
            "area histogram over {total} pixels into {buckets} buckets (scale {})",
            self.amplitude_scale
        );
        let values = counts
            .iter()
            .map(|bucket| {
                let mut out = [0.0f32; 3];
                for channel in 0..3 {
                    let fraction = (bucket[channel] as f64 / total as f64) as f32;
                    out[channel] = (fraction * self.amplitude_scale).clamp(0.0, 1.0);
                }
                out
            })
            .collect();
        Ok(HistogramRow { values })
    }
}

/// Renders a histogram row as a bar-chart image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramDisplay {
    /// Output image height in pixels.
    pub height: u32,
    /// Fractions at or above this value render full-height bars.
    pub high_limit: f32,
    /// Fractions at or below this value render no bar.
    pub low_limit: f32,
}

impl HistogramDisplay {
    /// Filter configured from pipeline parameters.
    #[must_use]
    pub fn from_params(params: &HistogramParams) -> Self {
        Self {
            height: params.display_height,
            high_limit: params.high_limit,
            low_limit: 0.0,
        }
    }

    /// Render one bar column per bucket over a black background.
    ///
    /// Channel bars overlap additively, so a bucket where all three channels
    /// reach the same height reads as white.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a zero height or an empty
    /// `low..high` window.
    #[allow(clippy::cast_precision_loss)]
    pub fn run(&self, row: &HistogramRow) -> Result<SourceImage> {
        if self.height == 0 {
            return Err(Error::InvalidParameter {
                name: "height",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.low_limit >= 0.0 && self.high_limit <= 1.0 && self.low_limit < self.high_limit) {
            return Err(Error::InvalidParameter {
                name: "high_limit",
                reason: format!(
                    "limits must satisfy 0 <= low < high <= 1, got {}..{}",
                    self.low_limit, self.high_limit
                ),
            });
        }
        let width = u32::try_from(row.bucket_count()).map_err(|_| Error::InvalidParameter {
            name: "bucket_count",
            reason: "row is too wide to render".to_string(),
        })?;
        if width == 0 {
            return Err(Error::EmptyExtent);
        }

        let span = self.high_limit - self.low_limit;
        let height_f = self.height as f32;
        let bars: Vec<[f32; 3]> = row
            .values()
            .iter()
            .map(|bucket| {
                let mut bar = [0.0f32; 3];
                for channel in 0..3 {
                    let level = ((bucket[channel] - self.low_limit) / span).clamp(0.0, 1.0);
                    bar[channel] = level * height_f;
                }
                bar
            })
            .collect();

        let height = self.height;
        let pixels = RgbaImage::from_fn(width, height, |x, y| {
            let bar = &bars[x as usize];
            let from_bottom = (height - 1 - y) as f32;
            let mut px = [0u8; 4];
            for channel in 0..3 {
                if from_bottom < bar[channel] {
                    px[channel] = 255;
                }
            }
            px[3] = 255;
            Rgba(px)
        });
        Ok(SourceImage::from_nonempty(pixels))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use image::RgbaImage;

    use super::*;

    fn uniform_image(width: u32, height: u32, value: u8) -> SourceImage {
        let pixels = RgbaImage::from_pixel(width, height, Rgba([value, value, value, 255]));
        SourceImage::from_rgba(pixels).unwrap()
    }

    #[test]
    fn test_uniform_image_fills_one_bucket() {
        let filter = AreaHistogram {
            bucket_count: 256,
            amplitude_scale: 1.0,
        };
        let row = filter.run(&uniform_image(8, 8, 128)).unwrap();
        assert_eq!(row.bucket_count(), 256);
        for (i, bucket) in row.values().iter().enumerate() {
            let expected = if i == 128 { 1.0 } else { 0.0 };
            for channel in 0..3 {
                assert_relative_eq!(bucket[channel], expected);
            }
        }
    }

    #[test]
    fn test_amplitude_scale_clamps_at_one() {
        let filter = AreaHistogram {
            bucket_count: 16,
            amplitude_scale: 25.0,
        };
        let row = filter.run(&uniform_image(4, 4, 0)).unwrap();
        assert_relative_eq!(row.values()[0][0], 1.0);
    }

    #[test]
    fn test_zero_bucket_count_rejected() {
        let filter = AreaHistogram {
            bucket_count: 0,
            amplitude_scale: 1.0,
        };
        assert!(matches!(
            filter.run(&uniform_image(2, 2, 0)),
            Err(Error::InvalidParameter {
                name: "bucket_count",
                ..
            })
        ));
    }

    #[test]
    fn test_display_dimensions() {
        let histogram = AreaHistogram {
            bucket_count: 256,
            amplitude_scale: 25.0,
        };
        let row = histogram.run(&uniform_image(8, 8, 200)).unwrap();
        let display = HistogramDisplay {
            height: 100,
            high_limit: 1.0,
            low_limit: 0.0,
        };
        let chart = display.run(&row).unwrap();
        assert_eq!((chart.width(), chart.height()), (256, 100));
    }

    #[test]
    fn test_zero_row_renders_background_only() {
        let row = HistogramRow {
            values: vec![[0.0; 3]; 32],
        };
        let display = HistogramDisplay {
            height: 10,
            high_limit: 1.0,
            low_limit: 0.0,
        };
        let chart = display.run(&row).unwrap();
        for pixel in chart.pixels().pixels() {
            assert_eq!(pixel.0, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_full_bucket_renders_full_column() {
        let row = HistogramRow {
            values: vec![[1.0, 0.0, 0.0]],
        };
        let display = HistogramDisplay {
            height: 4,
            high_limit: 1.0,
            low_limit: 0.0,
        };
        let chart = display.run(&row).unwrap();
        for y in 0..4 {
            assert_eq!(chart.pixels().get_pixel(0, y).0, [255, 0, 0, 255]);
        }
    }

    #[test]
    fn test_run_is_deterministic() {
        let img = uniform_image(16, 12, 77);
        let histogram = AreaHistogram {
            bucket_count: 64,
            amplitude_scale: 25.0,
        };
        let display = HistogramDisplay {
            height: 50,
            high_limit: 1.0,
            low_limit: 0.0,
        };
        let first = display.run(&histogram.run(&img).unwrap()).unwrap();
        let second = display.run(&histogram.run(&img).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_params_validation() {
        assert!(HistogramParams::default().validate().is_ok());

        let cases = [
            HistogramParams {
                bucket_count: 0,
                ..Default::default()
            },
            HistogramParams {
                bucket_count: HistogramParams::MAX_BUCKETS + 1,
                ..Default::default()
            },
            HistogramParams {
                downscale: 0.0,
                ..Default::default()
            },
            HistogramParams {
                amplitude_scale: -1.0,
                ..Default::default()
            },
            HistogramParams {
                display_height: 0,
                ..Default::default()
            },
            HistogramParams {
                high_limit: 1.5,
                ..Default::default()
            },
        ];
        for params in cases {
            assert!(params.validate().is_err(), "{params:?} should be rejected");
        }
    }

    #[test]
    fn test_params_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("histogram.json");

        let params = HistogramParams {
            bucket_count: 128,
            downscale: 0.25,
            amplitude_scale: 10.0,
            display_height: 80,
            high_limit: 0.9,
        };
        params.to_file(&path).unwrap();
        assert_eq!(HistogramParams::from_file(&path).unwrap(), params);
    }

    #[test]
    fn test_params_file_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"bucket_count": 0}"#).unwrap();
        assert!(matches!(
            HistogramParams::from_file(&path),
            Err(Error::InvalidParameter {
                name: "bucket_count",
                ..
            })
        ));
    }
}
