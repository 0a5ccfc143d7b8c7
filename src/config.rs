//! The validated set of knobs for one generation run, and the
//! quantities derived from them that the rest of the renderer uses.

use crate::errors::MandelbrotError;

/// Smallest supported image height, in pixels.
pub const MIN_HEIGHT: usize = 512;
/// Largest supported image height, in pixels.
pub const MAX_HEIGHT: usize = 8192;
/// Smallest supported iteration cap.
pub const MIN_ITERATIONS: u32 = 100;
/// Largest supported iteration cap.
pub const MAX_ITERATIONS: u32 = 32_000;
/// Smallest supported scale factor.
pub const MIN_SCALE: f64 = 1.0;
/// Largest supported scale factor.
pub const MAX_SCALE: f64 = 8.0;
/// The scale factor used when the caller has no opinion.
pub const DEFAULT_SCALE: f64 = 2.0;

/// How many bands to cut the image into per available CPU.
pub const BANDS_PER_CPU: usize = 2;

/// Height, iteration cap and scale factor for a run.  Once built, it
/// is known to be in range; the width, center, and plane extents are
/// derived once here and never change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    height: usize,
    width: usize,
    max_iterations: u32,
    scale_factor: f64,
}

impl GenerationConfig {
    /// Validates the three parameters against their inclusive bounds.
    /// The first one out of range is reported.
    pub fn new(
        height: usize,
        max_iterations: u32,
        scale_factor: f64,
    ) -> Result<Self, MandelbrotError> {
        if height < MIN_HEIGHT || height > MAX_HEIGHT {
            return Err(MandelbrotError::HeightOutOfRange {
                value: height,
                min: MIN_HEIGHT,
                max: MAX_HEIGHT,
            });
        }

        if max_iterations < MIN_ITERATIONS || max_iterations > MAX_ITERATIONS {
            return Err(MandelbrotError::IterationsOutOfRange {
                value: max_iterations,
                min: MIN_ITERATIONS,
                max: MAX_ITERATIONS,
            });
        }

        // Written so that NaN fails too.
        if !(scale_factor >= MIN_SCALE && scale_factor <= MAX_SCALE) {
            return Err(MandelbrotError::ScaleOutOfRange {
                value: scale_factor,
                min: MIN_SCALE,
                max: MAX_SCALE,
            });
        }

        Ok(GenerationConfig {
            height,
            width: (scale_factor * height as f64).round() as usize,
            max_iterations,
            scale_factor,
        })
    }

    /// Same as `new`, with the default scale factor.
    pub fn with_default_scale(
        height: usize,
        max_iterations: u32,
    ) -> Result<Self, MandelbrotError> {
        GenerationConfig::new(height, max_iterations, DEFAULT_SCALE)
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Image width in pixels: `round(scale_factor * height)`.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The iteration cap, which doubles as the "in the set" value.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// The scale factor.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Escape threshold on `|z|^2`.
    pub fn scale_squared(&self) -> f64 {
        self.scale_factor * self.scale_factor
    }

    /// The pixel that maps to the origin of the complex plane.
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Pixels per unit of the complex plane, horizontally and
    /// vertically.  The vertical extent is not divided by the scale
    /// factor, so the mapping is only square when the scale is 1.
    pub fn scale_extent(&self) -> (f64, f64) {
        let (cx, cy) = self.center();
        (cx / self.scale_factor, cy)
    }

    /// Total number of pixels; the length of a generated field.
    pub(crate) fn len(&self) -> usize {
        self.width * self.height
    }
}

/// The number of bands to use on this machine.  Never less than one.
pub fn default_band_count() -> usize {
    (num_cpus::get() * BANDS_PER_CPU).max(1)
}
