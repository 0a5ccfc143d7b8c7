//! Contains the PlaneMapper struct, which describes a relationship
//! between the pixel grid of the output image, with an origin at 0,0
//! in the upper left, and a window on the complex plane centered on
//! the origin.
use num::Complex;

use crate::config::GenerationConfig;

/// Describes the x, y of a pixel in the image.  Column first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels onto the complex plane.  The center pixel of the image
/// lands on 0+0i; horizontally the image spans roughly
/// [-scale, scale], vertically [-1, 1].
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    // The pixel that lands on the origin.
    center: (f64, f64),
    // Pixels per unit of the complex plane, along each axis.
    extent: (f64, f64),
}

impl PlaneMapper {
    /// Builds the mapper for a validated configuration.
    pub fn new(config: &GenerationConfig) -> PlaneMapper {
        PlaneMapper {
            center: config.center(),
            extent: config.scale_extent(),
        }
    }

    /// Given the column and row of a pixel, return the complex number
    /// at the equivalent location on the complex plane.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            (pixel.0 as f64 - self.center.0) / self.extent.0,
            (pixel.1 as f64 - self.center.1) / self.extent.1,
        )
    }
}
