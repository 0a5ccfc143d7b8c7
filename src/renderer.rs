// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The banded, multi-threaded Mandelbrot renderer.
//!
//! The image is cut into horizontal bands and each band is handed to
//! its own scoped thread along with the slice of the iteration buffer
//! that holds its rows.  Since the slices are carved off the buffer
//! with `split_at_mut`, no two threads can ever see the same cell,
//! and there is nothing to lock and nothing to merge afterwards.

use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use image::{ImageFormat, RgbImage};
use itertools::iproduct;

use crate::config::{default_band_count, GenerationConfig};
use crate::errors::MandelbrotError;
use crate::escape::escape_time;
use crate::palette::{Palette, StagedRamp};
use crate::planes::{Pixel, PlaneMapper};
use crate::sections::{sections, Section};

/// Which container the codec should write.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG, at the codec's default quality.
    Jpeg,
    /// Windows bitmap.
    Bmp,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Png
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "bmp" => Ok(OutputFormat::Bmp),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl OutputFormat {
    /// The largest width or height the container can record, if it has
    /// a limit below what a valid configuration can produce.  JPEG frame
    /// headers hold 16-bit dimensions.
    pub fn max_dimension(self) -> Option<usize> {
        match self {
            OutputFormat::Jpeg => Some(65_535),
            OutputFormat::Png | OutputFormat::Bmp => None,
        }
    }
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => ImageFormat::PNG,
            OutputFormat::Jpeg => ImageFormat::JPEG,
            OutputFormat::Bmp => ImageFormat::BMP,
        }
    }
}

/// Holds a validated configuration and, once `generate` has run, the
/// iteration count of every pixel in row-major order.
pub struct MandelbrotRenderer {
    config: GenerationConfig,
    plane: PlaneMapper,
    field: Vec<u32>,
}

impl MandelbrotRenderer {
    /// Validates the parameters and sets up an empty field.
    pub fn new(
        height: usize,
        max_iterations: u32,
        scale_factor: f64,
    ) -> Result<Self, MandelbrotError> {
        Ok(MandelbrotRenderer::from_config(GenerationConfig::new(
            height,
            max_iterations,
            scale_factor,
        )?))
    }

    /// Sets up an empty field for an already validated configuration.
    pub fn from_config(config: GenerationConfig) -> Self {
        MandelbrotRenderer {
            plane: PlaneMapper::new(&config),
            config,
            field: vec![],
        }
    }

    /// The configuration this renderer was built with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// True once `generate` has completed.
    pub fn is_generated(&self) -> bool {
        !self.field.is_empty()
    }

    /// The whole field, row-major.  Empty until `generate` has run.
    pub fn field(&self) -> &[u32] {
        &self.field
    }

    /// The iteration count at a pixel, if the field exists and the
    /// pixel is inside the image.
    pub fn iterations_at(&self, x: usize, y: usize) -> Option<u32> {
        if !self.is_generated() || x >= self.config.width() || y >= self.config.height() {
            return None;
        }
        Some(self.field[y * self.config.width() + x])
    }

    /// Computes the field using two bands per available CPU.
    pub fn generate(&mut self) -> Result<(), MandelbrotError> {
        self.generate_with_bands(default_band_count())
    }

    /// Computes the field, cutting the image into `bands` bands, each
    /// rendered on its own thread.  Returns once every band is done.
    /// Calling it again recomputes and replaces the field.
    pub fn generate_with_bands(&mut self, bands: usize) -> Result<(), MandelbrotError> {
        let (width, height) = (self.config.width(), self.config.height());
        let work = sections(height, bands);
        info!(
            "Generating {}x{} field, {} iterations, {} bands",
            width,
            height,
            self.config.max_iterations(),
            work.len()
        );
        let now = Instant::now();

        let mut field = vec![0 as u32; self.config.len()];
        let this = &*self;
        fill_bands(&mut field, width, work, |section, band| {
            this.render_section(section, band)
        })?;

        self.field = field;
        info!("Generated field in {:.3}s", now.elapsed().as_secs_f32());
        Ok(())
    }

    /// Renders the rows of one band into `band`, which holds exactly
    /// those rows and nothing else.
    fn render_section(&self, section: Section, band: &mut [u32]) {
        if section.is_empty() {
            return;
        }
        debug!("Rendering rows {}..{}", section.start, section.end);
        let width = self.config.width();
        let limit = self.config.max_iterations();
        let radius_squared = self.config.scale_squared();
        for (row, column) in iproduct!(section.rows(), 0..width) {
            let point = self.plane.pixel_to_point(&Pixel(column, row));
            band[(row - section.start) * width + column] =
                escape_time(point, limit, radius_squared);
        }
    }

    /// Colors the field with `palette` into a raster of the same size.
    pub fn image_with<P: Palette>(&self, palette: &P) -> Result<RgbImage, MandelbrotError> {
        if !self.is_generated() {
            return Err(MandelbrotError::NotGenerated);
        }
        let cap = self.config.max_iterations();
        let mut image = RgbImage::new(self.config.width() as u32, self.config.height() as u32);
        for (pixel, iterations) in image.pixels_mut().zip(self.field.iter()) {
            *pixel = palette.color(*iterations, cap);
        }
        Ok(image)
    }

    /// Colors the field with the default staged palette.
    pub fn image(&self) -> Result<RgbImage, MandelbrotError> {
        self.image_with(&StagedRamp::default())
    }

    /// Refuses a format that cannot record this image's dimensions,
    /// before any coloring or encoding is done.
    fn check_dimensions(&self, path: &Path, format: OutputFormat) -> Result<(), MandelbrotError> {
        let (width, height) = (self.config.width(), self.config.height());
        match format.max_dimension() {
            Some(max) if width > max || height > max => Err(MandelbrotError::encode(
                path,
                format!(
                    "{}x{} exceeds the {:?} limit of {} pixels per side",
                    width, height, format, max
                ),
            )),
            _ => Ok(()),
        }
    }

    /// Colors the field and hands it to the codec to write at `path`.
    pub fn save<Q: AsRef<Path>>(
        &self,
        path: Q,
        format: OutputFormat,
    ) -> Result<(), MandelbrotError> {
        let path = path.as_ref();
        self.check_dimensions(path, format)?;
        let image = self.image()?;
        info!("Writing {:?} image to {}", format, path.display());
        image
            .save_with_format(path, format.into())
            .map_err(|e| MandelbrotError::encode(path, e))
    }
}

/// Hands each section, with the slice of `field` holding its rows, to
/// its own scoped thread running `render`.  Returns once every thread
/// has finished.
fn fill_bands<F>(
    field: &mut [u32],
    width: usize,
    work: Vec<Section>,
    render: F,
) -> Result<(), MandelbrotError>
where
    F: Fn(Section, &mut [u32]) + Sync,
{
    let render = &render;
    let mut rest: &mut [u32] = field;
    crossbeam::scope(|spawner| {
        for section in work {
            let (band, tail) = std::mem::take(&mut rest).split_at_mut(section.len() * width);
            rest = tail;
            spawner.spawn(move |_| render(section, band));
        }
    })
    .map_err(|_| MandelbrotError::WorkerPanicked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> MandelbrotRenderer {
        MandelbrotRenderer::new(512, 100, 2.0).unwrap()
    }

    #[test]
    fn field_is_empty_until_generated() {
        let r = small();
        assert!(!r.is_generated());
        assert!(r.field().is_empty());
        assert_eq!(r.iterations_at(0, 0), None);
    }

    #[test]
    fn coloring_before_generating_fails() {
        match small().image() {
            Err(MandelbrotError::NotGenerated) => {}
            other => panic!("expected NotGenerated, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn generate_fills_every_pixel() {
        let mut r = small();
        r.generate_with_bands(7).unwrap();
        assert_eq!(r.field().len(), 1024 * 512);
        assert!(r.field().iter().all(|&i| i <= 100));
        assert_eq!(r.iterations_at(512, 256), Some(100));
        assert!(r.iterations_at(0, 256).unwrap() < 100);
        assert_eq!(r.iterations_at(1024, 0), None);
        assert_eq!(r.iterations_at(0, 512), None);
    }

    #[test]
    fn band_count_does_not_change_the_field() {
        let mut one = small();
        one.generate_with_bands(1).unwrap();
        let mut many = small();
        many.generate_with_bands(600).unwrap();
        assert!(one.field() == many.field());
    }

    #[test]
    fn field_matches_the_evaluator() {
        let mut r = small();
        r.generate_with_bands(3).unwrap();
        let plane = PlaneMapper::new(r.config());
        for &(x, y) in &[(0, 0), (700, 100), (300, 511), (1023, 300)] {
            let expected = escape_time(plane.pixel_to_point(&Pixel(x, y)), 100, 4.0);
            assert_eq!(r.iterations_at(x, y), Some(expected));
        }
    }

    #[test]
    fn image_matches_field_dimensions_and_palette() {
        let mut r = small();
        r.generate_with_bands(4).unwrap();
        let image = r.image().unwrap();
        assert_eq!(image.dimensions(), (1024, 512));
        assert_eq!(image.get_pixel(512, 256).0, [0, 0, 0]);
        let i = r.iterations_at(0, 0).unwrap();
        assert_eq!(*image.get_pixel(0, 0), StagedRamp::default().color(i, 100));
    }

    #[test]
    fn output_format_parses_names() {
        assert_eq!("png".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!("JPG".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert_eq!("jpeg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert_eq!("bmp".parse::<OutputFormat>(), Ok(OutputFormat::Bmp));
        assert!("gif".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Png);
    }

    #[test]
    fn each_band_gets_exactly_its_own_rows() {
        let mut field = vec![0 as u32; 3 * 10];
        fill_bands(&mut field, 3, sections(10, 4), |section, band| {
            assert_eq!(band.len(), section.len() * 3);
            for cell in band.iter_mut() {
                *cell = section.start as u32 + 1;
            }
        })
        .unwrap();
        let rows: Vec<u32> = field.chunks(3).map(|row| row[0]).collect();
        assert_eq!(rows, vec![1, 1, 1, 4, 4, 4, 7, 7, 7, 10]);
    }

    #[test]
    fn a_panicking_band_is_reported() {
        let mut field = vec![0 as u32; 4 * 8];
        let result = fill_bands(&mut field, 4, sections(8, 4), |section, _| {
            if section.start == 4 {
                panic!("band gave up");
            }
        });
        match result {
            Err(MandelbrotError::WorkerPanicked) => {}
            other => panic!("expected WorkerPanicked, got {:?}", other),
        }
    }

    #[test]
    fn jpeg_refuses_widths_past_sixteen_bits() {
        // 8192 * 8.0 = 65536 columns; nothing is generated.
        let r = MandelbrotRenderer::new(8192, 100, 8.0).unwrap();
        assert_eq!(r.config().width(), 65_536);
        match r.save("/tmp/never-written.jpg", OutputFormat::Jpeg) {
            Err(MandelbrotError::Encode { reason, .. }) => assert!(reason.contains("65536")),
            other => panic!("expected an encode error, got {:?}", other),
        }
        assert!(r.check_dimensions(Path::new("wide.png"), OutputFormat::Png).is_ok());
        assert!(r.check_dimensions(Path::new("wide.bmp"), OutputFormat::Bmp).is_ok());
    }

    #[test]
    fn jpeg_accepts_the_largest_width_it_can_record() {
        // 8192 * 7.9998 rounds to 65534.
        let r = MandelbrotRenderer::new(8192, 100, 7.9998).unwrap();
        assert!(r.config().width() <= 65_535);
        assert!(r
            .check_dimensions(Path::new("ok.jpg"), OutputFormat::Jpeg)
            .is_ok());
        assert_eq!(OutputFormat::Jpeg.max_dimension(), Some(65_535));
        assert_eq!(OutputFormat::Png.max_dimension(), None);
    }
}
