#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never runs off to infinity.  For points outside the set, the
//! number of iterations it takes for `z` to leave a circle of a given
//! radius (its "escape time") is a measure of how far outside they
//! are, and that number is what gets colored.
//!
//! Every pixel's escape time is independent of every other pixel's,
//! so the image is cut into horizontal bands and each band is
//! rendered on its own thread, directly into its own slice of one
//! shared buffer.  Once every band is done the buffer is run through a
//! palette and handed to the `image` crate to be written out.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod config;
pub mod errors;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod renderer;
pub mod sections;

pub use config::GenerationConfig;
pub use errors::MandelbrotError;
pub use palette::{Palette, StagedRamp};
pub use renderer::{MandelbrotRenderer, OutputFormat};
