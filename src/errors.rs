// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while configuring, generating, or
//! saving a Mandelbrot field.  The numeric core itself is total; these
//! are all either bad inputs or bad ordering by the caller, plus the
//! two ways the outside world can let us down (a worker thread dying,
//! or the codec failing to write).

use std::path::Path;

use failure::Fail;

/// The error type for the whole crate.
#[derive(Debug, Fail)]
pub enum MandelbrotError {
    /// The requested image height is outside the supported range.
    #[fail(display = "height {} is outside the valid range [{}, {}]", value, min, max)]
    HeightOutOfRange {
        /// The height that was asked for.
        value: usize,
        /// Smallest permitted height.
        min: usize,
        /// Largest permitted height.
        max: usize,
    },

    /// The iteration cap is outside the supported range.
    #[fail(
        display = "max iterations {} is outside the valid range [{}, {}]",
        value, min, max
    )]
    IterationsOutOfRange {
        /// The iteration cap that was asked for.
        value: u32,
        /// Smallest permitted cap.
        min: u32,
        /// Largest permitted cap.
        max: u32,
    },

    /// The scale factor is outside the supported range (or not a number).
    #[fail(
        display = "scale factor {} is outside the valid range [{}, {}]",
        value, min, max
    )]
    ScaleOutOfRange {
        /// The scale factor that was asked for.
        value: f64,
        /// Smallest permitted scale factor.
        min: f64,
        /// Largest permitted scale factor.
        max: f64,
    },

    /// The field was colored or saved before `generate` ran.
    #[fail(display = "the iteration field has not been generated yet")]
    NotGenerated,

    /// A band worker panicked before finishing its rows.
    #[fail(display = "a band worker thread panicked during generation")]
    WorkerPanicked,

    /// The image codec could not write the output file.
    #[fail(display = "could not write {}: {}", path, reason)]
    Encode {
        /// Where we were trying to write.
        path: String,
        /// What the codec said.
        reason: String,
    },
}

impl MandelbrotError {
    pub(crate) fn encode<E: ToString>(path: &Path, err: E) -> Self {
        MandelbrotError::Encode {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}
