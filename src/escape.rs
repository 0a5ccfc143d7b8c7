//! The classic escape-time test.

use num::Complex;

/// Iterates `z = z^2 + c` from zero and returns the index of the
/// iteration at which `|z|^2` first reaches `radius_squared`.  If that
/// never happens within `limit` iterations, returns `limit`, which
/// callers treat as "in the set".
///
/// The real and imaginary parts are tracked separately, along with
/// their squares, so each step costs three multiplies.
#[inline]
pub fn escape_time(c: Complex<f64>, limit: u32, radius_squared: f64) -> u32 {
    let (mut re, mut im) = (0.0_f64, 0.0_f64);
    let (mut re2, mut im2) = (0.0_f64, 0.0_f64);
    for i in 0..limit {
        if re2 + im2 >= radius_squared {
            return i;
        }
        // im must be updated from the old re, before re is overwritten.
        im = 2.0 * re * im + c.im;
        re = re2 - im2 + c.re;
        re2 = re * re;
        im2 = im * im;
    }
    limit
}
