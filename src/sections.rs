//! Cuts the rows of an image into contiguous horizontal bands, one
//! unit of parallel work each.

use std::ops::Range;

/// A half-open range of rows, `[start, end)`, spanning the full
/// width of the image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// First row in the band.
    pub start: usize,
    /// One past the last row in the band.
    pub end: usize,
}

impl Section {
    /// The rows covered by this band.
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of rows in the band.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// A band with no rows has no work in it.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Splits `[0, height)` into `count` bands of `ceil(height / count)`
/// rows each.  The last band always ends exactly at `height`, and
/// when `count` is large relative to `height` the trailing bands may
/// be empty.  A `count` of zero is treated as one.
pub fn sections(height: usize, count: usize) -> Vec<Section> {
    let count = count.max(1);
    let zonesize = (height + count - 1) / count;
    (0..count)
        .map(|i| {
            let start = (i * zonesize).min(height);
            let end = if i + 1 == count {
                height
            } else {
                ((i + 1) * zonesize).min(height)
            };
            Section { start, end }
        })
        .collect()
}
