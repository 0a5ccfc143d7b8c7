//! Turning iteration counts into colors.
//!
//! The default palette is a staged ramp: black for points in the set,
//! then red climbing to full, then green climbing on top of it, ending
//! in yellow for anything that took 4096 or more iterations to escape.
//! The stages are a table, so a different look is a different table.

use image::Rgb;

/// Anything that can color an iteration count.  `cap` is the
/// iteration limit of the run, i.e. the "never escaped" value.
///
/// Colors carry no alpha channel: every pixel is fully opaque.
pub trait Palette {
    /// Returns the color for a pixel that escaped after `iterations`.
    fn color(&self, iterations: u32, cap: u32) -> Rgb<u8>;
}

/// One channel of a stage: `((i - base) * mul) / div + add`, all in
/// truncating integer arithmetic.  A flat channel has `mul == 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ramp {
    base: u32,
    mul: u32,
    div: u32,
    add: u32,
}

impl Ramp {
    /// A channel that climbs linearly across the stage.
    pub const fn new(base: u32, mul: u32, div: u32, add: u32) -> Ramp {
        Ramp {
            base,
            mul,
            div,
            add,
        }
    }

    /// A channel that holds one value across the stage.
    pub const fn flat(value: u8) -> Ramp {
        Ramp {
            base: 0,
            mul: 0,
            div: 1,
            add: value as u32,
        }
    }

    #[inline]
    fn apply(&self, i: u32) -> u8 {
        let v = (i.saturating_sub(self.base) * self.mul) / self.div + self.add;
        v.min(255) as u8
    }
}

/// Applies while the iteration count is below `below`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stage {
    /// Exclusive upper bound on the iteration count for this stage.
    pub below: u32,
    /// Red channel.
    pub red: Ramp,
    /// Green channel.
    pub green: Ramp,
}

const fn stage(below: u32, red: Ramp, green: Ramp) -> Stage {
    Stage { below, red, green }
}

/// The red-then-yellow table.  Checked in order; the first stage
/// whose bound exceeds the count wins.
pub const STAGES: &[Stage] = &[
    stage(64, Ramp::new(0, 2, 1, 0), Ramp::flat(0)),
    stage(128, Ramp::new(64, 128, 126, 128), Ramp::flat(0)),
    stage(256, Ramp::new(128, 62, 127, 193), Ramp::flat(0)),
    stage(512, Ramp::flat(255), Ramp::new(256, 62, 255, 1)),
    stage(1024, Ramp::flat(255), Ramp::new(512, 63, 511, 64)),
    stage(2048, Ramp::flat(255), Ramp::new(1024, 63, 1023, 128)),
    stage(4096, Ramp::flat(255), Ramp::new(2048, 63, 2047, 192)),
];

/// Past the last stage.
pub const SATURATED: Rgb<u8> = Rgb([255, 255, 0]);

/// Inside the set.
pub const INSIDE: Rgb<u8> = Rgb([0, 0, 0]);

/// A palette driven by a table of stages.  Blue is always zero.
#[derive(Copy, Clone, Debug)]
pub struct StagedRamp {
    stages: &'static [Stage],
    saturated: Rgb<u8>,
}

impl StagedRamp {
    /// A staged palette over an arbitrary table.
    pub fn new(stages: &'static [Stage], saturated: Rgb<u8>) -> Self {
        StagedRamp { stages, saturated }
    }
}

impl Default for StagedRamp {
    fn default() -> Self {
        StagedRamp::new(STAGES, SATURATED)
    }
}

impl Palette for StagedRamp {
    fn color(&self, iterations: u32, cap: u32) -> Rgb<u8> {
        if iterations >= cap {
            return INSIDE;
        }
        self.stages
            .iter()
            .find(|s| iterations < s.below)
            .map(|s| Rgb([s.red.apply(iterations), s.green.apply(iterations), 0]))
            .unwrap_or(self.saturated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(i: u32) -> [u8; 3] {
        StagedRamp::default().color(i, 32_000).0
    }

    #[test]
    fn the_cap_is_black() {
        assert_eq!(StagedRamp::default().color(100, 100).0, [0, 0, 0]);
        assert_eq!(StagedRamp::default().color(5000, 100).0, [0, 0, 0]);
        assert_eq!(StagedRamp::default().color(4095, 4095).0, [0, 0, 0]);
    }

    #[test]
    fn zero_is_black() {
        assert_eq!(color(0), [0, 0, 0]);
    }

    #[test]
    fn stage_boundaries() {
        assert_eq!(color(1), [2, 0, 0]);
        assert_eq!(color(63), [126, 0, 0]);
        assert_eq!(color(64), [128, 0, 0]);
        assert_eq!(color(127), [192, 0, 0]);
        assert_eq!(color(128), [193, 0, 0]);
        assert_eq!(color(255), [255, 0, 0]);
        assert_eq!(color(256), [255, 1, 0]);
        assert_eq!(color(511), [255, 63, 0]);
        assert_eq!(color(512), [255, 64, 0]);
        assert_eq!(color(1023), [255, 127, 0]);
        assert_eq!(color(1024), [255, 128, 0]);
        assert_eq!(color(2047), [255, 191, 0]);
        assert_eq!(color(2048), [255, 192, 0]);
        assert_eq!(color(4095), [255, 255, 0]);
    }

    #[test]
    fn divisions_truncate() {
        // (100 - 64) * 128 / 126 = 36.57...
        assert_eq!(color(100), [36 + 128, 0, 0]);
        // (300 - 256) * 62 / 255 = 10.69...
        assert_eq!(color(300), [255, 11, 0]);
    }

    #[test]
    fn saturates_at_4096() {
        assert_eq!(color(4096), [255, 255, 0]);
        assert_eq!(color(31_999), [255, 255, 0]);
    }

    #[test]
    fn red_never_decreases_below_the_cap() {
        let reds: Vec<u8> = (0..5000).map(|i| color(i)[0]).collect();
        assert!(reds.windows(2).all(|w| w[0] <= w[1]));
    }
}
