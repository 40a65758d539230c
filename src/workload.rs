//! Input generation for benchmark scenarios
//!
//! Every generator draws from a caller-supplied RNG so a run can be replayed
//! from its seed. Shapes are built from one uniform draw of `n` values:
//!
//! - [`InputShape::Random`]: the draw as-is
//! - [`InputShape::Sorted`]: ascending
//! - [`InputShape::Reversed`]: descending
//! - [`InputShape::NearlySorted`]: ascending, then `max(1, n / 100)` random
//!   pair swaps

use crate::error::ConfigError;
use rand::Rng;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Ordering of a generated input array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputShape {
    Random,
    Sorted,
    Reversed,
    NearlySorted,
}

impl InputShape {
    /// All shapes, in report order
    pub const ALL: [InputShape; 4] = [
        InputShape::Random,
        InputShape::Sorted,
        InputShape::Reversed,
        InputShape::NearlySorted,
    ];

    /// Name used on the command line and in report rows
    pub fn as_str(&self) -> &'static str {
        match self {
            InputShape::Random => "random",
            InputShape::Sorted => "sorted",
            InputShape::Reversed => "reversed",
            InputShape::NearlySorted => "nearly-sorted",
        }
    }
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputShape::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownShape(s.to_string()))
    }
}

/// Range values are drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueRange {
    /// Any `i32`
    Full,
    /// `0..n * factor`, scaled to the input size
    Scaled { factor: i32 },
    /// A fixed inclusive range
    Fixed(RangeInclusive<i32>),
}

impl ValueRange {
    fn bounds(&self, n: usize) -> RangeInclusive<i32> {
        match self {
            ValueRange::Full => i32::MIN..=i32::MAX,
            ValueRange::Scaled { factor } => {
                let n = i32::try_from(n).unwrap_or(i32::MAX);
                let upper = n.saturating_mul(*factor).saturating_sub(1).max(0);
                0..=upper
            }
            ValueRange::Fixed(range) => range.clone(),
        }
    }
}

/// Generates `n` values in the given shape
pub fn generate<R: Rng>(
    n: usize,
    shape: InputShape,
    range: &ValueRange,
    rng: &mut R,
) -> Vec<i32> {
    let bounds = range.bounds(n);
    let mut values: Vec<i32> = (0..n).map(|_| rng.gen_range(bounds.clone())).collect();

    match shape {
        InputShape::Random => {}
        InputShape::Sorted => values.sort_unstable(),
        InputShape::Reversed => {
            values.sort_unstable();
            values.reverse();
        }
        InputShape::NearlySorted => {
            values.sort_unstable();
            if n > 0 {
                for _ in 0..(n / 100).max(1) {
                    let a = rng.gen_range(0..n);
                    let b = rng.gen_range(0..n);
                    values.swap(a, b);
                }
            }
        }
    }

    values
}
