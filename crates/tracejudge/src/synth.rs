//! Synthetic retraces of a stroke (jitter + replay tokens).
//!
//! Purpose
//! - Produce deterministic, reproducible "hand-drawn" traces for threshold
//!   calibration, benches and property tests.
//!
//! Model
//! - Walk the first `coverage` fraction of the stroke at `samples` evenly
//!   spaced arclength positions, shift every point by `offset`, then add
//!   independent uniform jitter in `[-jitter, jitter]` per coordinate.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{point_at_distance, polyline_length, Point, Polyline};

/// Synthetic trace configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceCfg {
    /// Number of drawn points. Values below 2 are raised to 2.
    pub samples: usize,
    /// Per-coordinate uniform jitter amplitude. Negative values count as 0.
    pub jitter: f64,
    /// Constant shift applied to every point.
    pub offset: Point,
    /// Fraction of the stroke traced, from its first point. Clamped to [0, 1].
    pub coverage: f64,
}

impl Default for TraceCfg {
    fn default() -> Self {
        Self {
            samples: 40,
            jitter: 2.0,
            offset: Point::zeros(),
            coverage: 1.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// The token for the next draw in the same series.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            ..self
        }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw one synthetic trace of `stroke`. Empty for an empty stroke.
pub fn draw_trace(stroke: &[Point], cfg: &TraceCfg, tok: ReplayToken) -> Polyline {
    if stroke.is_empty() {
        return Vec::new();
    }
    let mut rng = tok.to_std_rng();
    let n = cfg.samples.max(2);
    let span = polyline_length(stroke) * cfg.coverage.clamp(0.0, 1.0);
    let amp = cfg.jitter.max(0.0);
    (0..n)
        .filter_map(|i| point_at_distance(stroke, span * i as f64 / (n - 1) as f64))
        .map(|p| {
            let noise = if amp > 0.0 {
                Point::new(rng.gen_range(-amp..=amp), rng.gen_range(-amp..=amp))
            } else {
                Point::zeros()
            };
            p + cfg.offset + noise
        })
        .collect()
}
