//! Judge configuration and length-adaptive thresholds.
//!
//! Purpose
//! - `JudgeCfg` is the single immutable bundle of tunables. Hosts build it once
//!   and pass it by reference into every judge call; nothing reads ambient state.
//! - `compute_params` maps a target stroke's arclength to `AdaptiveParams`,
//!   blending between a "short stroke" and a "long stroke" regime.
//!
//! Model
//! - `t = clamp((len - short_len) / (long_len - short_len), 0, 1)`.
//! - Tolerances shrink and acceptance floors rise as `t → 1`: a fixed tolerance
//!   is too strict for tiny strokes and too lenient for long ones.
//! - Kid mode may loosen the result with `AdaptiveParams::relaxed` after
//!   repeated failures on the same stroke. Master mode never does.
//!
//! Policy
//! - Regime slopes and relaxation steps are module constants, not config:
//!   they shape the curve between the two regimes and are not meant to be
//!   tuned per host.
//! - The endpoints of that curve (base tolerances, base rates, regime
//!   lengths) live in `JudgeCfg` and are validated by `JudgeCfg::validate`.

use std::fmt;

/// Extra point tolerance granted to the shortest strokes (`t = 0`).
const TOL_SHORT_BONUS: f64 = 4.0;
/// `cover_tol / tol`. Coverage asks whether the target is represented nearby.
const COVER_TOL_RATIO: f64 = 1.15;
const MIN_HIT_SLOPE: f64 = 0.08;
const MIN_DRAW_SLOPE: f64 = 0.07;
const MIN_COVER_SLOPE: f64 = 0.15;
/// Start tolerance removed for the longest strokes (`t = 1`).
const START_TOL_SLOPE: f64 = 6.0;

/// Largest failure streak that still loosens the thresholds.
pub const MAX_RELAX_STREAK: u32 = 3;
const RELAX_TOL_STEP: f64 = 3.0;
const RELAX_RATE_STEP: f64 = 0.06;
const RELAX_START_STEP: f64 = 3.0;
const RELAX_HIT_FLOOR: f64 = 0.28;
const RELAX_COVER_FLOOR: f64 = 0.18;

/// Tunables for the order-free judging path (glyphs whose strokes may be
/// traced in any order, e.g. Latin letters).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrderFreeCfg {
    /// Minimum raw points for an order-free attempt.
    pub min_points: usize,
    /// Hit tolerance as a multiple of `JudgeCfg::start_tolerance`.
    pub hit_tol_factor: f64,
    /// Coverage tolerance as a multiple of `JudgeCfg::start_tolerance`.
    pub cover_tol_factor: f64,
    pub min_hit_rate: f64,
    pub min_cover_rate: f64,
    /// Approximate number of stroke vertices probed for coverage.
    pub cover_vertex_budget: usize,
    /// Approximate number of drawn points averaged by the stroke guess.
    pub guess_budget: usize,
    /// Pointer-down acceptance radius as a multiple of `start_tolerance`.
    pub begin_tol_factor: f64,
}

impl Default for OrderFreeCfg {
    fn default() -> Self {
        Self {
            min_points: 10,
            hit_tol_factor: 1.7,
            cover_tol_factor: 2.0,
            min_hit_rate: 0.55,
            min_cover_rate: 0.35,
            cover_vertex_budget: 14,
            guess_budget: 10,
            begin_tol_factor: 2.2,
        }
    }
}

/// Judge configuration (all distances in 0–100 surface units).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JudgeCfg {
    /// Base point-to-stroke tolerance for long strokes.
    pub tolerance: f64,
    /// Base start-offset tolerance (short strokes); also scales the order-free radii.
    pub start_tolerance: f64,
    /// Master-mode pointer-down radius; `classifier_bound_factor` times this
    /// bounds the classifier's best average distance.
    pub master_start_tolerance: f64,
    pub min_hit_rate: f64,
    pub min_draw_len_rate: f64,
    pub min_cover_rate: f64,
    /// Raw points required before any judging happens.
    pub min_points: usize,
    /// Drawn points closer than this to the previous kept point are jitter.
    pub min_move_eps: f64,
    /// Arclength step used to resample drawn traces.
    pub resample_step: f64,
    /// Target samples probed by the coverage check.
    pub cover_samples: usize,
    /// Stroke length at or below which the "short" regime applies fully.
    pub short_len: f64,
    /// Stroke length at or above which the "long" regime applies fully.
    pub long_len: f64,
    pub classifier_bound_factor: f64,
    /// Master mean-deviation bound as a multiple of `tol`.
    pub gross_deviation_factor: f64,
    pub order_free: OrderFreeCfg,
}

impl Default for JudgeCfg {
    fn default() -> Self {
        Self {
            tolerance: 20.0,
            start_tolerance: 34.0,
            master_start_tolerance: 26.0,
            min_hit_rate: 0.45,
            min_draw_len_rate: 0.15,
            min_cover_rate: 0.35,
            min_points: 3,
            min_move_eps: 0.35,
            resample_step: 1.2,
            cover_samples: 32,
            short_len: 12.0,
            long_len: 60.0,
            classifier_bound_factor: 3.0,
            gross_deviation_factor: 2.2,
            order_free: OrderFreeCfg::default(),
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum CfgError {
    /// A distance or factor must be finite and strictly positive.
    NotPositive { field: &'static str, value: f64 },
    /// A rate must lie in `[0, 1]`.
    RateOutOfRange { field: &'static str, value: f64 },
    /// `long_len` must exceed `short_len`.
    EmptyLengthBand { short_len: f64, long_len: f64 },
    /// A sample or point count must be at least one.
    ZeroCount { field: &'static str },
}

impl fmt::Display for CfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be finite and > 0 (got {value})")
            }
            Self::RateOutOfRange { field, value } => {
                write!(f, "{field} must lie in [0, 1] (got {value})")
            }
            Self::EmptyLengthBand {
                short_len,
                long_len,
            } => write!(
                f,
                "long_len ({long_len}) must be greater than short_len ({short_len})"
            ),
            Self::ZeroCount { field } => write!(f, "{field} must be at least 1"),
        }
    }
}

impl std::error::Error for CfgError {}

impl JudgeCfg {
    /// Check every tunable; the judge itself assumes a validated config.
    pub fn validate(&self) -> Result<(), CfgError> {
        let of = &self.order_free;
        for (field, value) in [
            ("tolerance", self.tolerance),
            ("start_tolerance", self.start_tolerance),
            ("master_start_tolerance", self.master_start_tolerance),
            ("resample_step", self.resample_step),
            ("classifier_bound_factor", self.classifier_bound_factor),
            ("gross_deviation_factor", self.gross_deviation_factor),
            ("order_free.hit_tol_factor", of.hit_tol_factor),
            ("order_free.cover_tol_factor", of.cover_tol_factor),
            ("order_free.begin_tol_factor", of.begin_tol_factor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CfgError::NotPositive { field, value });
            }
        }
        if !(self.min_move_eps.is_finite() && self.min_move_eps >= 0.0) {
            return Err(CfgError::NotPositive {
                field: "min_move_eps",
                value: self.min_move_eps,
            });
        }
        for (field, value) in [
            ("min_hit_rate", self.min_hit_rate),
            ("min_draw_len_rate", self.min_draw_len_rate),
            ("min_cover_rate", self.min_cover_rate),
            ("order_free.min_hit_rate", of.min_hit_rate),
            ("order_free.min_cover_rate", of.min_cover_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CfgError::RateOutOfRange { field, value });
            }
        }
        if !(self.short_len.is_finite() && self.long_len.is_finite())
            || self.long_len <= self.short_len
        {
            return Err(CfgError::EmptyLengthBand {
                short_len: self.short_len,
                long_len: self.long_len,
            });
        }
        for (field, value) in [
            ("min_points", self.min_points),
            ("cover_samples", self.cover_samples),
            ("order_free.min_points", of.min_points),
            ("order_free.cover_vertex_budget", of.cover_vertex_budget),
            ("order_free.guess_budget", of.guess_budget),
        ] {
            if value == 0 {
                return Err(CfgError::ZeroCount { field });
            }
        }
        Ok(())
    }
}

/// Per-call thresholds derived from one stroke's arclength.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdaptiveParams {
    /// Max distance for a drawn point to count as a hit.
    pub tol: f64,
    /// Max distance for a target sample to count as covered.
    pub cover_tol: f64,
    pub min_hit: f64,
    /// Minimum drawn arclength as a fraction of the target arclength.
    pub min_draw: f64,
    pub min_cover: f64,
    /// Max offset between the drawn start and the stroke's first point.
    pub start_tol: f64,
}

/// Blend factor `t ∈ [0, 1]`: 0 for short strokes, 1 for long ones.
#[inline]
pub fn length_blend(stroke_len: f64, cfg: &JudgeCfg) -> f64 {
    ((stroke_len - cfg.short_len) / (cfg.long_len - cfg.short_len)).clamp(0.0, 1.0)
}

/// Thresholds for a stroke of arclength `stroke_len`.
pub fn compute_params(stroke_len: f64, cfg: &JudgeCfg) -> AdaptiveParams {
    let t = length_blend(stroke_len, cfg);
    let tol = cfg.tolerance + (1.0 - t) * TOL_SHORT_BONUS;
    AdaptiveParams {
        tol,
        cover_tol: tol * COVER_TOL_RATIO,
        min_hit: cfg.min_hit_rate + t * MIN_HIT_SLOPE,
        min_draw: cfg.min_draw_len_rate + t * MIN_DRAW_SLOPE,
        min_cover: cfg.min_cover_rate + t * MIN_COVER_SLOPE,
        start_tol: cfg.start_tolerance - t * START_TOL_SLOPE,
    }
}

impl AdaptiveParams {
    /// Catch-up relaxation after `streak` consecutive failures (Kid mode only).
    ///
    /// The streak is clamped to `[0, MAX_RELAX_STREAK]`; zero is the identity.
    /// Rate floors cap how far a rate may drop but never lift a rate above
    /// its unrelaxed value, so a larger streak can only loosen the gates.
    pub fn relaxed(self, streak: u32) -> AdaptiveParams {
        let s = streak.min(MAX_RELAX_STREAK);
        if s == 0 {
            return self;
        }
        let k = s as f64;
        let tol = self.tol + RELAX_TOL_STEP * k;
        AdaptiveParams {
            tol,
            cover_tol: tol * COVER_TOL_RATIO,
            min_hit: (self.min_hit - RELAX_RATE_STEP * k)
                .max(RELAX_HIT_FLOOR)
                .min(self.min_hit),
            min_draw: self.min_draw,
            min_cover: (self.min_cover - RELAX_RATE_STEP * k)
                .max(RELAX_COVER_FLOOR)
                .min(self.min_cover),
            start_tol: self.start_tol + RELAX_START_STEP * k,
        }
    }
}
