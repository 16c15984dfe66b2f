//! Curated surface for hosts embedding the engine.
//!
//! Prefer these re-exports over reaching into submodules; the module layout
//! may still move.

// Geometry
pub use crate::geom::{
    coverage_rate, distance_point_to_polyline, hit_rate, normalize_drawn_points, polyline_length,
    pt, resample_polyline, sample_along_polyline, Point, Polyline,
};
// Thresholds
pub use crate::adaptive::{
    compute_params, length_blend, AdaptiveParams, CfgError, JudgeCfg, OrderFreeCfg,
    MAX_RELAX_STREAK,
};
// Judging
pub use crate::classify::{guess_stroke_index, StrokeGuess};
pub use crate::judge::{
    judge, judge_kid, judge_master, judge_order_free, Attempt, FailReason, Mode, OrderFreeOutcome,
    Verdict,
};
// Caller state
pub use crate::session::{
    begin_trace, AttemptOutcome, MistakeTally, RunStats, SessionMode, TraceSession,
};
pub use crate::streak::{FailStreak, MAX_TRACKED_STROKES};
// Synthetic traces
pub use crate::synth::{draw_trace, ReplayToken as TraceReplay, TraceCfg};
