//! Stroke-trace judgment engine.
//!
//! Given a glyph as ordered stroke polylines and one drawn trace, decide
//! whether the trace counts as the expected stroke. Two profiles: Kid
//! (lenient, catch-up relaxation after failures) and Master (strict, stroke
//! order checked, typed failure reason). An order-free profile judges shape
//! only and infers which stroke was traced.
//!
//! Layout
//! - `geom`: distances, arclength resampling, hit and coverage rates.
//! - `adaptive`: configuration and length-dependent thresholds.
//! - `classify`: nearest-stroke classification.
//! - `judge`: the per-attempt pipelines.
//! - `streak`, `session`: caller-side state fed back into judging.
//! - `synth`: deterministic synthetic traces.
//!
//! All judging functions are pure and deterministic; nothing is shared
//! between calls.

pub mod adaptive;
pub mod api;
pub mod classify;
pub mod geom;
pub mod judge;
pub mod session;
pub mod streak;
pub mod synth;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use adaptive::{AdaptiveParams, CfgError, JudgeCfg};
pub use geom::{Point, Polyline};
pub use judge::{Attempt, FailReason, Mode, Verdict};

/// Common exports for quick imports in callers.
///
/// ```
/// use tracejudge::prelude::*;
///
/// let strokes = vec![vec![pt(0.0, 0.0), pt(100.0, 0.0)]];
/// let drawn: Vec<Point> = (0..=20).map(|i| pt(5.0 * i as f64, 1.0)).collect();
/// let cfg = JudgeCfg::default();
/// let attempt = Attempt::new(&drawn, &strokes, 0);
/// assert_eq!(judge(&attempt, Mode::Master, None, &cfg), Verdict::PASS);
///
/// let mut session = TraceSession::new(&strokes, SessionMode::Kid);
/// assert_eq!(session.begin(pt(3.0, 2.0), &cfg), Some(pt(0.0, 0.0)));
/// assert!(session.submit(&drawn, &cfg).is_some_and(|o| o.completed));
/// ```
pub mod prelude {
    pub use crate::adaptive::{compute_params, AdaptiveParams, JudgeCfg, OrderFreeCfg};
    pub use crate::geom::{pt, Point, Polyline};
    pub use crate::judge::{
        judge, judge_kid, judge_master, judge_order_free, Attempt, FailReason, Mode, Verdict,
    };
    pub use crate::session::{begin_trace, SessionMode, TraceSession};
    pub use crate::streak::FailStreak;
}
