//! Per-attempt stroke judgment (Kid, Master, order-free).
//!
//! Purpose
//! - Decide whether one drawn trace counts as the expected stroke.
//! - Kid mode is forgiving: binary outcome, thresholds loosened by the
//!   caller's failure streak. Master mode is strict: no relaxation, a
//!   stroke-order check, and exactly one typed `FailReason` per failure.
//!
//! Pipeline
//! - Pre-validation (both modes): too few raw points → `TooShort`; missing
//!   stroke or zero-length stroke → `BadShape`.
//! - Master only: nearest-stroke classification on raw points → `FarFromStroke`
//!   or `WrongOrder`. Order is checked before shape quality.
//! - Normalize the trace (jitter drop + fixed-step resample), derive
//!   `AdaptiveParams`, then the start gate, the minimum-length gate, (Master
//!   only) the mean-deviation gate, and finally hit and coverage floors.
//!
//! Kid mode has no mean-deviation gate; a scribble that passes the start and
//! length gates still has to clear the hit floor.
//!
//! Code cross-refs: `adaptive::{compute_params, AdaptiveParams}`,
//! `classify::guess_stroke_index`, `streak::FailStreak`.

mod gates;
mod kid;
mod master;
mod order_free;

pub use kid::judge_kid;
pub use master::judge_master;
pub use order_free::{judge_order_free, OrderFreeOutcome};

use std::fmt;

use crate::adaptive::JudgeCfg;
use crate::geom::{Point, Polyline};
use crate::streak::FailStreak;

/// Why a Master-mode attempt failed. Checked in a fixed order, so reasons are
/// mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum FailReason {
    /// The trace matches a different stroke than the expected one.
    WrongOrder,
    /// Hit or coverage rate below its floor (or unusable reference data).
    BadShape,
    /// Too few points, or drawn arclength below the minimum fraction.
    TooShort,
    /// The trace starts too far from the stroke's first point.
    StartOff,
    /// The trace is geometrically unrelated to the glyph or the stroke.
    FarFromStroke,
}

impl FailReason {
    pub const ALL: [FailReason; 5] = [
        FailReason::WrongOrder,
        FailReason::BadShape,
        FailReason::TooShort,
        FailReason::StartOff,
        FailReason::FarFromStroke,
    ];

    /// Wire name, e.g. `"WRONG_ORDER"`.
    pub fn as_str(self) -> &'static str {
        match self {
            FailReason::WrongOrder => "WRONG_ORDER",
            FailReason::BadShape => "BAD_SHAPE",
            FailReason::TooShort => "TOO_SHORT",
            FailReason::StartOff => "START_OFF",
            FailReason::FarFromStroke => "FAR_FROM_STROKE",
        }
    }

    /// Short feedback label shown next to a failed stroke.
    pub fn label(self) -> &'static str {
        match self {
            FailReason::WrongOrder => "order ×",
            FailReason::BadShape => "line ×",
            FailReason::TooShort => "short ×",
            FailReason::StartOff => "start ×",
            FailReason::FarFromStroke => "off ×",
        }
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one attempt. `reason` is only ever set on failed Master (and
/// order-free) verdicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verdict {
    pub ok: bool,
    pub reason: Option<FailReason>,
}

impl Verdict {
    pub const PASS: Verdict = Verdict {
        ok: true,
        reason: None,
    };
    /// Bare failure (Kid mode).
    pub const FAIL: Verdict = Verdict {
        ok: false,
        reason: None,
    };

    #[inline]
    pub fn fail(reason: FailReason) -> Verdict {
        Verdict {
            ok: false,
            reason: Some(reason),
        }
    }
}

/// Judging profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    Kid,
    Master,
}

/// One stroke attempt: the raw drawn points, the glyph's strokes in writing
/// order, and the stroke the UI currently expects. Everything is borrowed.
#[derive(Clone, Copy, Debug)]
pub struct Attempt<'a> {
    pub points: &'a [Point],
    pub strokes: &'a [Polyline],
    pub expected: usize,
}

impl<'a> Attempt<'a> {
    #[inline]
    pub fn new(points: &'a [Point], strokes: &'a [Polyline], expected: usize) -> Self {
        Self {
            points,
            strokes,
            expected,
        }
    }
}

/// Judge `attempt` under `mode`. The failure streak only reaches Kid mode.
pub fn judge(
    attempt: &Attempt<'_>,
    mode: Mode,
    streak: Option<&FailStreak>,
    cfg: &JudgeCfg,
) -> Verdict {
    match mode {
        Mode::Kid => judge_kid(attempt, streak, cfg),
        Mode::Master => judge_master(attempt, cfg),
    }
}
