//! Shape-only judgment for glyphs whose strokes may be traced in any order.
//!
//! The traced stroke is inferred from the drawing itself, then judged on
//! shape alone: no start gate, no length gate, generous fixed radii derived
//! from `start_tolerance`.

use super::{FailReason, Verdict};
use crate::adaptive::JudgeCfg;
use crate::classify::guess_closest_stroke_subsampled;
use crate::geom::{coverage_rate, hit_rate, Point, Polyline};

/// Which stroke the attempt was attributed to, and the verdict for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderFreeOutcome {
    pub solved: usize,
    pub verdict: Verdict,
}

/// Judge `points` against whichever stroke they resemble most.
///
/// `fallback` is used when no stroke can be guessed (fewer than two points,
/// or only degenerate strokes). Failures carry `BadShape`.
pub fn judge_order_free(
    points: &[Point],
    strokes: &[Polyline],
    fallback: usize,
    cfg: &JudgeCfg,
) -> OrderFreeOutcome {
    let guess = guess_closest_stroke_subsampled(points, strokes, cfg.order_free.guess_budget);
    let solved = guess.index.unwrap_or(fallback);
    let ok = strokes
        .get(solved)
        .is_some_and(|stroke| shape_matches(points, stroke, cfg));
    let verdict = if ok {
        Verdict::PASS
    } else {
        tracing::debug!(solved, "order-free: attempt rejected");
        Verdict::fail(FailReason::BadShape)
    };
    OrderFreeOutcome { solved, verdict }
}

fn shape_matches(points: &[Point], stroke: &[Point], cfg: &JudgeCfg) -> bool {
    let of = &cfg.order_free;
    if points.len() < of.min_points || stroke.len() < 2 {
        return false;
    }
    let hit = hit_rate(points, stroke, cfg.start_tolerance * of.hit_tol_factor);

    // Probe the stroke's own vertices; references are already densely sampled.
    let step = (stroke.len() / of.cover_vertex_budget.max(1)).max(1);
    let probes: Vec<Point> = stroke.iter().step_by(step).copied().collect();
    let cover = coverage_rate(&probes, points, cfg.start_tolerance * of.cover_tol_factor);

    hit >= of.min_hit_rate && cover >= of.min_cover_rate
}
