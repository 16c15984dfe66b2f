use super::{gates, Attempt, FailReason, Verdict};
use crate::adaptive::{compute_params, JudgeCfg};
use crate::classify::guess_stroke_index;
use crate::geom::mean_distance_to_polyline;

/// Strict judgment with stroke-order verification and a typed reason on
/// failure. Never relaxed.
pub fn judge_master(attempt: &Attempt<'_>, cfg: &JudgeCfg) -> Verdict {
    match master_gates(attempt, cfg) {
        Ok(()) => Verdict::PASS,
        Err(reason) => {
            tracing::debug!(stroke = attempt.expected, %reason, "master: attempt rejected");
            Verdict::fail(reason)
        }
    }
}

fn master_gates(attempt: &Attempt<'_>, cfg: &JudgeCfg) -> Result<(), FailReason> {
    let target = gates::target(attempt, cfg)?;

    // Classify on raw points; which stroke was traced, independent of the UI.
    let guess = guess_stroke_index(attempt.points, attempt.strokes);
    let bound = cfg.classifier_bound_factor * cfg.master_start_tolerance;
    let best = match guess.index {
        Some(i) if guess.avg_distance <= bound => i,
        _ => return Err(FailReason::FarFromStroke),
    };
    if best != attempt.expected {
        tracing::debug!(expected = attempt.expected, traced = best, "stroke order");
        return Err(FailReason::WrongOrder);
    }

    let drawn = gates::normalized(attempt.points, cfg)?;
    let params = compute_params(target.len, cfg);
    gates::start(&drawn, &target, &params)?;
    gates::length(&drawn, &target, &params)?;

    let deviation = mean_distance_to_polyline(&drawn, target.stroke);
    if deviation > cfg.gross_deviation_factor * params.tol {
        tracing::debug!(deviation, tol = params.tol, "mean deviation gate");
        return Err(FailReason::FarFromStroke);
    }
    gates::rates(&drawn, &target, &params, cfg)
}
