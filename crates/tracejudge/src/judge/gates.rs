//! Gate checks shared by Kid and Master. Each returns the reason Master
//! would report; Kid mode drops it.

use super::{Attempt, FailReason};
use crate::adaptive::{AdaptiveParams, JudgeCfg};
use crate::geom::{
    coverage_rate, distance, hit_rate, normalize_drawn_points, polyline_length,
    sample_along_polyline, Point, Polyline,
};

/// The validated expected stroke.
pub(super) struct Target<'a> {
    pub stroke: &'a [Point],
    pub len: f64,
}

/// Shared pre-validation: enough raw points, expected stroke present and
/// of positive length.
pub(super) fn target<'a>(
    attempt: &Attempt<'a>,
    cfg: &JudgeCfg,
) -> Result<Target<'a>, FailReason> {
    if attempt.points.len() < cfg.min_points {
        return Err(FailReason::TooShort);
    }
    let stroke = attempt
        .strokes
        .get(attempt.expected)
        .ok_or(FailReason::BadShape)?;
    let len = polyline_length(stroke);
    if len <= 0.0 {
        return Err(FailReason::BadShape);
    }
    Ok(Target { stroke, len })
}

pub(super) fn normalized(points: &[Point], cfg: &JudgeCfg) -> Result<Polyline, FailReason> {
    let dp = normalize_drawn_points(points, cfg.resample_step, cfg.min_move_eps);
    if dp.len() < 2 {
        return Err(FailReason::TooShort);
    }
    Ok(dp)
}

pub(super) fn start(
    drawn: &[Point],
    target: &Target<'_>,
    p: &AdaptiveParams,
) -> Result<(), FailReason> {
    let offset = distance(drawn[0], target.stroke[0]);
    if offset > p.start_tol {
        tracing::debug!(offset, start_tol = p.start_tol, "start gate");
        return Err(FailReason::StartOff);
    }
    Ok(())
}

pub(super) fn length(
    drawn: &[Point],
    target: &Target<'_>,
    p: &AdaptiveParams,
) -> Result<(), FailReason> {
    let drawn_len = polyline_length(drawn);
    if drawn_len < target.len * p.min_draw {
        tracing::debug!(
            drawn_len,
            stroke_len = target.len,
            min_draw = p.min_draw,
            "length gate"
        );
        return Err(FailReason::TooShort);
    }
    Ok(())
}

/// Hit rate of the drawing against the stroke and coverage of the stroke by
/// the drawing; both floors must hold.
pub(super) fn rates(
    drawn: &[Point],
    target: &Target<'_>,
    p: &AdaptiveParams,
    cfg: &JudgeCfg,
) -> Result<(), FailReason> {
    let hit = hit_rate(drawn, target.stroke, p.tol);
    let samples = sample_along_polyline(target.stroke, cfg.cover_samples);
    let cover = coverage_rate(&samples, drawn, p.cover_tol);
    if hit >= p.min_hit && cover >= p.min_cover {
        return Ok(());
    }
    tracing::debug!(
        hit,
        min_hit = p.min_hit,
        cover,
        min_cover = p.min_cover,
        "rate gates"
    );
    Err(FailReason::BadShape)
}
