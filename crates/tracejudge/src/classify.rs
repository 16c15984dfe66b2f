//! Nearest-stroke classification ("which stroke did the learner trace?").
//!
//! Master mode uses the full per-point average so that a clean copy of stroke
//! `k` is attributed to `k` regardless of which stroke the UI expected; that
//! is the stroke-order check. The order-free path uses a cheaper subsampled
//! average and ignores degenerate strokes.

use crate::geom::{distance_point_to_polyline, mean_distance_to_polyline, Point, Polyline};

/// Best-matching stroke and its mean drawn-point distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeGuess {
    /// `None` when there were no strokes or no points.
    pub index: Option<usize>,
    /// `+∞` when `index` is `None`.
    pub avg_distance: f64,
}

impl StrokeGuess {
    const NONE: StrokeGuess = StrokeGuess {
        index: None,
        avg_distance: f64::INFINITY,
    };
}

/// Stroke minimizing the mean distance of every drawn point to it.
///
/// Ties go to the lowest index (strict `<`). Strokes with fewer than two
/// points score `+∞` and therefore never win.
pub fn guess_stroke_index(points: &[Point], strokes: &[Polyline]) -> StrokeGuess {
    if points.is_empty() {
        return StrokeGuess::NONE;
    }
    let mut best = StrokeGuess::NONE;
    for (i, stroke) in strokes.iter().enumerate() {
        let d = mean_distance_to_polyline(points, stroke);
        if d < best.avg_distance {
            best = StrokeGuess {
                index: Some(i),
                avg_distance: d,
            };
        }
    }
    best
}

/// Order-free variant: averages every `max(1, ⌊n / budget⌋)`-th drawn point.
///
/// Needs at least two drawn points; strokes with fewer than two points are
/// skipped.
pub fn guess_closest_stroke_subsampled(
    points: &[Point],
    strokes: &[Polyline],
    budget: usize,
) -> StrokeGuess {
    if points.len() < 2 {
        return StrokeGuess::NONE;
    }
    let step = (points.len() / budget.max(1)).max(1);
    let mut best = StrokeGuess::NONE;
    for (i, stroke) in strokes.iter().enumerate() {
        if stroke.len() < 2 {
            continue;
        }
        let (sum, cnt) = points
            .iter()
            .step_by(step)
            .fold((0.0, 0usize), |(s, c), &p| {
                (s + distance_point_to_polyline(p, stroke), c + 1)
            });
        let avg = sum / cnt as f64;
        if avg < best.avg_distance {
            best = StrokeGuess {
                index: Some(i),
                avg_distance: avg,
            };
        }
    }
    best
}
