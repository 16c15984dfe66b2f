//! Arclength walks: point lookup, fixed-step resampling, even sampling.

use super::measure::{distance, polyline_length};
use super::{Point, Polyline};

/// Last-sample slack before the true endpoint is appended by `resample_polyline`.
const TAIL_EPS: f64 = 0.01;

/// Point reached after walking arclength `d` from the start of `poly`.
///
/// `d` is clamped to `[0, len]`. A single-point polyline yields that point;
/// `None` only for an empty polyline.
pub fn point_at_distance(poly: &[Point], d: f64) -> Option<Point> {
    if poly.is_empty() {
        return None;
    }
    Some(walk(poly, d))
}

// Caller guarantees `poly` is non-empty.
fn walk(poly: &[Point], d: f64) -> Point {
    let d = d.max(0.0);
    let mut acc = 0.0;
    for w in poly.windows(2) {
        let (a, b) = (w[0], w[1]);
        let seg = distance(a, b);
        if acc + seg >= d {
            let t = if seg == 0.0 { 0.0 } else { (d - acc) / seg };
            return a + (b - a) * t;
        }
        acc += seg;
    }
    poly[poly.len() - 1]
}

/// Resample `poly` at arclength `0, step, 2·step, … ≤ len`.
///
/// The true last point is appended when the final sample falls more than
/// `0.01` short of it, so the tail is never truncated. Zero-length input or a
/// step that is not a positive finite number returns a copy.
pub fn resample_polyline(poly: &[Point], step: f64) -> Polyline {
    let len = polyline_length(poly);
    if len <= 0.0 || !(step.is_finite() && step > 0.0) {
        return poly.to_vec();
    }
    let mut out = Vec::with_capacity((len / step) as usize + 2);
    let mut d = 0.0;
    while d <= len {
        out.push(walk(poly, d));
        d += step;
    }
    let last = poly[poly.len() - 1];
    if out.last().map_or(true, |&prev| distance(prev, last) > TAIL_EPS) {
        out.push(last);
    }
    out
}

/// `n` points evenly spaced by arclength over `[0, len]`, both ends included.
///
/// `n <= 1` yields the arclength midpoint; a zero-length polyline yields its
/// first point.
pub fn sample_along_polyline(poly: &[Point], n: usize) -> Vec<Point> {
    if poly.is_empty() {
        return Vec::new();
    }
    let len = polyline_length(poly);
    if len <= 0.0 {
        return vec![poly[0]];
    }
    if n <= 1 {
        return vec![walk(poly, len * 0.5)];
    }
    let last = (n - 1) as f64;
    (0..n).map(|i| walk(poly, len * i as f64 / last)).collect()
}

/// Jitter removal plus density normalization for a raw drawn trace.
///
/// Points closer than `min_move` to the previously kept point are dropped;
/// if at least two points survive they are resampled at `step`.
pub fn normalize_drawn_points(points: &[Point], step: f64, min_move: f64) -> Polyline {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut compact: Polyline = Vec::with_capacity(points.len());
    compact.push(first);
    for &p in &points[1..] {
        let prev = compact[compact.len() - 1];
        if distance(prev, p) >= min_move {
            compact.push(p);
        }
    }
    if compact.len() < 2 {
        return compact;
    }
    resample_polyline(&compact, step)
}
