//! Polyline geometry on the 0–100 drawing surface.
//!
//! Purpose
//! - Provide the measurement substrate for judging: distances, arclength,
//!   arclength walks, resampling and even sampling along a polyline.
//! - Every function is pure and total. Empty or short inputs degrade to
//!   sentinel values (`0.0`, `+∞`, an empty `Vec`, `None`), never a panic.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>` in normalized surface units; no unit
//!   conversion happens anywhere in the engine.
//! - Distances are plain Euclidean norms. Inputs are tens of points, so we
//!   never trade precision for squared-distance shortcuts.
//!
//! Code cross-refs: `crate::adaptive::compute_params`, `crate::classify`,
//! `crate::judge`.

mod measure;
mod resample;

pub use measure::{
    coverage_rate, distance, distance_point_to_polyline, distance_point_to_segment, hit_rate,
    mean_distance_to_polyline, polyline_length,
};
pub use resample::{
    normalize_drawn_points, point_at_distance, resample_polyline, sample_along_polyline,
};

use nalgebra::Vector2;

/// A point on the drawing surface.
pub type Point = Vector2<f64>;

/// Ordered points approximating one stroke (or one drawn trace).
pub type Polyline = Vec<Point>;

/// Shorthand constructor used throughout tests and callers.
#[inline]
pub fn pt(x: f64, y: f64) -> Point {
    Vector2::new(x, y)
}

#[cfg(test)]
mod tests;
