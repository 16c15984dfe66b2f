use super::Point;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a - b).norm()
}

/// Sum of consecutive segment lengths; `0.0` for fewer than two points.
pub fn polyline_length(poly: &[Point]) -> f64 {
    poly.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Distance from `p` to the closed segment `[a, b]`.
///
/// Outside the segment's projection the nearer endpoint wins. A degenerate
/// segment (`a == b`) reduces to the distance to `a`.
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let v = b - a;
    let w = p - a;
    let c1 = v.dot(&w);
    if c1 <= 0.0 {
        return distance(p, a);
    }
    let c2 = v.dot(&v);
    if c2 <= c1 {
        return distance(p, b);
    }
    let foot = a + v * (c1 / c2);
    distance(p, foot)
}

/// Minimum distance from `p` to any segment of `poly`; `+∞` below two points.
pub fn distance_point_to_polyline(p: Point, poly: &[Point]) -> f64 {
    poly.windows(2)
        .map(|w| distance_point_to_segment(p, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Mean of `distance_point_to_polyline` over every point; `+∞` without points.
pub fn mean_distance_to_polyline(points: &[Point], poly: &[Point]) -> f64 {
    if points.is_empty() {
        return f64::INFINITY;
    }
    let sum: f64 = points
        .iter()
        .map(|&p| distance_point_to_polyline(p, poly))
        .sum();
    sum / points.len() as f64
}

/// Fraction of `points` lying within `tol` of `poly`.
pub fn hit_rate(points: &[Point], poly: &[Point], tol: f64) -> f64 {
    fraction_within(points, poly, tol)
}

/// Fraction of target `samples` lying within `tol` of the `drawn` polyline.
///
/// Same measurement as [`hit_rate`] with the roles swapped: the target is
/// probed against the drawing, so a partial retrace scores low.
pub fn coverage_rate(samples: &[Point], drawn: &[Point], tol: f64) -> f64 {
    fraction_within(samples, drawn, tol)
}

fn fraction_within(points: &[Point], poly: &[Point], tol: f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let hits = points
        .iter()
        .filter(|&&p| distance_point_to_polyline(p, poly) <= tol)
        .count();
    hits as f64 / points.len() as f64
}
