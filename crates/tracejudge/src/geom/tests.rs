use super::*;

fn close(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

#[test]
fn distance_and_length_basics() {
    assert!(close(distance(pt(0.0, 0.0), pt(3.0, 4.0)), 5.0, 1e-12));
    assert_eq!(polyline_length(&[]), 0.0);
    assert_eq!(polyline_length(&[pt(4.0, 4.0)]), 0.0);
    let l_shape = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)];
    assert!(close(polyline_length(&l_shape), 20.0, 1e-12));
}

#[test]
fn segment_distance_clamps_to_endpoints() {
    let a = pt(0.0, 0.0);
    let b = pt(10.0, 0.0);
    // Perpendicular foot inside the segment.
    assert!(close(distance_point_to_segment(pt(4.0, 3.0), a, b), 3.0, 1e-12));
    // Beyond either end the nearer endpoint wins.
    assert!(close(distance_point_to_segment(pt(-3.0, 4.0), a, b), 5.0, 1e-12));
    assert!(close(distance_point_to_segment(pt(13.0, 4.0), a, b), 5.0, 1e-12));
    // Degenerate segment.
    assert!(close(distance_point_to_segment(pt(3.0, 4.0), a, a), 5.0, 1e-12));
}

#[test]
fn polyline_distance_is_min_over_segments() {
    let l_shape = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)];
    assert!(close(distance_point_to_polyline(pt(12.0, 5.0), &l_shape), 2.0, 1e-12));
    assert!(close(distance_point_to_polyline(pt(5.0, 1.0), &l_shape), 1.0, 1e-12));
    assert!(distance_point_to_polyline(pt(0.0, 0.0), &[pt(0.0, 0.0)]).is_infinite());
    assert!(distance_point_to_polyline(pt(0.0, 0.0), &[]).is_infinite());
}

#[test]
fn mean_distance_and_rates() {
    let line = [pt(0.0, 0.0), pt(100.0, 0.0)];
    let pts = [pt(10.0, 1.0), pt(20.0, 3.0), pt(30.0, 30.0)];
    assert!(close(mean_distance_to_polyline(&pts, &line), 34.0 / 3.0, 1e-12));
    assert!(mean_distance_to_polyline(&[], &line).is_infinite());
    assert!(close(hit_rate(&pts, &line, 3.0), 2.0 / 3.0, 1e-12));
    assert_eq!(hit_rate(&[], &line, 3.0), 0.0);
    // Coverage probes the target against the drawing.
    let drawn = [pt(0.0, 0.0), pt(50.0, 0.0)];
    let samples = sample_along_polyline(&line, 5);
    assert!(close(coverage_rate(&samples, &drawn, 1.0), 3.0 / 5.0, 1e-12));
}

#[test]
fn point_at_distance_walks_and_clamps() {
    let l_shape = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)];
    let mid = point_at_distance(&l_shape, 15.0).unwrap();
    assert!((mid - pt(10.0, 5.0)).norm() < 1e-12);
    let before = point_at_distance(&l_shape, -4.0).unwrap();
    assert!((before - pt(0.0, 0.0)).norm() < 1e-12);
    let after = point_at_distance(&l_shape, 99.0).unwrap();
    assert!((after - pt(10.0, 10.0)).norm() < 1e-12);
    let single = point_at_distance(&[pt(7.0, 8.0)], 3.0).unwrap();
    assert!((single - pt(7.0, 8.0)).norm() < 1e-12);
    assert!(point_at_distance(&[], 1.0).is_none());
}

#[test]
fn resample_keeps_tail_and_length_on_straight_lines() {
    let line = [pt(0.0, 0.0), pt(10.0, 0.0)];
    let r = resample_polyline(&line, 1.2);
    // 0, 1.2, …, 9.6 plus the true endpoint.
    assert_eq!(r.len(), 10);
    assert!((r[r.len() - 1] - pt(10.0, 0.0)).norm() < 1e-12);
    assert!(close(polyline_length(&r), 10.0, 1e-9));
    for w in r.windows(2).take(8) {
        assert!(close(distance(w[0], w[1]), 1.2, 1e-9));
    }
}

#[test]
fn resample_degenerate_inputs_copy() {
    let dot = [pt(3.0, 3.0), pt(3.0, 3.0)];
    assert_eq!(resample_polyline(&dot, 1.2), dot.to_vec());
    let line = [pt(0.0, 0.0), pt(10.0, 0.0)];
    assert_eq!(resample_polyline(&line, 0.0), line.to_vec());
    assert_eq!(resample_polyline(&line, f64::NAN), line.to_vec());
    assert!(resample_polyline(&[], 1.0).is_empty());
}

#[test]
fn resample_twice_preserves_length_around_corners() {
    let l_shape = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)];
    let once = resample_polyline(&l_shape, 1.2);
    let twice = resample_polyline(&once, 1.2);
    let (l1, l2) = (polyline_length(&once), polyline_length(&twice));
    assert!(l1 <= 20.0 + 1e-9);
    assert!((l1 - l2).abs() / l1 < 0.01, "l1={l1} l2={l2}");
}

#[test]
fn sample_along_endpoints_and_midpoint() {
    let line = [pt(0.0, 0.0), pt(100.0, 0.0)];
    let s = sample_along_polyline(&line, 5);
    let xs: Vec<f64> = s.iter().map(|p| p.x).collect();
    for (x, want) in xs.iter().zip([0.0, 25.0, 50.0, 75.0, 100.0]) {
        assert!(close(*x, want, 1e-9));
    }
    let hook = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 90.0)];
    for n in [0, 1] {
        let m = sample_along_polyline(&hook, n);
        assert_eq!(m.len(), 1);
        assert!((m[0] - pt(10.0, 40.0)).norm() < 1e-9);
    }
    let dot = [pt(2.0, 2.0), pt(2.0, 2.0)];
    assert_eq!(sample_along_polyline(&dot, 32), vec![pt(2.0, 2.0)]);
}

#[test]
fn normalize_drops_jitter_then_resamples() {
    let raw = [pt(0.0, 0.0), pt(0.1, 0.0), pt(0.2, 0.1), pt(5.0, 0.0)];
    let dp = normalize_drawn_points(&raw, 1.2, 0.35);
    assert_eq!(dp.len(), 6);
    assert!((dp[0] - pt(0.0, 0.0)).norm() < 1e-12);
    assert!((dp[5] - pt(5.0, 0.0)).norm() < 1e-12);

    let shaky = [pt(1.0, 1.0), pt(1.1, 1.0), pt(1.0, 1.2)];
    assert_eq!(normalize_drawn_points(&shaky, 1.2, 0.35), vec![pt(1.0, 1.0)]);
    assert!(normalize_drawn_points(&[], 1.2, 0.35).is_empty());
}
