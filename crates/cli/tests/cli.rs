use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const PLUS: &str = r#"{"strokes": [
    [{"x": 10, "y": 50}, {"x": 90, "y": 50}],
    [{"x": 50, "y": 10}, {"x": 50, "y": 90}]
]}"#;

fn line_json(a: (f64, f64), b: (f64, f64), n: usize) -> String {
    let pts: Vec<String> = (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            format!(
                r#"{{"x": {}, "y": {}}}"#,
                a.0 + (b.0 - a.0) * t,
                a.1 + (b.1 - a.1) * t
            )
        })
        .collect();
    format!("[{}]", pts.join(","))
}

fn run(args: &[&str]) -> Value {
    let out = Command::new(env!("CARGO_BIN_EXE_tracejudge"))
        .args(args)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).unwrap()
}

fn path(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn judge_master_reports_wrong_order_and_writes_sidecar() {
    let dir = tempdir().unwrap();
    let glyph = dir.path().join("plus.json");
    let trace = dir.path().join("vertical.json");
    let out = dir.path().join("out").join("verdict.json");
    fs::write(&glyph, PLUS).unwrap();
    fs::write(&trace, line_json((50.0, 10.0), (50.0, 90.0), 30)).unwrap();

    let v = run(&[
        "judge",
        "--glyph",
        path(&glyph),
        "--trace",
        path(&trace),
        "--stroke",
        "0",
        "--mode",
        "master",
        "--out",
        path(&out),
    ]);
    assert_eq!(v["ok"], false);
    assert_eq!(v["reason"], "WRONG_ORDER");

    let written: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(written, v);
    let sidecar = dir.path().join("out").join("verdict.provenance.json");
    let prov: Value = serde_json::from_slice(&fs::read(sidecar).unwrap()).unwrap();
    assert_eq!(prov["params"]["stroke"], 0);
}

#[test]
fn session_replays_attempts_to_completion() {
    let dir = tempdir().unwrap();
    let glyph = dir.path().join("plus.json");
    let attempts = dir.path().join("attempts.json");
    fs::write(&glyph, PLUS).unwrap();
    let body = format!(
        "[{}, {}]",
        line_json((10.0, 50.0), (90.0, 50.0), 30),
        line_json((50.0, 10.0), (50.0, 90.0), 30)
    );
    fs::write(&attempts, body).unwrap();

    let v = run(&[
        "session",
        "--glyph",
        path(&glyph),
        "--attempts",
        path(&attempts),
        "--mode",
        "kid",
    ]);
    assert_eq!(v["completed"], true);
    assert_eq!(v["stats"]["success"], 2);
    assert_eq!(v["stats"]["combo_max"], 2);
}

#[test]
fn params_blend_long_stroke() {
    let v = run(&["params", "--length", "100"]);
    assert_eq!(v["blend"], 1.0);
    assert_eq!(v["params"]["start_tol"], 28.0);
}

#[test]
fn kid_judge_rejects_unknown_stroke_without_crashing() {
    let dir = tempdir().unwrap();
    let glyph = dir.path().join("plus.json");
    let trace = dir.path().join("bar.json");
    fs::write(&glyph, PLUS).unwrap();
    fs::write(&trace, line_json((10.0, 50.0), (90.0, 50.0), 30)).unwrap();

    for stroke in ["5", "18446744073709551615"] {
        let v = run(&[
            "judge",
            "--glyph",
            path(&glyph),
            "--trace",
            path(&trace),
            "--mode",
            "kid",
            "--streak",
            "2",
            "--stroke",
            stroke,
        ]);
        assert_eq!(v["ok"], false, "stroke {stroke}");
    }
}
