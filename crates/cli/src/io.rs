//! JSON inputs and outputs of the CLI.
//!
//! Points travel as `{"x": .., "y": ..}` objects. A glyph file holds
//! `{"strokes": [[point, ..], ..]}` in writing order; a trace file is a bare
//! array of points; an attempts file is an array of traces.

use anyhow::{ensure, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracejudge::{JudgeCfg, Point, Polyline};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Xy {
    pub x: f64,
    pub y: f64,
}

impl From<Xy> for Point {
    fn from(p: Xy) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for Xy {
    fn from(p: Point) -> Self {
        Xy { x: p.x, y: p.y }
    }
}

#[derive(Debug, Deserialize)]
struct GlyphFile {
    strokes: Vec<Vec<Xy>>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn to_points(xs: Vec<Xy>) -> Vec<Point> {
    xs.into_iter().map(Point::from).collect()
}

pub fn load_glyph(path: &Path) -> Result<Vec<Polyline>> {
    let glyph: GlyphFile = read_json(path)?;
    ensure!(!glyph.strokes.is_empty(), "{}: glyph has no strokes", path.display());
    Ok(glyph.strokes.into_iter().map(to_points).collect())
}

pub fn load_trace(path: &Path) -> Result<Vec<Point>> {
    Ok(to_points(read_json(path)?))
}

pub fn load_attempts(path: &Path) -> Result<Vec<Vec<Point>>> {
    let traces: Vec<Vec<Xy>> = read_json(path)?;
    Ok(traces.into_iter().map(to_points).collect())
}

/// Defaults, overlaid with the fields present in `path`, then validated.
pub fn load_cfg(path: Option<&Path>) -> Result<JudgeCfg> {
    let cfg = match path {
        Some(p) => read_json(p)?,
        None => JudgeCfg::default(),
    };
    cfg.validate().context("invalid judge configuration")?;
    Ok(cfg)
}

/// Pretty-print `value` to `out`, creating parent directories.
pub fn write_json(out: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn glyph_and_trace_parse() {
        let dir = tempdir().unwrap();
        let glyph = dir.path().join("glyph.json");
        fs::write(
            &glyph,
            r#"{"strokes": [[{"x": 0, "y": 0}, {"x": 10, "y": 0}], [{"x": 5, "y": -5}, {"x": 5, "y": 5}]]}"#,
        )
        .unwrap();
        let strokes = load_glyph(&glyph).unwrap();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[1][1], Point::new(5.0, 5.0));

        let trace = dir.path().join("trace.json");
        fs::write(&trace, r#"[{"x": 1.5, "y": 2}]"#).unwrap();
        assert_eq!(load_trace(&trace).unwrap(), vec![Point::new(1.5, 2.0)]);
    }

    #[test]
    fn empty_glyph_is_rejected() {
        let dir = tempdir().unwrap();
        let glyph = dir.path().join("empty.json");
        fs::write(&glyph, r#"{"strokes": []}"#).unwrap();
        assert!(load_glyph(&glyph).is_err());
    }

    #[test]
    fn partial_cfg_overlays_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{"tolerance": 18.0}"#).unwrap();
        let cfg = load_cfg(Some(&path)).unwrap();
        assert_eq!(cfg.tolerance, 18.0);
        assert_eq!(cfg.start_tolerance, JudgeCfg::default().start_tolerance);

        fs::write(&path, r#"{"min_hit_rate": 1.5}"#).unwrap();
        assert!(load_cfg(Some(&path)).is_err());
    }
}
