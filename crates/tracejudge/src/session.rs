//! Caller-side practice session over one glyph.
//!
//! Purpose
//! - Show (and test) how a host drives the engine: gate pointer-downs, judge
//!   each finished trace, advance the stroke index, and keep the failure
//!   streaks, mistake tally and run statistics that feed back into judging
//!   or into progress bookkeeping elsewhere.
//! - Owns only caller state. The engine functions it calls stay pure; the
//!   streak is lent to Kid judging by shared reference and updated here
//!   between attempts.
//!
//! Nothing is persisted.

use std::collections::BTreeMap;

use crate::adaptive::JudgeCfg;
use crate::geom::{distance, distance_point_to_polyline, Point, Polyline};
use crate::judge::{judge_kid, judge_master, judge_order_free, Attempt, FailReason, Verdict};
use crate::streak::FailStreak;

/// How strokes of the glyph are practised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SessionMode {
    /// Strokes in writing order, lenient judging with catch-up relaxation.
    Kid,
    /// Strokes in writing order, strict judging with typed reasons.
    Master,
    /// Strokes in any order, shape-only judging.
    OrderFree,
}

/// Pointer-down gate: where a new trace begins, or `None` if the press
/// should not start one.
///
/// - Kid: the press must be near the expected stroke (within
///   `start_tolerance` of its nearer endpoint and of the line); the trace
///   starts snapped onto that endpoint.
/// - Master: any stroke within `master_start_tolerance` will do, so the
///   stroke-order check can see a wrong stroke being traced. No snapping.
/// - Order-free: any stroke within `start_tolerance · begin_tol_factor`.
pub fn begin_trace(
    p0: Point,
    strokes: &[Polyline],
    expected: usize,
    mode: SessionMode,
    cfg: &JudgeCfg,
) -> Option<Point> {
    match mode {
        SessionMode::Kid => {
            let poly = strokes.get(expected)?;
            if poly.len() < 2 {
                return None;
            }
            let (head, tail) = (poly[0], poly[poly.len() - 1]);
            let (d_head, d_tail) = (distance(p0, head), distance(p0, tail));
            if d_head.min(d_tail) > cfg.start_tolerance
                || distance_point_to_polyline(p0, poly) > cfg.start_tolerance
            {
                return None;
            }
            Some(if d_head <= d_tail { head } else { tail })
        }
        SessionMode::Master => {
            near_any(p0, strokes, cfg.master_start_tolerance).then_some(p0)
        }
        SessionMode::OrderFree => {
            let radius = cfg.start_tolerance * cfg.order_free.begin_tol_factor;
            near_any(p0, strokes, radius).then_some(p0)
        }
    }
}

fn near_any(p: Point, strokes: &[Polyline], radius: f64) -> bool {
    strokes
        .iter()
        .map(|s| distance_point_to_polyline(p, s))
        .fold(f64::INFINITY, f64::min)
        <= radius
}

/// Master-mode failures counted per reason.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MistakeTally {
    counts: BTreeMap<FailReason, u32>,
}

impl MistakeTally {
    pub fn record(&mut self, reason: FailReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    pub fn get(&self, reason: FailReason) -> u32 {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FailReason, u32)> + '_ {
        self.counts.iter().map(|(&r, &c)| (r, c))
    }
}

/// Counters for one run through a glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    pub attempts: u32,
    pub success: u32,
    pub fail: u32,
    /// Successes that came after at least one failure on the same stroke.
    pub rescued: u32,
    pub combo: u32,
    pub combo_max: u32,
}

/// Result of submitting one finished trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttemptOutcome {
    pub verdict: Verdict,
    /// Stroke the attempt was judged against.
    pub solved: usize,
    /// Whether every stroke is now done.
    pub completed: bool,
}

/// Progress through the strokes of one glyph.
#[derive(Clone, Debug)]
pub struct TraceSession<'g> {
    strokes: &'g [Polyline],
    mode: SessionMode,
    current: usize,
    done: Vec<bool>,
    streak: FailStreak,
    tally: MistakeTally,
    stats: RunStats,
}

impl<'g> TraceSession<'g> {
    pub fn new(strokes: &'g [Polyline], mode: SessionMode) -> Self {
        Self {
            strokes,
            mode,
            current: 0,
            done: vec![false; strokes.len()],
            streak: FailStreak::new(strokes.len()),
            tally: MistakeTally::default(),
            stats: RunStats::default(),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Stroke the next attempt is judged against (order-free: the first
    /// stroke not yet done, used as the fallback guess).
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_complete(&self) -> bool {
        self.done.iter().all(|&d| d)
    }

    pub fn done(&self) -> &[bool] {
        &self.done
    }

    pub fn streak(&self) -> &FailStreak {
        &self.streak
    }

    pub fn tally(&self) -> &MistakeTally {
        &self.tally
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Pointer-down gate for the current state; see [`begin_trace`].
    pub fn begin(&self, p0: Point, cfg: &JudgeCfg) -> Option<Point> {
        if self.is_complete() {
            return None;
        }
        begin_trace(p0, self.strokes, self.current, self.mode, cfg)
    }

    /// Judge one finished trace and update progress. `None` once the glyph
    /// is complete.
    pub fn submit(&mut self, points: &[Point], cfg: &JudgeCfg) -> Option<AttemptOutcome> {
        if self.is_complete() {
            return None;
        }
        let attempt = Attempt::new(points, self.strokes, self.current);
        let (verdict, solved) = match self.mode {
            SessionMode::Kid => (judge_kid(&attempt, Some(&self.streak), cfg), self.current),
            SessionMode::Master => (judge_master(&attempt, cfg), self.current),
            SessionMode::OrderFree => {
                let out = judge_order_free(points, self.strokes, self.current, cfg);
                (out.verdict, out.solved)
            }
        };

        self.stats.attempts += 1;
        if verdict.ok {
            self.on_success(solved);
        } else {
            self.on_failure(verdict);
        }
        tracing::debug!(
            ok = verdict.ok,
            reason = ?verdict.reason,
            solved,
            next = self.current,
            "attempt"
        );
        Some(AttemptOutcome {
            verdict,
            solved,
            completed: self.is_complete(),
        })
    }

    fn on_success(&mut self, solved: usize) {
        self.stats.success += 1;
        if self.streak.raw(self.current) > 0 {
            self.stats.rescued += 1;
        }
        self.stats.combo += 1;
        self.stats.combo_max = self.stats.combo_max.max(self.stats.combo);
        if let Some(d) = self.done.get_mut(solved) {
            *d = true;
        }
        self.streak.reset(solved);
        self.current = match self.mode {
            SessionMode::OrderFree => self
                .done
                .iter()
                .position(|&d| !d)
                .unwrap_or(self.done.len()),
            SessionMode::Kid | SessionMode::Master => self.current + 1,
        };
    }

    fn on_failure(&mut self, verdict: Verdict) {
        self.stats.fail += 1;
        self.stats.combo = 0;
        self.streak.record_failure(self.current);
        if self.mode == SessionMode::Master {
            if let Some(reason) = verdict.reason {
                self.tally.record(reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::pt;

    fn line(a: Point, b: Point, n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| a + (b - a) * (i as f64 / (n - 1) as f64))
            .collect()
    }

    fn two_bars() -> Vec<Polyline> {
        vec![
            line(pt(10.0, 30.0), pt(90.0, 30.0), 20),
            line(pt(10.0, 70.0), pt(90.0, 70.0), 20),
        ]
    }

    #[test]
    fn kid_gate_snaps_to_nearer_endpoint() {
        let cfg = JudgeCfg::default();
        let strokes = two_bars();
        let start = begin_trace(pt(14.0, 33.0), &strokes, 0, SessionMode::Kid, &cfg);
        assert_eq!(start, Some(pt(10.0, 30.0)));
        let reverse = begin_trace(pt(88.0, 31.0), &strokes, 0, SessionMode::Kid, &cfg);
        assert_eq!(reverse, Some(pt(90.0, 30.0)));
        // On the line but far from both ends.
        assert_eq!(
            begin_trace(pt(50.0, 30.0), &strokes, 0, SessionMode::Kid, &cfg),
            None
        );
        assert_eq!(
            begin_trace(pt(10.0, 30.0), &strokes, 5, SessionMode::Kid, &cfg),
            None
        );
    }

    #[test]
    fn master_and_order_free_gates_accept_any_stroke() {
        let cfg = JudgeCfg::default();
        let strokes = two_bars();
        let p = pt(50.0, 72.0);
        assert_eq!(begin_trace(p, &strokes, 0, SessionMode::Master, &cfg), Some(p));
        let far = pt(50.0, 100.0);
        assert_eq!(begin_trace(far, &strokes, 0, SessionMode::Master, &cfg), None);
        // 30 away from the lower bar: outside 26, inside 34 · 2.2.
        assert_eq!(
            begin_trace(far, &strokes, 0, SessionMode::OrderFree, &cfg),
            Some(far)
        );
        assert_eq!(begin_trace(p, &[], 0, SessionMode::Master, &cfg), None);
    }

    #[test]
    fn kid_session_relaxes_then_completes() {
        let cfg = JudgeCfg::default();
        let strokes = two_bars();
        let mut s = TraceSession::new(&strokes, SessionMode::Kid);

        // Starts 30 before the first bar: outside start_tol (28 for long strokes).
        let early = line(pt(-20.0, 30.0), pt(90.0, 30.0), 40);
        let out = s.submit(&early, &cfg).unwrap();
        assert!(!out.verdict.ok);
        assert_eq!(out.verdict.reason, None);
        assert_eq!(s.streak().get(0), 1);

        // One failure widens start_tol to 31.
        let out = s.submit(&early, &cfg).unwrap();
        assert!(out.verdict.ok);
        assert_eq!(s.current(), 1);
        assert_eq!(s.streak().get(0), 0);

        let second = line(pt(10.0, 70.0), pt(90.0, 70.0), 30);
        let out = s.submit(&second, &cfg).unwrap();
        assert!(out.completed);
        assert!(s.submit(&second, &cfg).is_none());
        assert!(s.begin(pt(10.0, 70.0), &cfg).is_none());

        let stats = s.stats();
        assert_eq!(
            (stats.attempts, stats.success, stats.fail, stats.rescued),
            (3, 2, 1, 1)
        );
        assert_eq!(stats.combo_max, 2);
        assert_eq!(s.tally().total(), 0);
    }

    #[test]
    fn master_session_tallies_reasons() {
        let cfg = JudgeCfg::default();
        let strokes = two_bars();
        let mut s = TraceSession::new(&strokes, SessionMode::Master);

        let lower = line(pt(10.0, 70.0), pt(90.0, 70.0), 30);
        let out = s.submit(&lower, &cfg).unwrap();
        assert_eq!(out.verdict, Verdict::fail(FailReason::WrongOrder));
        assert_eq!(s.current(), 0);

        let stub = [pt(10.0, 30.0), pt(11.0, 30.0)];
        let out = s.submit(&stub, &cfg).unwrap();
        assert_eq!(out.verdict, Verdict::fail(FailReason::TooShort));

        assert_eq!(s.tally().get(FailReason::WrongOrder), 1);
        assert_eq!(s.tally().get(FailReason::TooShort), 1);
        assert_eq!(s.tally().total(), 2);
        let listed: Vec<_> = s.tally().iter().collect();
        assert_eq!(
            listed,
            [(FailReason::WrongOrder, 1), (FailReason::TooShort, 1)]
        );
        assert_eq!(s.stats().combo, 0);
        // Master never relaxes, but the caller still keeps the streak.
        assert_eq!(s.streak().raw(0), 2);
    }

    #[test]
    fn order_free_session_accepts_any_order() {
        let cfg = JudgeCfg::default();
        let strokes = two_bars();
        let mut s = TraceSession::new(&strokes, SessionMode::OrderFree);

        let lower = line(pt(12.0, 71.0), pt(88.0, 69.0), 20);
        let out = s.submit(&lower, &cfg).unwrap();
        assert!(out.verdict.ok);
        assert_eq!(out.solved, 1);
        assert_eq!(s.done(), &[false, true]);
        assert_eq!(s.current(), 0);

        let upper = line(pt(88.0, 29.0), pt(12.0, 31.0), 20);
        let out = s.submit(&upper, &cfg).unwrap();
        assert_eq!(out.solved, 0);
        assert!(out.completed);
    }
}
