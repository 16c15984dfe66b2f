//! Caller-owned failure streaks, one counter per stroke index.
//!
//! The engine only ever borrows a `FailStreak` immutably (Kid mode) and reads
//! it through `get`, which clamps to `MAX_RELAX_STREAK`. Mutation is the
//! caller's job, typically a practice session between attempts.

use crate::adaptive::MAX_RELAX_STREAK;

/// Stroke indices at or past this are never tracked.
pub const MAX_TRACKED_STROKES: usize = 1024;

/// Consecutive failures per stroke index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailStreak {
    counts: Vec<u32>,
}

impl FailStreak {
    /// Zeroed counters for a glyph with `strokes` strokes.
    pub fn new(strokes: usize) -> Self {
        Self {
            counts: vec![0; strokes],
        }
    }

    /// Relaxation level for `stroke`: its counter clamped to `[0, 3]`,
    /// zero for indices the mapping does not know.
    #[inline]
    pub fn get(&self, stroke: usize) -> u32 {
        self.counts
            .get(stroke)
            .copied()
            .unwrap_or(0)
            .min(MAX_RELAX_STREAK)
    }

    /// Raw (unclamped) counter, e.g. for hint texts.
    #[inline]
    pub fn raw(&self, stroke: usize) -> u32 {
        self.counts.get(stroke).copied().unwrap_or(0)
    }

    /// Count one more failure; grows the mapping when needed. Indices at or
    /// past `MAX_TRACKED_STROKES` are ignored.
    pub fn record_failure(&mut self, stroke: usize) {
        if stroke >= MAX_TRACKED_STROKES {
            return;
        }
        if stroke >= self.counts.len() {
            self.counts.resize(stroke + 1, 0);
        }
        self.counts[stroke] = self.counts[stroke].saturating_add(1);
    }

    /// Overwrite the counter of a known stroke; no-op outside the mapping.
    pub fn set(&mut self, stroke: usize, count: u32) {
        if let Some(c) = self.counts.get_mut(stroke) {
            *c = count;
        }
    }

    pub fn reset(&mut self, stroke: usize) {
        if let Some(c) = self.counts.get_mut(stroke) {
            *c = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl From<Vec<u32>> for FailStreak {
    fn from(counts: Vec<u32>) -> Self {
        Self { counts }
    }
}
