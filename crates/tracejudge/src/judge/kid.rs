use super::{gates, Attempt, FailReason, Verdict};
use crate::adaptive::{compute_params, JudgeCfg};
use crate::streak::FailStreak;

/// Lenient judgment: pass/fail only, thresholds loosened by the caller's
/// failure streak on the expected stroke (when one is supplied).
pub fn judge_kid(attempt: &Attempt<'_>, streak: Option<&FailStreak>, cfg: &JudgeCfg) -> Verdict {
    match kid_gates(attempt, streak, cfg) {
        Ok(()) => Verdict::PASS,
        Err(gate) => {
            tracing::debug!(stroke = attempt.expected, %gate, "kid: attempt rejected");
            Verdict::FAIL
        }
    }
}

fn kid_gates(
    attempt: &Attempt<'_>,
    streak: Option<&FailStreak>,
    cfg: &JudgeCfg,
) -> Result<(), FailReason> {
    let target = gates::target(attempt, cfg)?;
    let drawn = gates::normalized(attempt.points, cfg)?;
    let mut params = compute_params(target.len, cfg);
    if let Some(streak) = streak {
        params = params.relaxed(streak.get(attempt.expected));
    }
    gates::start(&drawn, &target, &params)?;
    gates::length(&drawn, &target, &params)?;
    gates::rates(&drawn, &target, &params, cfg)
}
