mod io;
mod provenance;

use anyhow::{ensure, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracejudge::api::{
    compute_params, draw_trace, judge_kid, judge_master, judge_order_free, length_blend, pt,
    Attempt, FailReason, FailStreak, JudgeCfg, MistakeTally, SessionMode, TraceCfg, TraceReplay,
    TraceSession, Verdict, MAX_RELAX_STREAK,
};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use crate::io::Xy;
use crate::provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "tracejudge")]
#[command(about = "Judge stroke traces against glyph references")]
struct Cmd {
    /// JSON file overriding judge configuration fields
    #[arg(long, global = true)]
    cfg: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Kid,
    Master,
    Free,
}

impl From<ModeArg> for SessionMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Kid => SessionMode::Kid,
            ModeArg::Master => SessionMode::Master,
            ModeArg::Free => SessionMode::OrderFree,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Judge one trace against one stroke of a glyph
    Judge {
        #[arg(long)]
        glyph: PathBuf,
        #[arg(long)]
        trace: PathBuf,
        /// Expected stroke index (order-free: fallback guess)
        #[arg(long, default_value_t = 0)]
        stroke: usize,
        #[arg(long, value_enum, default_value_t = ModeArg::Master)]
        mode: ModeArg,
        /// Consecutive failures on this stroke (Kid only)
        #[arg(long, default_value_t = 0)]
        streak: u32,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the adaptive thresholds for a stroke length
    Params {
        #[arg(long)]
        length: f64,
        #[arg(long, default_value_t = 0)]
        streak: u32,
    },
    /// Replay a list of traces through a practice session
    Session {
        #[arg(long)]
        glyph: PathBuf,
        #[arg(long)]
        attempts: PathBuf,
        #[arg(long, value_enum, default_value_t = ModeArg::Kid)]
        mode: ModeArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Pass rates of synthetic traces of one stroke, per mode and streak
    Calibrate {
        #[arg(long)]
        glyph: PathBuf,
        #[arg(long, default_value_t = 0)]
        stroke: usize,
        #[arg(long, default_value_t = 2.0)]
        jitter: f64,
        #[arg(long, default_value_t = 0.0)]
        dx: f64,
        #[arg(long, default_value_t = 0.0)]
        dy: f64,
        #[arg(long, default_value_t = 1.0)]
        coverage: f64,
        #[arg(long, default_value_t = 40)]
        samples: usize,
        #[arg(long, default_value_t = 200)]
        trials: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print version and provenance JSON
    Report,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let cfg = io::load_cfg(cmd.cfg.as_deref())?;
    match cmd.action {
        Action::Judge {
            glyph,
            trace,
            stroke,
            mode,
            streak,
            out,
        } => judge(&cfg, &glyph, &trace, stroke, mode, streak, out.as_deref()),
        Action::Params { length, streak } => params(&cfg, length, streak),
        Action::Session {
            glyph,
            attempts,
            mode,
            out,
        } => session(&cfg, &glyph, &attempts, mode, out.as_deref()),
        Action::Calibrate {
            glyph,
            stroke,
            jitter,
            dx,
            dy,
            coverage,
            samples,
            trials,
            seed,
            out,
        } => {
            let trace_cfg = TraceCfg {
                samples,
                jitter,
                offset: pt(dx, dy),
                coverage,
            };
            calibrate(&cfg, &glyph, stroke, trace_cfg, trials, seed, out.as_deref())
        }
        Action::Report => report(),
    }
}

/// Print `result`; with `out`, also write it there plus a provenance sidecar.
#[track_caller]
fn emit(result: &Value, out: Option<&Path>, payload: Payload) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    if let Some(out) = out {
        io::write_json(out, result)?;
        let sidecar = write_sidecar(out, payload)?;
        tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote result");
    }
    Ok(())
}

fn verdict_json(v: Verdict) -> Value {
    json!({
        "ok": v.ok,
        "reason": v.reason,
        "label": v.reason.map(FailReason::label),
    })
}

fn judge(
    cfg: &JudgeCfg,
    glyph: &Path,
    trace: &Path,
    stroke: usize,
    mode: ModeArg,
    streak: u32,
    out: Option<&Path>,
) -> Result<()> {
    let strokes = io::load_glyph(glyph)?;
    let points = io::load_trace(trace)?;
    tracing::info!(strokes = strokes.len(), points = points.len(), stroke, ?mode, "judge");

    let attempt = Attempt::new(&points, &strokes, stroke);
    let (verdict, solved) = match mode {
        ModeArg::Kid => {
            // An unknown stroke keeps a zero streak; the judge rejects it anyway.
            let mut failures = FailStreak::new(strokes.len());
            failures.set(stroke, streak);
            (judge_kid(&attempt, Some(&failures), cfg), stroke)
        }
        ModeArg::Master => (judge_master(&attempt, cfg), stroke),
        ModeArg::Free => {
            let o = judge_order_free(&points, &strokes, stroke, cfg);
            (o.verdict, o.solved)
        }
    };
    let mode = SessionMode::from(mode);
    let mut result = verdict_json(verdict);
    result["stroke"] = json!(solved);
    result["mode"] = json!(mode);

    let payload = Payload::new(json!({"mode": mode, "stroke": stroke, "streak": streak}))
        .with_input(glyph)
        .with_input(trace);
    emit(&result, out, payload)
}

fn params(cfg: &JudgeCfg, length: f64, streak: u32) -> Result<()> {
    ensure!(length.is_finite() && length >= 0.0, "length must be finite and >= 0");
    let base = compute_params(length, cfg);
    let result = json!({
        "length": length,
        "blend": length_blend(length, cfg),
        "streak": streak.min(MAX_RELAX_STREAK),
        "params": base.relaxed(streak),
        "unrelaxed": base,
    });
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn session(
    cfg: &JudgeCfg,
    glyph: &Path,
    attempts: &Path,
    mode: ModeArg,
    out: Option<&Path>,
) -> Result<()> {
    let strokes = io::load_glyph(glyph)?;
    let traces = io::load_attempts(attempts)?;
    let mut run = TraceSession::new(&strokes, mode.into());

    let mut log = Vec::with_capacity(traces.len());
    for (i, trace) in traces.iter().enumerate() {
        if run.is_complete() {
            tracing::warn!(remaining = traces.len() - i, "glyph complete; ignoring the rest");
            break;
        }
        let Some((&p0, rest)) = trace.split_first() else {
            log.push(json!({"attempt": i, "started": false}));
            continue;
        };
        let Some(start) = run.begin(p0, cfg) else {
            log.push(json!({"attempt": i, "started": false, "expected": run.current()}));
            continue;
        };
        let points: Vec<_> = std::iter::once(start).chain(rest.iter().copied()).collect();
        let expected = run.current();
        if let Some(outcome) = run.submit(&points, cfg) {
            let mut entry = verdict_json(outcome.verdict);
            entry["attempt"] = json!(i);
            entry["started"] = json!(true);
            entry["start"] = json!(Xy::from(start));
            entry["expected"] = json!(expected);
            entry["solved"] = json!(outcome.solved);
            log.push(entry);
        }
    }

    let result = json!({
        "mode": run.mode(),
        "completed": run.is_complete(),
        "done": run.done(),
        "stats": run.stats(),
        "streak": run.streak(),
        "mistakes": run.tally(),
        "attempts": log,
    });
    let payload = Payload::new(json!({"mode": run.mode()}))
        .with_input(glyph)
        .with_input(attempts);
    emit(&result, out, payload)
}

fn calibrate(
    cfg: &JudgeCfg,
    glyph: &Path,
    stroke: usize,
    trace_cfg: TraceCfg,
    trials: u64,
    seed: u64,
    out: Option<&Path>,
) -> Result<()> {
    let strokes = io::load_glyph(glyph)?;
    ensure!(
        stroke < strokes.len(),
        "stroke {stroke} out of range (glyph has {})",
        strokes.len()
    );
    ensure!(trials > 0, "trials must be at least 1");
    tracing::info!(stroke, trials, seed, jitter = trace_cfg.jitter, "calibrate");

    let n_streaks = MAX_RELAX_STREAK as usize + 1;
    let mut kid_pass = vec![0u64; n_streaks];
    let mut master_pass = 0u64;
    let mut free_pass = 0u64;
    let mut mistakes = MistakeTally::default();
    let mut failures = FailStreak::new(strokes.len());
    for i in 0..trials {
        let trace = draw_trace(&strokes[stroke], &trace_cfg, TraceReplay::new(seed, i));
        let attempt = Attempt::new(&trace, &strokes, stroke);
        for (s, pass) in kid_pass.iter_mut().enumerate() {
            failures.set(stroke, s as u32);
            if judge_kid(&attempt, Some(&failures), cfg).ok {
                *pass += 1;
            }
        }
        match judge_master(&attempt, cfg).reason {
            None => master_pass += 1,
            Some(reason) => mistakes.record(reason),
        }
        let free = judge_order_free(&trace, &strokes, stroke, cfg);
        if free.verdict.ok && free.solved == stroke {
            free_pass += 1;
        }
    }

    let rate = |n: u64| n as f64 / trials as f64;
    let mistake_rates: serde_json::Map<String, Value> = mistakes
        .iter()
        .map(|(reason, n)| (reason.as_str().to_string(), json!(rate(u64::from(n)))))
        .collect();
    let result = json!({
        "stroke": stroke,
        "trials": trials,
        "kid_pass_rate": kid_pass.iter().map(|&n| rate(n)).collect::<Vec<_>>(),
        "master_pass_rate": rate(master_pass),
        "order_free_pass_rate": rate(free_pass),
        "master_mistakes": mistakes,
        "master_mistake_rates": mistake_rates,
    });
    let payload = Payload::new(json!({
        "stroke": stroke,
        "trials": trials,
        "seed": seed,
        "samples": trace_cfg.samples,
        "jitter": trace_cfg.jitter,
        "offset": Xy::from(trace_cfg.offset),
        "coverage": trace_cfg.coverage,
    }))
    .with_input(glyph);
    emit(&result, out, payload)
}

fn report() -> Result<()> {
    let obj = json!({
        "engine_version": tracejudge::VERSION,
        "code_rev": provenance::current_git_rev(),
        "defaults": JudgeCfg::default(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
