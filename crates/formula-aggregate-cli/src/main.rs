use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use formula_aggregate::{
    parse_snapshots, DisabledColumnSet, DisabledColumnsCache, DragRejected, MeasureArea,
};
use serde::Serialize;

#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(about = "Replay aggregate editor snapshots and report which columns are disabled.")]
struct Args {
    /// Snapshot JSON: one snapshot object or an array of them. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Check whether a column may be dragged after the last snapshot (repeatable).
    ///
    /// Exits with status 1 if any checked column is rejected.
    #[arg(long = "check-drag", value_name = "COLUMN")]
    check_drag: Vec<String>,
}

struct Step {
    recomputed: bool,
    measure_area: MeasureArea,
    disabled: Arc<DisabledColumnSet>,
}

struct DragCheck {
    column: String,
    verdict: Result<(), DragRejected>,
}

#[derive(Debug, Serialize)]
struct JsonDisabled<'a> {
    column: &'a str,
    reason: String,
}

#[derive(Debug, Serialize)]
struct JsonStep<'a> {
    index: usize,
    recomputed: bool,
    measure_area: &'static str,
    disabled: Vec<JsonDisabled<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonCheck<'a> {
    column: &'a str,
    allowed: bool,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    steps: Vec<JsonStep<'a>>,
    checks: Vec<JsonCheck<'a>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(code) => std::process::exit(code),
        Err(err) if is_broken_pipe(&err) => std::process::exit(0),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}

fn run(args: &Args) -> Result<i32> {
    let json = read_input(args.input.as_deref())?;
    let snapshots = parse_snapshots(&json).context("failed to parse snapshots")?;
    log::info!("replaying {} snapshot(s)", snapshots.len());

    let mut cache = DisabledColumnsCache::new();
    let mut steps = Vec::with_capacity(snapshots.len());
    for (index, snapshot) in snapshots.into_iter().enumerate() {
        let mut inputs = snapshot
            .into_inputs()
            .with_context(|| format!("invalid snapshot at index {index}"))?;
        if let Some(prev) = cache.inputs() {
            inputs = inputs.reusing(prev);
        }
        let measure_area = inputs.flags.measure_area();
        let recomputed = cache.update(inputs);
        steps.push(Step {
            recomputed,
            measure_area,
            disabled: Arc::clone(cache.disabled()),
        });
    }

    let checks: Vec<DragCheck> = args
        .check_drag
        .iter()
        .map(|column| DragCheck {
            column: column.clone(),
            verdict: cache.check_drag(column),
        })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => write_text(&mut out, &steps, &checks)?,
        OutputFormat::Json => write_json(&mut out, &steps, &checks)?,
    }
    out.flush()?;

    let rejected = checks.iter().any(|check| check.verdict.is_err());
    Ok(if rejected { 1 } else { 0 })
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_text(out: &mut impl Write, steps: &[Step], checks: &[DragCheck]) -> io::Result<()> {
    if steps.is_empty() {
        writeln!(out, "No snapshots.")?;
    }
    for (index, step) in steps.iter().enumerate() {
        writeln!(
            out,
            "snapshot {index}: {}, {} disabled, measure area: {}",
            if step.recomputed { "recomputed" } else { "reused" },
            step.disabled.len(),
            step.measure_area
        )?;
        for (column, reason) in step.disabled.iter() {
            writeln!(out, "  {column}: {reason}")?;
        }
    }
    for check in checks {
        match &check.verdict {
            Ok(()) => writeln!(out, "drag {}: allowed", check.column)?,
            Err(err) => writeln!(out, "drag {}: rejected ({err})", check.column)?,
        }
    }
    Ok(())
}

fn write_json(out: &mut impl Write, steps: &[Step], checks: &[DragCheck]) -> io::Result<()> {
    let report = JsonReport {
        steps: steps
            .iter()
            .enumerate()
            .map(|(index, step)| JsonStep {
                index,
                recomputed: step.recomputed,
                measure_area: step.measure_area.label(),
                disabled: step
                    .disabled
                    .iter()
                    .map(|(column, reason)| JsonDisabled {
                        column,
                        reason: reason.to_string(),
                    })
                    .collect(),
            })
            .collect(),
        checks: checks
            .iter()
            .map(|check| JsonCheck {
                column: &check.column,
                allowed: check.verdict.is_ok(),
                error: check.verdict.as_ref().err().map(ToString::to_string),
            })
            .collect(),
    };
    serde_json::to_writer(&mut *out, &report)?;
    out.write_all(b"\n")
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
    })
}
