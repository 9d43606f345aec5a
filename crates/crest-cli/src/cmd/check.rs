//! `crest check` — validate an external events file.

use crate::output::OutputMode;
use anyhow::Context;
use clap::Args;
use crest_core::{seed, store, validate};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Events file to check.
    pub path: PathBuf,

    /// Exit non-zero when the file has any problem.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    path: String,
    merged_events: usize,
    warnings: Vec<String>,
    invalid_records: Vec<InvalidRecord>,
}

#[derive(Debug, Serialize)]
struct InvalidRecord {
    id: String,
    reason: String,
    code: String,
}

impl CheckReport {
    fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.invalid_records.is_empty()
    }
}

pub fn run_check(
    args: &CheckArgs,
    output: OutputMode,
    _project_root: &std::path::Path,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let loaded = store::load(seed::builtin_events(), Some(&text));

    // Seeds are trusted; only records touched by the external layer are
    // held to the submission bar.
    let seed_ids: Vec<String> = seed::builtin_events()
        .into_iter()
        .map(|event| event.id)
        .collect();
    let invalid_records: Vec<InvalidRecord> = loaded
        .events
        .iter()
        .filter(|event| !seed_ids.contains(&event.id))
        .filter_map(|event| {
            validate::validate_record(event).err().map(|err| InvalidRecord {
                id: event.id.clone(),
                reason: err.to_string(),
                code: err.code().to_string(),
            })
        })
        .collect();

    let report = CheckReport {
        path: args.path.display().to_string(),
        merged_events: loaded.events.len(),
        warnings: loaded.warnings.iter().map(ToString::to_string).collect(),
        invalid_records,
    };

    crate::output::render(output, &report, |report, w| {
        writeln!(w, "checked {}", report.path)?;
        writeln!(w, "  merged events: {}", report.merged_events)?;
        if report.is_clean() {
            writeln!(w, "  ok")?;
        }
        for warning in &report.warnings {
            writeln!(w, "  warning: {warning}")?;
        }
        for invalid in &report.invalid_records {
            writeln!(w, "  invalid: {} — {}", invalid.id, invalid.reason)?;
        }
        Ok(())
    })?;

    if args.strict && !report.is_clean() {
        anyhow::bail!(
            "{} has {} warning(s) and {} invalid record(s)",
            report.path,
            report.warnings.len(),
            report.invalid_records.len()
        );
    }

    Ok(())
}
