//! `crest list` — the merged, sorted event timeline.

use crate::output::OutputMode;
use clap::Args;
use crest_core::model::EventRecord;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Path to the external events file (overrides crest.toml).
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Only events from this year.
    #[arg(long)]
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
struct ListRow<'a> {
    id: &'a str,
    year: i32,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    deaths: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    damages_usd_bil: Option<f64>,
    counties: &'a [String],
}

#[derive(Debug, Serialize)]
struct ListReport<'a> {
    events: Vec<ListRow<'a>>,
    total: usize,
    warnings: Vec<String>,
}

pub fn run_list(
    args: &ListArgs,
    output: OutputMode,
    project_root: &std::path::Path,
) -> anyhow::Result<()> {
    let loaded = crate::cmd::load_store(args.data.as_deref(), project_root)?;

    let rows: Vec<ListRow<'_>> = loaded
        .events
        .iter()
        .filter(|event| args.year.is_none_or(|year| event.year == year))
        .map(row)
        .collect();

    let report = ListReport {
        total: rows.len(),
        events: rows,
        warnings: loaded.warnings.iter().map(ToString::to_string).collect(),
    };

    crate::output::render(output, &report, |report, w| {
        writeln!(w, "{:<28}  {:>4}  {}", "ID", "YEAR", "NAME")?;
        for event in &report.events {
            writeln!(w, "{:<28}  {:>4}  {}", event.id, event.year, event.name)?;
        }
        writeln!(w, "{} event(s)", report.total)?;
        for warning in &report.warnings {
            writeln!(w, "warning: {warning}")?;
        }
        Ok(())
    })
}

fn row(event: &EventRecord) -> ListRow<'_> {
    ListRow {
        id: &event.id,
        year: event.year,
        name: &event.name,
        deaths: event.deaths,
        damages_usd_bil: event.damages_usd_bil,
        counties: &event.counties,
    }
}
