//! `crest add` — contribute an event to the external layer.
//!
//! Builds a candidate record from flags, validates it, derives its id,
//! and upserts it into the external events file. With `--push` the file
//! is the remote blob instead: fetch, merge into the fetched text, and
//! write back with the fetched fingerprint as the concurrency token.

use crate::output::{CliError, OutputMode, render_error};
use anyhow::Context;
use clap::Args;
use crest_core::config::load_config;
use crest_core::error::{SyncError, ValidationError};
use crest_core::model::EventRecord;
use crest_core::sync::ContentsClient;
use crest_core::{slug, store, validate};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Event name (e.g. "1997 March Flood").
    #[arg(long)]
    pub name: String,

    /// Year the event occurred.
    #[arg(long)]
    pub year: i32,

    /// Sourced event summary.
    #[arg(long, default_value = "")]
    pub summary: String,

    /// Free-text date range (e.g. "Mar 1 – Mar 7, 1997").
    #[arg(long)]
    pub dates: Option<String>,

    /// Death toll, if known.
    #[arg(long)]
    pub deaths: Option<u64>,

    /// Estimated damages in billions of USD, if known.
    #[arg(long, value_name = "BILLIONS")]
    pub damages: Option<f64>,

    /// Affected county (repeat for several).
    #[arg(long = "county", value_name = "NAME")]
    pub counties: Vec<String>,

    /// Path to a GeoJSON FeatureCollection for the affected area.
    #[arg(long, value_name = "PATH")]
    pub geojson: Option<PathBuf>,

    /// Path to the external events file (overrides crest.toml).
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Push to the configured remote instead of writing the local file.
    #[arg(long)]
    pub push: bool,

    /// Commit message for the remote write.
    #[arg(long, default_value = "Add flood event via crest")]
    pub message: String,

    /// Bearer token for the remote write. Falls back to GITHUB_TOKEN.
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
struct AddReport {
    id: String,
    replaced_existing: bool,
    destination: String,
}

pub fn run_add(
    args: &AddArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let candidate = match build_candidate(args) {
        Ok(candidate) => candidate,
        Err(err) => {
            render_error(
                output,
                &CliError::with_details(
                    err.to_string(),
                    "Provide --name, --summary, and a --geojson FeatureCollection",
                    err.code(),
                ),
            )?;
            anyhow::bail!("{err}");
        }
    };

    if args.push {
        push_remote(args, &candidate, output, project_root)
    } else {
        write_local(args, &candidate, output, project_root)
    }
}

/// Assemble and validate the candidate record. The id is derived from
/// `(year, name)`; a collision with an existing record deliberately
/// replaces it.
fn build_candidate(args: &AddArgs) -> Result<EventRecord, ValidationError> {
    let geojson = match &args.geojson {
        None => None,
        Some(path) => {
            let Ok(text) = std::fs::read_to_string(path) else {
                return Err(ValidationError::MissingGeojson);
            };
            match validate::validate_geojson(&text) {
                Some(collection) => Some(collection),
                None => return Err(ValidationError::NotAFeatureCollection),
            }
        }
    };

    let candidate = EventRecord {
        id: slug::make_id(args.year, &args.name),
        name: args.name.clone(),
        year: args.year,
        dates: args.dates.clone(),
        summary: args.summary.clone(),
        deaths: args.deaths,
        damages_usd_bil: args.damages,
        counties: args.counties.clone(),
        geojson,
        ..EventRecord::default()
    };

    validate::validate_record(&candidate)?;
    Ok(candidate)
}

fn write_local(
    args: &AddArgs,
    candidate: &EventRecord,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let config = load_config(project_root)?;
    let path = args
        .data
        .clone()
        .unwrap_or_else(|| project_root.join(&config.data.file));

    let existing = if path.exists() {
        Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        )
    } else {
        None
    };

    let replaced_existing = contains_id(existing.as_deref(), &candidate.id);
    let (text, warnings) = store::merge_into_text(existing.as_deref(), candidate)?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, &text).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(id = %candidate.id, path = %path.display(), "event written");

    report(output, candidate, replaced_existing, path.display().to_string())
}

fn push_remote(
    args: &AddArgs,
    candidate: &EventRecord,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let config = load_config(project_root)?;
    let Some(remote) = config.remote else {
        render_error(
            output,
            &CliError::with_details(
                "no [remote] section in crest.toml",
                "Configure remote.repo before pushing",
                "remote_unconfigured",
            ),
        )?;
        anyhow::bail!("no [remote] section in crest.toml");
    };

    let token = args
        .token
        .clone()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok());
    let remote_config = remote.to_remote_config(token)?;
    if !remote_config.can_write() {
        render_error(
            output,
            &CliError::with_details(
                "remote writes are disabled: missing bearer token",
                "Pass --token or set GITHUB_TOKEN",
                "read_only",
            ),
        )?;
        anyhow::bail!("remote writes are disabled: missing bearer token");
    }

    let destination = format!(
        "{}:{}/{}",
        remote_config.repo.full_name(),
        remote_config.branch,
        remote_config.path
    );
    let client = ContentsClient::new(remote_config);

    // Fetch-then-put: absent means "create fresh"; the fingerprint from a
    // present file is the optimistic-concurrency token for the write.
    let fetched = match client.fetch() {
        Ok(fetched) => fetched,
        Err(err) => {
            render_error(output, &CliError::new(err.to_string()))?;
            anyhow::bail!("{err}");
        }
    };

    let (existing_text, fingerprint) = match &fetched {
        Some(file) => (Some(file.text.as_str()), Some(file.fingerprint.as_str())),
        None => (None, None),
    };

    let replaced_existing = contains_id(existing_text, &candidate.id);
    let (text, warnings) = store::merge_into_text(existing_text, candidate)?;
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    match client.put(&text, &args.message, fingerprint) {
        Ok(()) => {}
        Err(err @ SyncError::Conflict { .. }) => {
            render_error(
                output,
                &CliError::with_details(
                    err.to_string(),
                    "The remote file changed since the fetch; re-run to re-fetch and re-apply",
                    "conflict",
                ),
            )?;
            anyhow::bail!("{err}");
        }
        Err(err) => {
            render_error(output, &CliError::new(err.to_string()))?;
            anyhow::bail!("{err}");
        }
    }
    info!(id = %candidate.id, destination = %destination, "event pushed");

    report(output, candidate, replaced_existing, destination)
}

/// Whether the existing external layer already carries this id.
fn contains_id(existing_text: Option<&str>, id: &str) -> bool {
    let Some(text) = existing_text else {
        return false;
    };
    let Ok(serde_yaml::Value::Sequence(entries)) = serde_yaml::from_str(text) else {
        return false;
    };
    entries
        .iter()
        .any(|entry| entry.get("id").and_then(serde_yaml::Value::as_str) == Some(id))
}

fn report(
    output: OutputMode,
    candidate: &EventRecord,
    replaced_existing: bool,
    destination: String,
) -> anyhow::Result<()> {
    let report = AddReport {
        id: candidate.id.clone(),
        replaced_existing,
        destination,
    };
    crate::output::render(output, &report, |report, w| {
        let verb = if report.replaced_existing {
            "replaced"
        } else {
            "added"
        };
        writeln!(w, "✓ {verb} {} in {}", report.id, report.destination)?;
        Ok(())
    })
}
