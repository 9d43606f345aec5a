//! `crest bounds` — viewport bounding box for an event's geometry.

use crate::output::{CliError, OutputMode, render_error};
use clap::Args;
use crest_core::{geo, store};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BoundsArgs {
    /// Event identifier.
    pub id: String,

    /// Path to the external events file (overrides crest.toml).
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BoundsReport {
    id: String,
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
    center_lat: f64,
    center_lon: f64,
}

pub fn run_bounds(
    args: &BoundsArgs,
    output: OutputMode,
    project_root: &std::path::Path,
) -> anyhow::Result<()> {
    let loaded = crate::cmd::load_store(args.data.as_deref(), project_root)?;

    let Some(event) = store::find_by_id(&loaded.events, &args.id) else {
        render_error(
            output,
            &CliError::with_details(
                format!("no event with id '{}'", args.id),
                "Run `crest list` to see known identifiers",
                "not_found",
            ),
        )?;
        anyhow::bail!("no event with id '{}'", args.id);
    };

    // "No usable geometry" is an ordinary outcome: no viewport change.
    let bounds = event.geojson.as_ref().and_then(geo::collection_bounds);
    let Some(bounds) = bounds else {
        render_error(
            output,
            &CliError::with_details(
                format!("event '{}' has no usable geometry", args.id),
                "Add a Polygon or MultiPolygon feature to its geojson",
                "no_geometry",
            ),
        )?;
        anyhow::bail!("event '{}' has no usable geometry", args.id);
    };

    let (center_lat, center_lon) = bounds.center();
    let report = BoundsReport {
        id: args.id.clone(),
        min_lat: bounds.min_lat,
        min_lon: bounds.min_lon,
        max_lat: bounds.max_lat,
        max_lon: bounds.max_lon,
        center_lat,
        center_lon,
    };

    crate::output::render(output, &report, |report, w| {
        writeln!(w, "{}", report.id)?;
        writeln!(w, "  southwest: ({:.4}, {:.4})", report.min_lat, report.min_lon)?;
        writeln!(w, "  northeast: ({:.4}, {:.4})", report.max_lat, report.max_lon)?;
        writeln!(
            w,
            "  center:    ({:.4}, {:.4})",
            report.center_lat, report.center_lon
        )?;
        Ok(())
    })
}
