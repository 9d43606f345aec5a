//! `crest show` — full details for one event.

use crate::output::{CliError, OutputMode, render_error};
use clap::Args;
use crest_core::model::EventRecord;
use crest_core::store;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Event identifier (e.g. 1937_ohio_river_flood).
    pub id: Option<String>,

    /// Pick the event nearest to this year instead of by id.
    #[arg(long, conflicts_with = "id")]
    pub year: Option<i32>,

    /// Path to the external events file (overrides crest.toml).
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,
}

pub fn run_show(
    args: &ShowArgs,
    output: OutputMode,
    project_root: &std::path::Path,
) -> anyhow::Result<()> {
    let loaded = crate::cmd::load_store(args.data.as_deref(), project_root)?;

    let event = match (&args.id, args.year) {
        (Some(id), _) => match store::find_by_id(&loaded.events, id) {
            Some(event) => event,
            None => {
                render_error(
                    output,
                    &CliError::with_details(
                        format!("no event with id '{id}'"),
                        "Run `crest list` to see known identifiers",
                        "not_found",
                    ),
                )?;
                anyhow::bail!("no event with id '{id}'");
            }
        },
        (None, Some(year)) => {
            let Some(nearest) = store::nearest_year(&loaded.events, year) else {
                render_error(output, &CliError::new("the store has no events"))?;
                anyhow::bail!("the store has no events");
            };
            let Some(event) = loaded.events.iter().find(|event| event.year == nearest) else {
                anyhow::bail!("nearest year {nearest} has no event");
            };
            event
        }
        (None, None) => {
            render_error(
                output,
                &CliError::with_details(
                    "nothing to show",
                    "Pass an event id or --year",
                    "missing_selector",
                ),
            )?;
            anyhow::bail!("nothing to show");
        }
    };

    crate::output::render(output, event, render_human)
}

fn render_human(event: &EventRecord, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}: {}", event.year, event.name)?;
    if let Some(dates) = &event.dates {
        writeln!(w, "  dates:    {dates}")?;
    }
    writeln!(w, "  id:       {}", event.id)?;
    writeln!(w, "  summary:  {}", event.summary)?;
    match event.deaths {
        Some(deaths) => writeln!(w, "  deaths:   {deaths}")?,
        None => writeln!(w, "  deaths:   —")?,
    }
    match event.damages_usd_bil {
        Some(damages) => writeln!(w, "  damages:  ${damages:.1}B (est.)")?,
        None => writeln!(w, "  damages:  —")?,
    }
    if !event.counties.is_empty() {
        writeln!(w, "  counties: {}", event.counties.join(", "))?;
    }
    if !event.river_crests.is_empty() {
        writeln!(w, "  river crests:")?;
        for crest in &event.river_crests {
            match crest.crest_ft {
                Some(ft) => writeln!(w, "    {} — {ft:.1} ft ({})", crest.gage, crest.date)?,
                None => writeln!(w, "    {} — n/a ({})", crest.gage, crest.date)?,
            }
        }
    }
    if !event.photos.is_empty() {
        writeln!(w, "  photos:")?;
        for photo in &event.photos {
            writeln!(w, "    {} — {} ({})", photo.title, photo.url, photo.credit)?;
        }
    }
    if !event.resources.is_empty() {
        writeln!(w, "  resources:")?;
        for resource in &event.resources {
            writeln!(w, "    {} — {}", resource.label, resource.url)?;
        }
    }
    Ok(())
}
