#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "crest: Kentucky historical flood atlas",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List flood events",
        long_about = "List the merged event store (builtin plus external), sorted by year.",
        after_help = "EXAMPLES:\n    # List all events\n    crest list\n\n    # Only a single year\n    crest list --year 1937\n\n    # Emit machine-readable output\n    crest list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one flood event",
        long_about = "Show full details for one event, by id or by nearest year.",
        after_help = "EXAMPLES:\n    # Show an event by id\n    crest show 1937_ohio_river_flood\n\n    # Show the event nearest a year\n    crest show --year 1940\n\n    # Emit machine-readable output\n    crest show 1937_ohio_river_flood --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "Compute an event's map bounds",
        long_about = "Compute the bounding box and center of an event's affected area.",
        after_help = "EXAMPLES:\n    # Bounds of the 1937 flood envelope\n    crest bounds 1937_ohio_river_flood\n\n    # Emit machine-readable output\n    crest bounds 1937_ohio_river_flood --json"
    )]
    Bounds(cmd::bounds::BoundsArgs),

    #[command(
        next_help_heading = "Maintenance",
        about = "Validate an external events file",
        long_about = "Parse an external events file, report merge warnings and invalid records.",
        after_help = "EXAMPLES:\n    # Check the default data file\n    crest check data/events.yaml\n\n    # Fail the exit code on any finding\n    crest check data/events.yaml --strict\n\n    # Emit machine-readable output\n    crest check data/events.yaml --json"
    )]
    Check(cmd::check::CheckArgs),

    #[command(
        next_help_heading = "Contribute",
        about = "Add a flood event",
        long_about = "Validate a candidate event and upsert it into the external events file, locally or on the configured remote.",
        after_help = "EXAMPLES:\n    # Add an event to the local data file\n    crest add --name \"1997 March Flood\" --year 1997 \\\n        --summary \"Ohio Valley flooding.\" --geojson area.json\n\n    # Push to the configured remote instead\n    crest add --name \"1997 March Flood\" --year 1997 \\\n        --summary \"Ohio Valley flooding.\" --geojson area.json \\\n        --push --token ghp_example\n\n    # Emit machine-readable output\n    crest add --name \"...\" --year 1997 --summary \"...\" --geojson area.json --json"
    )]
    Add(cmd::add::AddArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CREST_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "crest=debug,info"
        } else {
            "crest=info,warn"
        })
    });

    let format = env::var("CREST_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = std::env::current_dir()?;
    let output = cli.output_mode();

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output, &project_root),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &project_root),
        Commands::Bounds(ref args) => cmd::bounds::run_bounds(args, output, &project_root),
        Commands::Check(ref args) => cmd::check::run_check(args, output, &project_root),
        Commands::Add(ref args) => cmd::add::run_add(args, output, &project_root),
    }
}
