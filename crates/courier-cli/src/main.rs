//! courier — command-line route assistant.
//!
//! Works against a CSV point file (see `courier_store::csv` for the format).
//! Every command re-reads the file; `confirm` rewrites it.
//!
//! ```text
//! courier --points route.csv list --pending
//! courier optimize --start 52.23,21.01
//! courier confirm a2
//! courier nearest --from 52.23,21.01
//! courier --json length
//! ```

mod commands;


use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use courier_core::Coordinate;
use courier_dispatch::RouteService;
use courier_store::CsvStore;

use commands::Format;

#[derive(Debug, Parser)]
#[command(name = "courier")]
#[command(about = "Delivery route assistant: list stops, plan a route, confirm deliveries")]
struct Cli {
    /// CSV file holding the delivery points.
    #[arg(long, env = "COURIER_POINTS", default_value = "route.csv")]
    points: PathBuf,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all points with their delivery status.
    List {
        /// Only show points not yet delivered.
        #[arg(long)]
        pending: bool,
    },
    /// Plan a visiting order over the pending points.
    Optimize {
        /// Starting position as LAT,LNG.  Defaults to the first pending point.
        #[arg(long, allow_hyphen_values = true)]
        start: Option<Coordinate>,
    },
    /// Mark a point as delivered.
    Confirm {
        /// Point id.
        id: String,
    },
    /// Show the closest pending point.
    Nearest {
        /// Current position as LAT,LNG.
        #[arg(long, allow_hyphen_values = true)]
        from: Coordinate,
    },
    /// Length of the pending points in listed order.
    Length,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("COURIER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let format = if cli.json { Format::Json } else { Format::Text };
    let mut svc = RouteService::new(CsvStore::new(cli.points));
    let mut out = io::stdout().lock();

    match cli.command {
        Command::List { pending } => commands::list(&svc, pending, format, &mut out),
        Command::Optimize { start } => commands::optimize(&svc, start, format, &mut out),
        Command::Confirm { id } => commands::confirm(&mut svc, &id, format, &mut out),
        Command::Nearest { from } => commands::nearest(&svc, from, format, &mut out),
        Command::Length => commands::length(&svc, format, &mut out),
    }
}
