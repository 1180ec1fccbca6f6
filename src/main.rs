use clap::{Parser, Subcommand};
use sheetfeed::api::server::init_tracing;
use sheetfeed::cli;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetfeed")]
#[command(about = "Spreadsheet tabs as a live JSON feed.")]
#[command(long_about = "Sheetfeed - spreadsheet tabs as a live JSON feed

Reads a workbook (.xlsx, .xls, .ods) or a JSON/YAML grid file and turns each
row into a JSON record keyed by the header row.

COMMANDS:
  snapshot  - Print the JSON envelope for a sheet
  stats     - Count units per status (available, sold, reserved, leased)
  catalog   - List the known locations
  menu      - List the menu entries served by sheetfeed-server

EXAMPLES:
  sheetfeed snapshot units.xlsx                  # First sheet
  sheetfeed snapshot units.xlsx -l Buford        # Buford - GA
  sheetfeed stats units.xlsx -l Concord
  sheetfeed catalog --config sheetfeed.yaml

Serve the feed over HTTP with sheetfeed-server.")]
#[command(version)]
struct Cli {
    /// YAML config file
    #[arg(short, long, global = true, env = "SHEETFEED_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Print the snapshot envelope for a sheet.

The output is exactly what GET /api/v1/snapshot serves:

  {\"success\": true, \"sheet\": \"Buford - GA\", \"lastUpdated\": \"...\",
   \"totalUnits\": 74, \"data\": [{\"unit_id\": \"A1\", ...}]}

Rows whose first cell is blank are skipped. Failures are printed as
{\"success\": false, \"error\": ..., \"message\": ...}.

LOCATION:
  A known location key (Buford, FortMill, Concord, ...) maps to its sheet.
  Any other value is used as a sheet name. Without --location the first
  sheet is used.")]
    /// Print the JSON snapshot of a sheet
    Snapshot {
        /// Workbook or grid file (defaults to `source` in the config)
        source: Option<PathBuf>,

        /// Location key or sheet name
        #[arg(short, long)]
        location: Option<String>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Count units per status
    Stats {
        /// Workbook or grid file (defaults to `source` in the config)
        source: Option<PathBuf>,

        /// Location key or sheet name
        #[arg(short, long)]
        location: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the known locations
    Catalog {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the menu entries
    Menu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing("sheetfeed=warn");

    match cli.command {
        Commands::Snapshot {
            source,
            location,
            pretty,
        } => cli::snapshot(source, cli.config, location, pretty)?,

        Commands::Stats {
            source,
            location,
            json,
        } => cli::stats(source, cli.config, location, json)?,

        Commands::Catalog { json } => cli::catalog(cli.config, json)?,

        Commands::Menu => cli::menu()?,
    }

    Ok(())
}
