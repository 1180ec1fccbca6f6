//! Sheetfeed API Server binary
//!
//! Publishes spreadsheet tabs as a live JSON feed.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use sheetfeed::api::{run_api_server, server::ApiConfig, AppState};
use sheetfeed::cli::load_exporter;
use sheetfeed::view::{FileViewHost, Menu};

#[derive(Parser, Debug)]
#[command(name = "sheetfeed-server")]
#[command(version)]
#[command(about = "Sheetfeed API Server - spreadsheet tabs as a live JSON feed")]
#[command(long_about = r#"
Sheetfeed API Server

Feed endpoints:
  - GET /api/v1/snapshot?location=Buford  - Rows of a sheet as JSON
  - GET /api/v1/stats?location=Buford     - Unit counts per status
  - GET /api/v1/catalog                   - Known locations
  - GET /api/v1/menu                      - Menu entries and their view links
  - GET /ui/<entry>                       - Open a menu entry's view

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - The workbook is re-read on every request

Example usage:
  sheetfeed-server units.xlsx                     # Start on localhost:8080
  sheetfeed-server units.xlsx --host 0.0.0.0 --port 3000
  sheetfeed-server --config sheetfeed.yaml

  curl "http://localhost:8080/api/v1/snapshot?location=Buford"
"#)]
struct Args {
    /// Workbook or grid file (defaults to `source` in the config)
    #[arg(env = "SHEETFEED_SOURCE")]
    source: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long, env = "SHEETFEED_CONFIG")]
    config: Option<PathBuf>,

    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, env = "SHEETFEED_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SHEETFEED_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, exporter) = load_exporter(args.source, args.config.as_deref())?;
    let views = Arc::new(FileViewHost::new(
        &config.views.dir,
        config.views.external_url.clone(),
    ));
    let state = AppState::new(exporter, views, Menu::storage_caves());

    let api_config = ApiConfig {
        host: args.host.unwrap_or(config.server.host),
        port: args.port.unwrap_or(config.server.port),
    };

    run_api_server(api_config, state).await
}
