use crate::config::{FeedConfig, SourceMode};
use crate::core::SnapshotExporter;
use crate::error::{FeedError, FeedResult};
use crate::source::open_source;
use crate::types::{SnapshotFailure, SnapshotResponse, StatusStats};
use crate::view::Menu;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Load the config file (if any) and open the data source
///
/// An explicit `source` wins over the one named in the config.
pub fn load_exporter(
    source: Option<PathBuf>,
    config_path: Option<&Path>,
) -> FeedResult<(FeedConfig, SnapshotExporter)> {
    let config = FeedConfig::load_or_default(config_path)?;
    let source_path = source.or_else(|| config.source.clone()).ok_or_else(|| {
        FeedError::Config("no data source given (pass a file or set `source` in the config)".to_string())
    })?;

    let source = open_source(&source_path)?;
    let exporter = SnapshotExporter::from_config(source, &config);
    Ok((config, exporter))
}

/// Execute the snapshot command
///
/// Prints the envelope as JSON, exactly as the HTTP endpoint would serve it.
pub fn snapshot(
    source: Option<PathBuf>,
    config: Option<PathBuf>,
    location: Option<String>,
    pretty: bool,
) -> FeedResult<()> {
    let response = match load_exporter(source, config.as_deref()) {
        Ok((_, exporter)) => exporter.snapshot(location.as_deref()),
        Err(e) => SnapshotResponse::Failed(SnapshotFailure::new(e.to_string())),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", json);
    Ok(())
}

/// Execute the stats command
pub fn stats(
    source: Option<PathBuf>,
    config: Option<PathBuf>,
    location: Option<String>,
    json: bool,
) -> FeedResult<()> {
    let (_, exporter) = load_exporter(source, config.as_deref())?;
    let stats = exporter.stats(location.as_deref());

    if json {
        println!("{}", serde_json::to_string(&stats)?);
        return Ok(());
    }

    let sheet = exporter
        .resolve(location.as_deref())
        .unwrap_or_else(|_| location.clone().unwrap_or_default());
    println!("{}", "📊 Unit status".bold().green());
    if !sheet.is_empty() {
        println!("   Sheet: {}", sheet.bright_blue().bold());
    }
    println!();
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &StatusStats) {
    for bucket in StatusStats::BUCKETS {
        let count = stats.get(bucket).unwrap_or_default();
        let label = match bucket {
            "available" => bucket.green(),
            "sold" => bucket.red(),
            "reserved" => bucket.yellow(),
            _ => bucket.cyan(),
        };
        println!("   {:<10} {:>6}", label, count);
    }
    println!("   {:<10} {:>6}", "total".bold(), stats.total());
}

/// Execute the catalog command
pub fn catalog(config: Option<PathBuf>, json: bool) -> FeedResult<()> {
    let config = FeedConfig::load_or_default(config.as_deref())?;
    let catalog = config.catalog();

    if json {
        println!("{}", serde_json::to_string(&catalog.info())?);
        return Ok(());
    }

    println!("{}", "📍 Locations".bold().green());
    if config.mode == SourceMode::Single {
        println!("{}", "   (single-sheet mode: selectors are ignored)".yellow());
    }
    for (idx, entry) in catalog.entries().iter().enumerate() {
        let marker = if idx == 0 { " (default)" } else { "" };
        println!(
            "   {:<12} → {}{}",
            entry.key.bright_blue(),
            entry.sheet,
            marker.dimmed()
        );
    }
    Ok(())
}

/// Execute the menu command
pub fn menu() -> FeedResult<()> {
    let menu = Menu::storage_caves();
    println!("{}", menu.title.bold().green());
    for entry in &menu.entries {
        println!(
            "   {:<20} /ui/{}  ({} → {})",
            entry.label,
            entry.slug.bright_blue(),
            format!("{:?}", entry.options.kind).to_lowercase(),
            entry.view
        );
    }
    Ok(())
}
