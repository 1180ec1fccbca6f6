//! Request boundary of the feed
//!
//! [`SnapshotExporter`] resolves which tab a request is about, reads it from
//! the data source and hands the grid to the transformation. The `try_*`
//! methods return errors; [`SnapshotExporter::snapshot`] and
//! [`SnapshotExporter::stats`] never fail, which is what the HTTP layer and
//! the CLI call.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::snapshot::build_snapshot;
use super::stats::{compute_status_stats, StatusColumn};
use crate::catalog::LocationCatalog;
use crate::config::{FeedConfig, SourceMode};
use crate::error::{FeedError, FeedResult};
use crate::source::DataSource;
use crate::types::{CatalogInfo, RawGrid, Snapshot, SnapshotFailure, SnapshotResponse, StatusStats};

pub struct SnapshotExporter {
    source: Arc<dyn DataSource>,
    catalog: LocationCatalog,
    mode: SourceMode,
    status_column: StatusColumn,
}

impl SnapshotExporter {
    /// Multi-location exporter with the default status column
    pub fn new(source: Arc<dyn DataSource>, catalog: LocationCatalog) -> Self {
        Self {
            source,
            catalog,
            mode: SourceMode::Multi,
            status_column: StatusColumn::default(),
        }
    }

    pub fn from_config(source: Arc<dyn DataSource>, config: &FeedConfig) -> Self {
        Self::new(source, config.catalog())
            .with_mode(config.mode)
            .with_status_column(config.status_column())
    }

    pub fn with_mode(mut self, mode: SourceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_status_column(mut self, column: StatusColumn) -> Self {
        self.status_column = column;
        self
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    /// Tab name a selector points at
    pub fn resolve(&self, selector: Option<&str>) -> FeedResult<String> {
        let available = self.source.list_sources()?;
        let selector = match self.mode {
            SourceMode::Single => None,
            SourceMode::Multi => selector,
        };
        self.catalog.resolve(selector, &available)
    }

    fn read(&self, selector: Option<&str>) -> FeedResult<(String, RawGrid)> {
        let sheet = self.resolve(selector)?;
        let grid = self.source.read_grid(&sheet)?;
        debug!(sheet = %sheet, rows = grid.len(), "resolved sheet");
        Ok((sheet, grid))
    }

    /// Snapshot of the selected tab, stamped with `now`
    pub fn try_snapshot_at(
        &self,
        selector: Option<&str>,
        now: DateTime<Utc>,
    ) -> FeedResult<Snapshot> {
        let (sheet, grid) = self.read(selector)?;
        let sheet = match self.mode {
            SourceMode::Single => None,
            SourceMode::Multi => Some(sheet),
        };
        build_snapshot(&grid, sheet, now)
    }

    pub fn try_snapshot(&self, selector: Option<&str>) -> FeedResult<Snapshot> {
        self.try_snapshot_at(selector, Utc::now())
    }

    /// Snapshot envelope; failures come back as `success: false`
    pub fn snapshot(&self, selector: Option<&str>) -> SnapshotResponse {
        match self.try_snapshot(selector) {
            Ok(snapshot) => SnapshotResponse::Ok(snapshot),
            Err(e) => {
                warn!(selector = ?selector, error = %e, "snapshot failed");
                SnapshotResponse::Failed(SnapshotFailure::new(e.to_string()))
            }
        }
    }

    pub fn try_stats(&self, selector: Option<&str>) -> FeedResult<StatusStats> {
        let (_, grid) = self.read(selector)?;
        compute_status_stats(&grid, &self.status_column)
    }

    /// Status counts; any failure yields all-zero counts
    pub fn stats(&self, selector: Option<&str>) -> StatusStats {
        self.try_stats(selector).unwrap_or_else(|e: FeedError| {
            if e.is_resolution() {
                debug!(selector = ?selector, error = %e, "no sheet for stats, reporting zeros");
            } else {
                warn!(selector = ?selector, error = %e, "stats unavailable, reporting zeros");
            }
            StatusStats::default()
        })
    }

    pub fn catalog_info(&self) -> CatalogInfo {
        self.catalog.info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::types::CellValue;
    use chrono::TimeZone;

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::text(*c)).collect()
    }

    fn source() -> Arc<dyn DataSource> {
        Arc::new(
            MemorySource::new()
                .with_sheet(
                    "Buford - GA",
                    vec![row(&["id", "status"]), row(&["A1", "Available"]), row(&["A2", "Sold"])],
                )
                .with_sheet("Concord - NC", vec![row(&["id", "status"]), row(&["C1", "Leased"])]),
        )
    }

    #[test]
    fn test_catalog_key_selects_tab() {
        let exporter = SnapshotExporter::new(source(), LocationCatalog::storage_caves());
        let snapshot = exporter.try_snapshot(Some("Concord")).unwrap();

        assert_eq!(snapshot.sheet.as_deref(), Some("Concord - NC"));
        assert_eq!(snapshot.total_units, 1);
    }

    #[test]
    fn test_snapshot_is_deterministic_apart_from_timestamp() {
        let exporter = SnapshotExporter::new(source(), LocationCatalog::storage_caves());
        let now = Utc.with_ymd_and_hms(2025, 10, 18, 0, 0, 0).unwrap();
        let first = exporter.try_snapshot_at(None, now).unwrap();
        let second = exporter.try_snapshot_at(None, now).unwrap();

        assert_eq!(first.data, second.data);
        assert_eq!(first.total_units, second.total_units);
    }

    #[test]
    fn test_failure_envelope() {
        let exporter = SnapshotExporter::new(source(), LocationCatalog::storage_caves());
        let response = exporter.snapshot(Some("UnknownTab"));

        match response {
            SnapshotResponse::Failed(failure) => {
                assert!(!failure.success);
                assert_eq!(failure.error, "Sheet \"UnknownTab\" not found");
            }
            SnapshotResponse::Ok(_) => panic!("expected failure envelope"),
        }
    }

    #[test]
    fn test_single_mode_ignores_selector() {
        let exporter = SnapshotExporter::new(source(), LocationCatalog::storage_caves())
            .with_mode(SourceMode::Single);
        let snapshot = exporter.try_snapshot(Some("Concord")).unwrap();

        assert!(snapshot.sheet.is_none());
        assert_eq!(snapshot.total_units, 2);
    }

    #[test]
    fn test_stats_zero_on_missing_tab() {
        let exporter = SnapshotExporter::new(source(), LocationCatalog::storage_caves());

        assert!(exporter.try_stats(Some("Nashville")).is_err());
        assert_eq!(exporter.stats(Some("Nashville")), StatusStats::default());
        assert_eq!(exporter.stats(Some("Buford")).sold, 1);
    }
}
