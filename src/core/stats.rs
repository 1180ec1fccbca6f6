//! Per-status unit counts

use serde::{Deserialize, Serialize};

use crate::error::{FeedError, FeedResult};
use crate::types::{CellValue, RawGrid, StatusStats};

/// Where the status of a row lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusColumn {
    /// Fixed column position (column B by default)
    Index(usize),
    /// Column whose header label matches
    Header(String),
}

impl Default for StatusColumn {
    fn default() -> Self {
        StatusColumn::Index(1)
    }
}

impl StatusColumn {
    fn position(&self, grid: &RawGrid) -> FeedResult<usize> {
        match self {
            StatusColumn::Index(idx) => Ok(*idx),
            StatusColumn::Header(label) => grid
                .first()
                .and_then(|header| header.iter().position(|cell| cell.to_text() == *label))
                .ok_or_else(|| {
                    FeedError::Transform(format!("status column '{}' not found in header row", label))
                }),
        }
    }
}

/// Count rows per status bucket
///
/// Only rows that would become records count, so a row with a blank first
/// cell is skipped here too. The status cell is string-coerced and
/// lowercased; blank or unknown values are ignored.
pub fn compute_status_stats(grid: &RawGrid, column: &StatusColumn) -> FeedResult<StatusStats> {
    let mut stats = StatusStats::default();
    if grid.len() < 2 {
        return Ok(stats);
    }

    let col = column.position(grid)?;
    for row in grid.iter().skip(1) {
        if !row.first().is_some_and(CellValue::is_truthy) {
            continue;
        }
        let Some(status) = row.get(col).filter(|cell| cell.is_truthy()) else {
            continue;
        };
        if let Some(count) = stats.bucket_mut(&status.to_text().to_lowercase()) {
            *count += 1;
        }
    }

    Ok(stats)
}
