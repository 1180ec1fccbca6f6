//! Row → record transformation
//!
//! Row 0 of a grid holds the header labels. Every later row whose first cell
//! is truthy becomes one [`Record`], pairing `headers[j]` with `row[j]` for
//! each column both of them have. Rows with a blank first cell are skipped,
//! columns past the header are dropped, and short rows simply lack the
//! trailing keys.

use chrono::{DateTime, Utc};

use crate::error::{FeedError, FeedResult};
use crate::types::{CellValue, RawGrid, Record, Snapshot};

/// Header labels of a grid, string-coerced
pub fn headers(grid: &RawGrid) -> FeedResult<Vec<String>> {
    let header_row = grid
        .first()
        .ok_or_else(|| FeedError::Transform("grid has no header row".to_string()))?;
    Ok(header_row.iter().map(CellValue::to_text).collect())
}

/// Zip the header row against every non-empty data row
pub fn build_records(grid: &RawGrid) -> FeedResult<Vec<Record>> {
    let headers = headers(grid)?;

    let records = grid
        .iter()
        .skip(1)
        .filter(|row| row.first().is_some_and(CellValue::is_truthy))
        .map(|row| {
            let mut record = Record::new();
            for (label, value) in headers.iter().zip(row.iter()) {
                record.insert(label.as_str(), value.clone());
            }
            record
        })
        .collect();

    Ok(records)
}

/// Build the success envelope for a grid, stamped with `now`
///
/// `sheet` is the resolved tab name; pass `None` for single-sheet feeds.
pub fn build_snapshot(
    grid: &RawGrid,
    sheet: Option<String>,
    now: DateTime<Utc>,
) -> FeedResult<Snapshot> {
    let data = build_records(grid)?;
    Ok(Snapshot {
        success: true,
        sheet,
        last_updated: now,
        total_units: data.len(),
        data,
    })
}
