//! Spreadsheet workbook source (.xlsx, .xls, .ods) backed by calamine

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::debug;

use super::DataSource;
use crate::error::{FeedError, FeedResult};
use crate::types::{CellValue, RawGrid};

/// Workbook on disk. The file is opened on every call.
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    path: PathBuf,
}

impl WorkbookSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> FeedResult<calamine::Sheets<std::io::BufReader<std::fs::File>>> {
        open_workbook_auto(&self.path)
            .map_err(|e| FeedError::Workbook(format!("Failed to open workbook: {}", e)))
    }
}

impl DataSource for WorkbookSource {
    fn list_sources(&self) -> FeedResult<Vec<String>> {
        let workbook = self.open()?;
        Ok(workbook.sheet_names().to_vec())
    }

    fn read_grid(&self, name: &str) -> FeedResult<RawGrid> {
        let mut workbook = self.open()?;
        if !workbook.sheet_names().iter().any(|s| s == name) {
            return Err(FeedError::SourceNotFound(name.to_string()));
        }

        let range = workbook
            .worksheet_range(name)
            .map_err(|e| FeedError::Workbook(format!("Failed to read sheet '{}': {}", name, e)))?;

        let grid = range_to_grid(&range);
        debug!(sheet = name, rows = grid.len(), "read workbook sheet");
        Ok(grid)
    }
}

/// Copy a calamine range into a grid anchored at A1
///
/// calamine ranges start at the first used cell; leading blank rows and
/// columns are put back as empty cells so row 0 is always sheet row 1.
fn range_to_grid(range: &Range<Data>) -> RawGrid {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };

    (0..=end_row)
        .map(|row| {
            (0..=end_col)
                .map(|col| range.get_value((row, col)).map_or(CellValue::Empty, convert_cell))
                .collect()
        })
        .collect()
}

/// Convert one calamine cell
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => excel_serial_to_utc(dt.as_f64())
            .map(CellValue::Date)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// Excel serial date (days since 1899-12-30) as a UTC timestamp, to the millisecond
fn excel_serial_to_utc(serial: f64) -> Option<DateTime<Utc>> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    // Saturated casts land outside TimeDelta's range; try_ keeps that a None
    epoch
        .checked_add_signed(Duration::try_milliseconds(millis)?)
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use chrono::TimeZone;

    #[test]
    fn test_excel_serial_dates() {
        let dt = excel_serial_to_utc(45948.5).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 10, 18, 12, 0, 0).unwrap());

        let epoch = excel_serial_to_utc(0.0).unwrap();
        assert_eq!(epoch, Utc.with_ymd_and_hms(1899, 12, 30, 0, 0, 0).unwrap());

        assert!(excel_serial_to_utc(f64::NAN).is_none());
    }

    #[test]
    fn test_out_of_range_serials() {
        assert!(excel_serial_to_utc(-1e300).is_none());
        assert!(excel_serial_to_utc(1e300).is_none());
        assert!(excel_serial_to_utc(1e12).is_none());

        let cell = Data::DateTime(ExcelDateTime::new(-1e300, ExcelDateTimeType::DateTime, false));
        assert_eq!(convert_cell(&cell), CellValue::Number(-1e300));
    }

    #[test]
    fn test_convert_scalar_cells() {
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(convert_cell(&Data::String("A1".into())), CellValue::text("A1"));
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_missing_workbook() {
        let source = WorkbookSource::new("/nonexistent/units.xlsx");
        let err = source.list_sources().unwrap_err();
        assert!(matches!(err, FeedError::Workbook(_)));
    }
}
