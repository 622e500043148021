use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::errors::AppError;
use crate::roster::{CellValue, CustomerRecord, Roster};

/// Loads the first worksheet of the workbook at `path`.
///
/// Row 1 is always the header. Every later row up to the last used one becomes a
/// record, blank rows included, so record `i` always maps back to sheet row `i + 2`.
pub fn load_roster(path: &Path) -> Result<Roster, AppError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| AppError::SpreadsheetRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| AppError::SpreadsheetRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let roster = roster_from_range(&range);
    debug!(
        "Loaded {} rows with headers {:?} from {}",
        roster.records.len(),
        roster.headers,
        path.display()
    );
    Ok(roster)
}

/// Builds a roster from absolute sheet coordinates, so a sheet whose used range
/// does not start at A1 still reads its header from row 1, column A.
fn roster_from_range(range: &Range<Data>) -> Roster {
    let Some((last_row, last_col)) = range.end() else {
        return Roster::default();
    };

    let headers: Vec<String> = (0..=last_col)
        .map(|col| cell_value(range.get_value((0, col))).to_string())
        .collect();

    let records = (1..=last_row)
        .map(|row| record_at(range, &headers, row))
        .collect();

    Roster { headers, records }
}

fn record_at(range: &Range<Data>, headers: &[String], row: u32) -> CustomerRecord {
    let mut fields = HashMap::with_capacity(headers.len());
    for (col, header) in (0u32..).zip(headers) {
        fields.insert(header.clone(), cell_value(range.get_value((row, col))));
    }
    CustomerRecord { fields }
}

fn cell_value(cell: Option<&Data>) -> CellValue {
    match cell {
        None | Some(Data::Empty) => CellValue::Empty,
        Some(Data::String(s)) => CellValue::Text(s.clone()),
        Some(Data::Int(i)) => CellValue::Int(*i),
        Some(Data::Float(f)) => CellValue::Float(*f),
        Some(Data::Bool(b)) => CellValue::Bool(*b),
        Some(Data::DateTime(dt)) => CellValue::Float(dt.as_f64()),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => CellValue::Text(s.clone()),
        Some(Data::Error(e)) => CellValue::Text(e.to_string()),
    }
}
