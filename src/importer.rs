use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader};

use crate::error::{ConvertError, Result};
use crate::fmt::cell_text;
use crate::models::{SourceRow, TemplateHeaders};

/// Statement exports keep their transactions on the second sheet.
pub const TRANSACTIONS_SHEET: usize = 1;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// 1899-12-30T00:00:00Z as milliseconds since the Unix epoch.
const SERIAL_EPOCH_UNIX_MILLIS: f64 = -2_209_161_600_000.0;
/// Largest representable instant either side of the Unix epoch (100 million days).
const MAX_UNIX_MILLIS: f64 = 8.64e15;

// ---------------------------------------------------------------------------
// Date serials
// ---------------------------------------------------------------------------

/// Convert a spreadsheet date serial to `YYYY-MM-DD`.
///
/// Day zero is 1899-12-30, two days before 1900-01-01, which absorbs the
/// format's phantom 1900-02-29. The serial is placed on the Unix timeline
/// first and only then truncated to whole milliseconds toward zero, so
/// sub-millisecond fractions before 1970 round up to the later instant. The
/// time of day is then dropped.
pub fn excel_serial_to_date(serial: f64) -> Result<String> {
    let unix_millis = (SERIAL_EPOCH_UNIX_MILLIS + serial * MILLIS_PER_DAY).trunc();
    if !unix_millis.is_finite() || unix_millis.abs() > MAX_UNIX_MILLIS {
        return Err(ConvertError::InvalidDate(serial.to_string()));
    }
    let date = chrono::DateTime::from_timestamp_millis(unix_millis as i64)
        .ok_or_else(|| ConvertError::InvalidDate(serial.to_string()))?;
    Ok(date.date_naive().format("%Y-%m-%d").to_string())
}

/// Pull a date serial out of a cell. Numeric text is accepted; anything else is not a date.
pub fn serial_from_cell(cell: Option<&Data>) -> Result<f64> {
    match cell {
        Some(Data::Float(f)) => Ok(*f),
        Some(Data::Int(i)) => Ok(*i as f64),
        Some(Data::DateTime(dt)) => Ok(dt.as_f64()),
        Some(Data::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ConvertError::InvalidDate(format!("{s:?} is not a number"))),
        Some(other) => Err(ConvertError::InvalidDate(format!(
            "{:?} is not a number",
            cell_text(other)
        ))),
        None => Err(ConvertError::InvalidDate("missing date cell".to_string())),
    }
}

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

pub fn parse_template(content: &str) -> Result<TemplateHeaders> {
    let first_line = content.split('\n').next().unwrap_or_default();
    let first_line = first_line.strip_suffix('\r').unwrap_or(first_line);
    TemplateHeaders::from_names(first_line.split(','))
}

pub fn read_template(path: &Path) -> Result<TemplateHeaders> {
    let content = std::fs::read_to_string(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_template(&content)
}

// ---------------------------------------------------------------------------
// Statement workbook
// ---------------------------------------------------------------------------

/// Read the transaction rows from sheet `sheet_index` of a statement workbook.
///
/// The format is sniffed from content, so legacy BIFF `.xls`, OOXML and ODS
/// exports all work whatever their extension says.
pub fn read_statement_rows(path: &Path, sheet_index: usize) -> Result<Vec<SourceRow>> {
    let bytes = std::fs::read(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ConvertError::Parse(format!("{}: {e}", path.display())))?;
    log::debug!("{}: sheets {:?}", path.display(), workbook.sheet_names());

    let range = workbook
        .worksheet_range_at(sheet_index)
        .ok_or_else(|| ConvertError::MissingSheet {
            path: path.to_path_buf(),
            index: sheet_index,
        })?
        .map_err(|e| ConvertError::Parse(format!("{}: {e}", path.display())))?;

    let rows = rows_from_range(&range);
    log::debug!("{}: {} transaction rows", path.display(), rows.len());
    Ok(rows)
}

/// First row names the columns; every later non-blank row becomes a `SourceRow`.
pub fn rows_from_range(range: &Range<Data>) -> Vec<SourceRow> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers = header_names(header_row);
    log::debug!("inferred headers {headers:?}");

    rows.filter_map(|cells| {
        let fields: HashMap<String, Data> = headers
            .iter()
            .zip(cells)
            .filter(|(_, cell)| !matches!(cell, Data::Empty))
            .map(|(name, cell)| (name.clone(), cell.clone()))
            .collect();
        let row = SourceRow::new(fields);
        (!row.is_empty()).then_some(row)
    })
    .collect()
}

/// Blank header cells become `__EMPTY`; repeats get `_1`, `_2`, ... in order.
fn header_names(cells: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    cells
        .iter()
        .map(|cell| {
            let base = match cell {
                Data::Empty => "__EMPTY".to_string(),
                other => cell_text(other),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            name
        })
        .collect()
}
