// Excel file import (xlsx, xls, xlsb, ods)
//
// Values-only, single-sheet import: the scorer needs cell values with the
// first row as header, not formulas, formats, or merges.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};

use arssi_core::{Frame, Value};

/// Maximum number of cells to import (prevents DoS from huge files)
const MAX_CELLS: usize = 5_000_000;

/// Import the first sheet of an Excel file (xlsx, xls, xlsb, ods).
pub fn import(path: &Path) -> Result<Frame, String> {
    import_sheet(path, None)
}

/// Import a named sheet, or the first sheet when `sheet` is `None`.
pub fn import_sheet(path: &Path, sheet: Option<&str>) -> Result<Frame, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {}", e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err("Excel file contains no sheets".to_string());
    }

    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(format!(
                    "sheet '{}' not found (available: {})",
                    name,
                    sheet_names.join(", ")
                ));
            }
            name.to_string()
        }
        None => sheet_names[0].clone(),
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    let (height, width) = range.get_size();
    if height == 0 {
        return Err(format!("sheet '{}' is empty", sheet_name));
    }
    if height * width > MAX_CELLS {
        return Err(format!(
            "sheet '{}' exceeds the {} cell import limit",
            sheet_name, MAX_CELLS
        ));
    }

    let mut rows = range.rows();

    // First row is the header
    let header = rows.next().unwrap_or(&[]);
    let columns: Vec<String> = header.iter().map(header_text).collect();
    let mut frame = Frame::new(columns);

    for row in rows {
        frame.push_row(row.iter().map(cell_value).collect());
    }

    Ok(frame)
}

fn header_text(cell: &Data) -> String {
    match cell_value(cell) {
        Value::Text(s) => s,
        other => other.display(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::String(s) => Value::from_input(s),
        Data::Float(n) => Value::Number(*n),
        Data::Int(n) => Value::Number(*n as f64),
        // TRUE/FALSE as text: booleans are not survey responses and must not
        // silently contribute 1/0 to SEI
        Data::Bool(b) => Value::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Cell errors as text representation
        Data::Error(e) => Value::Text(format!("#{:?}", e)),
        // Date/time cells carry their serial number; the q-columns of a
        // survey export are never dates, so no calendar conversion here
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
    }
}
