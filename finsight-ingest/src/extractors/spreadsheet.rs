//! Spreadsheet extractor: first sheet of an xlsx/xls workbook, first row as
//! headers.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDate;
use finsight_core::PipelineError;

use crate::types::{RawRecord, canonical_header};

/// Parse workbook bytes into header-keyed raw records.
pub fn extract_spreadsheet(bytes: &[u8]) -> Result<Vec<RawRecord>, PipelineError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| PipelineError::extraction("opening workbook", e))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PipelineError::ExtractionFailure("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| PipelineError::extraction("reading first sheet", e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row
            .iter()
            .map(|cell| canonical_header(&cell_to_string(cell)))
            .collect(),
        None => {
            return Err(PipelineError::EmptyInput(
                "first sheet is empty; expected a header row".to_string(),
            ));
        }
    };

    let mut out = Vec::new();
    for row in rows {
        let mut raw = RawRecord::new();
        for (i, cell) in row.iter().enumerate() {
            if let Some(name) = headers.get(i) {
                if name.is_empty() {
                    continue;
                }
                raw.push(name, &cell_to_string(cell));
            }
        }
        if raw.is_blank() {
            continue;
        }
        out.push(raw);
    }

    if out.is_empty() {
        return Err(PipelineError::EmptyInput(
            "spreadsheet had no data rows below the header".to_string(),
        ));
    }
    Ok(out)
}

/// Render a cell as the string the normalizer will see.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_float(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Excel serial dates count days since 1899-12-30.
fn excel_serial_to_date(serial: f64) -> String {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|base| base.checked_add_signed(chrono::Duration::days(serial.floor() as i64)))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
