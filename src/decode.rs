use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::cell::{CellValue, RawRow};
use crate::error::ShoutoutError;

/// A decoded workbook: every sheet in workbook order.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    range: Range<Data>,
}

/// A sheet converted to header-keyed rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRows {
    /// Header names in source column order, after disambiguation.
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Decode `.xlsx` / `.xls` bytes. The format is sniffed from the content,
/// not from the file name.
pub fn decode_workbook(bytes: Vec<u8>) -> Result<Workbook, ShoutoutError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ShoutoutError::Decode(e.to_string()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ShoutoutError::Decode(e.to_string()))?;
        debug!(sheet = %name, size = ?range.get_size(), "decoded sheet");
        sheets.push(Sheet { name, range });
    }
    Ok(Workbook { sheets })
}

impl Workbook {
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn first_sheet(&self) -> Result<&Sheet, ShoutoutError> {
        self.sheets
            .first()
            .ok_or_else(|| ShoutoutError::Decode("workbook contains no sheets".to_string()))
    }
}

impl Sheet {
    pub fn rows(&self) -> SheetRows {
        sheet_rows(&self.range)
    }
}

/// Convert a range to rows keyed by the first row's headers.
///
/// Empty header cells become `__EMPTY`, `__EMPTY_1`, ...; repeated headers
/// become `Name`, `Name_1`, `Name_2`. Rows without any non-empty cell are
/// skipped.
pub fn sheet_rows(range: &Range<Data>) -> SheetRows {
    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return SheetRows::default();
    };

    let headers = header_names(header_row);
    let mut rows = Vec::new();
    for cells in rows_iter {
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(cells) {
            if let Some(value) = CellValue::from_data(cell) {
                row.insert(header.clone(), value);
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    SheetRows { headers, rows }
}

fn header_names(cells: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(cells.len());
    for cell in cells {
        let base = CellValue::from_data(cell)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "__EMPTY".to_string());
        let mut name = base.clone();
        if let Some(count) = seen.get(&base).copied() {
            let mut n = count;
            loop {
                name = format!("{base}_{n}");
                if !seen.contains_key(&name) {
                    break;
                }
                n += 1;
            }
            seen.insert(base.clone(), n + 1);
        } else {
            seen.insert(base.clone(), 1);
        }
        seen.entry(name.clone()).or_insert(1);
        headers.push(name);
    }
    headers
}
