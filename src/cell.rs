use std::fmt;

use calamine::Data;
use chrono::{NaiveDateTime, NaiveTime};

/// A decoded, non-empty cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Convert a calamine cell. Empty cells and empty strings yield `None`.
    pub fn from_data(cell: &Data) -> Option<CellValue> {
        let value = match cell {
            Data::Empty => return None,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(n) => CellValue::Number(*n),
            Data::Int(n) => CellValue::Number(*n as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(e) => CellValue::Text(e.to_string()),
            Data::DateTime(dt) => CellValue::Text(
                dt.as_datetime()
                    .map(format_datetime)
                    .unwrap_or_else(|| dt.as_f64().to_string()),
            ),
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
        };
        match &value {
            CellValue::Text(s) if s.is_empty() => None,
            _ => Some(value),
        }
    }

    /// Whether the cell counts as "set" for presence checks such as the
    /// photo column: non-empty text, a non-zero number, or `true`.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Bool(b) => *b,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            // shortest round-trip digits; integral values print without a fraction
            CellValue::Number(n) if *n == 0.0 => f.write_str("0"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

fn format_datetime(dt: NaiveDateTime) -> String {
    if dt.time() == NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// One spreadsheet row keyed by header name, in source column order.
///
/// Only non-empty cells are stored, so a column missing from a row and an
/// empty cell look the same to callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell. A repeated key replaces the earlier value in place.
    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        let column = column.into();
        match self.cells.iter_mut().find(|(k, _)| *k == column) {
            Some((_, v)) => *v = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == column).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v.into());
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn integral_floats_drop_fraction() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from_data(&Data::Int(42)).unwrap().to_string(), "42");
        assert_eq!(CellValue::Number(-0.0).to_string(), "0");
    }

    #[test]
    fn large_numbers_use_shortest_digits() {
        assert_eq!(CellValue::Number(1.2345678901234567e19).to_string(), "12345678901234567000");
        assert_eq!(CellValue::Number(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn empty_cells_are_dropped() {
        assert_eq!(CellValue::from_data(&Data::Empty), None);
        assert_eq!(CellValue::from_data(&Data::String(String::new())), None);
    }

    #[test]
    fn error_cells_show_excel_code() {
        let v = CellValue::from_data(&Data::Error(CellErrorType::Div0)).unwrap();
        assert_eq!(v.to_string(), "#DIV/0!");
    }

    #[test]
    fn truthiness_matches_presence_check() {
        assert!(CellValue::from("x").is_truthy());
        assert!(CellValue::Number(1.0).is_truthy());
        assert!(!CellValue::Number(0.0).is_truthy());
        assert!(!CellValue::Bool(false).is_truthy());
    }

    #[test]
    fn row_keeps_column_order() {
        let row: RawRow = [("Teammate", "Jordan"), ("Name", "Sam"), ("Reason", "great")]
            .into_iter()
            .collect();
        assert_eq!(row.columns().collect::<Vec<_>>(), ["Teammate", "Name", "Reason"]);
        assert_eq!(row.get("Name"), Some(&CellValue::from("Sam")));
        assert_eq!(row.get("Photo"), None);
    }
}
