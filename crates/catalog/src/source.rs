//! Tabular catalog sources.
//!
//! Spreadsheets (`.xlsx`, `.xls`, `.ods`, ...) go through `calamine`, `.csv`
//! files through `csv`. Both are flattened into a [`Table`] of [`Cell`]s with
//! the first row as headers.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::CatalogLoadError;

/// One cell of the source table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    /// Blank text and the `nan` export sentinel count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => {
                let s = s.trim();
                s.is_empty() || s.eq_ignore_ascii_case("nan")
            }
            _ => false,
        }
    }

    /// Text rendering of a present cell; `None` when missing.
    pub fn text(&self) -> Option<String> {
        if self.is_missing() {
            return None;
        }
        Some(match self {
            Cell::Text(s) => s.trim().to_string(),
            other => other.to_string(),
        })
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(v) => write!(f, "{v}"),
            // Spreadsheets store whole numbers as floats; print them without ".0".
            Cell::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::Int(v) => Cell::Int(*v),
            Data::Float(v) => Cell::Float(*v),
            Data::Bool(v) => Cell::Bool(*v),
            Data::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

/// Header row plus data rows. Rows may be shorter than the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Position of a column, comparing header names after trimming whitespace.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }
}

/// Read the first worksheet (or the CSV file) at `path`.
pub fn read_table(path: &Path) -> Result<Table, CatalogLoadError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        read_csv(path)
    } else {
        read_spreadsheet(path)
    }
}

fn read_spreadsheet(path: &Path) -> Result<Table, CatalogLoadError> {
    let spreadsheet_err = |source| CatalogLoadError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CatalogLoadError::NoWorksheet(path.to_path_buf()))?
        .map_err(spreadsheet_err)?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| header.iter().map(|c| c.to_string().trim().to_string()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();

    Ok(Table::new(headers, rows))
}

fn read_csv(path: &Path) -> Result<Table, CatalogLoadError> {
    let csv_err = |source| CatalogLoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader
        .byte_headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();

    // Byte records: a field that is not valid UTF-8 is decoded lossily
    // instead of failing the whole file.
    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(csv_err)?;
        rows.push(
            record
                .iter()
                .map(|field| Cell::from(String::from_utf8_lossy(field).as_ref()))
                .collect(),
        );
    }

    Ok(Table::new(headers, rows))
}
