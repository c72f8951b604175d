//! Multi-sheet tabular documents.
//!
//! A taxonomy document is read once into memory as formatted cell text on an
//! absolute row/column grid, so the loader can address "row 3, column 1"
//! regardless of where a sheet's used range starts.
//!
//! Two physical layouts are supported:
//!
//! - a spreadsheet file (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`), read with
//!   `calamine`;
//! - a directory of CSV files, one per sheet, where the file stem is the
//!   sheet name.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::error::DocumentError;
use crate::hash::{Fingerprint, sha256_hex};

/// One sheet of formatted cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Build a sheet from string-like rows.
    pub fn from_rows<R, C, S>(name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::new(name, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell text at an absolute position; missing cells read as `""`.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }

    /// Rows with their absolute index.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (idx, row.as_slice()))
    }
}

/// An ordered set of sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sheets: Vec<Sheet>,
    fingerprint: Option<String>,
}

impl Document {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self {
            sheets,
            fingerprint: None,
        }
    }

    /// Read a spreadsheet file or a directory of CSV sheets.
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let document = if path.is_dir() {
            read_csv_directory(path)?
        } else {
            read_workbook(path)?
        };
        debug!(
            path = %path.display(),
            sheet_count = document.sheets.len(),
            sheets = ?document.sheet_names().collect::<Vec<_>>(),
            "taxonomy document read"
        );
        Ok(document)
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(Sheet::name)
    }

    /// SHA-256 of the source bytes, when read from disk.
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }
}

fn read_workbook(path: &Path) -> Result<Document, DocumentError> {
    let bytes = std::fs::read(path).map_err(|e| DocumentError::io(path, e))?;
    let fingerprint = sha256_hex(&bytes);

    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| DocumentError::Workbook {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| DocumentError::Sheet {
                path: path.to_path_buf(),
                sheet: name.clone(),
                source: e,
            })?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        if let Some((start_row, start_col)) = range.start() {
            let (start_row, start_col) = (start_row as usize, start_col as usize);
            rows.resize(start_row, Vec::new());
            for cells in range.rows() {
                let mut row = vec![String::new(); start_col];
                row.extend(cells.iter().map(cell_text));
                rows.push(row);
            }
        }
        sheets.push(Sheet::new(name, rows));
    }

    if sheets.is_empty() {
        return Err(DocumentError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(Document {
        sheets,
        fingerprint: Some(fingerprint),
    })
}

fn read_csv_directory(dir: &Path) -> Result<Document, DocumentError> {
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| DocumentError::io(dir, e))? {
        let entry = entry.map_err(|e| DocumentError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|v| v.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|v| v.to_str()) else {
            continue;
        };
        files.push((stem.to_string(), path));
    }
    files.sort();

    if files.is_empty() {
        return Err(DocumentError::Empty {
            path: dir.to_path_buf(),
        });
    }

    let mut fingerprint = Fingerprint::default();
    let mut sheets = Vec::with_capacity(files.len());
    for (name, path) in files {
        let bytes = std::fs::read(&path).map_err(|e| DocumentError::io(&path, e))?;
        fingerprint.update(&name, &bytes);
        let rows = parse_csv_rows(&path, &bytes)?;
        sheets.push(Sheet::new(name, rows));
    }

    Ok(Document {
        sheets,
        fingerprint: Some(fingerprint.finish()),
    })
}

/// Parse CSV bytes onto the same absolute row grid a workbook gives.
///
/// The `csv` reader skips empty lines and reports a record's position from
/// before the skipped lines, so the row is recovered by counting line breaks
/// up to the record's first byte, less those embedded in quoted fields.
fn parse_csv_rows(path: &Path, bytes: &[u8]) -> Result<Vec<Vec<String>>, DocumentError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut scanned = 0usize;
    let mut line_breaks = 0usize;
    let mut embedded_breaks = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| DocumentError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        if let Some(position) = record.position() {
            let mut start = usize::try_from(position.byte())
                .map_or(bytes.len(), |byte| byte.min(bytes.len()));
            while matches!(bytes.get(start).copied(), Some(b'\r' | b'\n')) {
                start += 1;
            }
            if start > scanned {
                line_breaks += bytes[scanned..start]
                    .iter()
                    .filter(|byte| **byte == b'\n')
                    .count();
                scanned = start;
            }
            let row = line_breaks.saturating_sub(embedded_breaks);
            if row > rows.len() {
                rows.resize(row, Vec::new());
            }
        }
        embedded_breaks += record
            .iter()
            .map(|value| value.matches('\n').count())
            .sum::<usize>();
        rows.push(
            record
                .iter()
                .map(|value| value.trim_matches('\u{feff}').trim().to_string())
                .collect(),
        );
    }
    Ok(rows)
}

/// Format a cell the way a spreadsheet shows it under the "General" format.
pub(crate) fn cell_text(cell: &Data) -> String {
    let text = match cell {
        Data::Empty => return String::new(),
        Data::Float(value) => format_number(*value),
        Data::DateTime(value) => format_number(value.as_f64()),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    };
    text.trim().to_string()
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
