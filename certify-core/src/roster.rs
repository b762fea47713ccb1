//! Roster ingestion.
//!
//! A roster is a spreadsheet (`.xlsx`, first worksheet) or a `.csv` file whose
//! header row names at least the `Name` and `Email` columns. Extra columns are
//! ignored. Rows keep their file order.
//!
//! # API pattern
//!
//! - [`load_at`] - read and validate an explicit roster file
//! - [`discover_at`] - deterministic fallback, the first roster file in a
//!   directory by sorted file name

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{roster_io, RosterError};
use crate::types::{Roster, RosterRow};

pub const NAME_COLUMN: &str = "Name";
pub const EMAIL_COLUMN: &str = "Email";

const EXTENSIONS: &[&str] = &["xlsx", "csv"];

// ---------------------------------------------------------------------------
// 1. Format detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Xlsx,
    Csv,
}

fn format_of(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" => Some(Format::Xlsx),
        "csv" => Some(Format::Csv),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load and validate the roster at `path`.
///
/// Returns `RosterError::MissingColumns` when the header lacks `Name` or
/// `Email`, and `RosterError::EmptyField` for a row with exactly one of the
/// two filled in. Fully blank rows are skipped.
pub fn load_at(path: &Path) -> Result<Roster, RosterError> {
    let Some(format) = format_of(path) else {
        return Err(RosterError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    };
    if !path.exists() {
        return Err(roster_io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "roster file does not exist"),
        ));
    }

    let (table, header_row) = match format {
        Format::Xlsx => read_xlsx(path)?,
        Format::Csv => (read_csv(path)?, 1),
    };
    let rows = rows_from_table(table, header_row)?;
    tracing::debug!("loaded {} roster rows from {}", rows.len(), path.display());
    Ok(Roster::new(path, rows))
}

/// Cells of the first worksheet plus the 1-based sheet row of the header.
///
/// calamine trims leading empty rows from the range, so the header is not
/// necessarily row 1.
fn read_xlsx(path: &Path) -> Result<(Vec<Vec<String>>, usize), RosterError> {
    let spreadsheet = |source| RosterError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(spreadsheet)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RosterError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(spreadsheet)?;

    let header_row = range.start().map_or(1, |(row, _)| row as usize + 1);
    let table = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    Ok((table, header_row))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn read_csv(path: &Path) -> Result<Vec<Vec<String>>, RosterError> {
    let csv_err = |source| RosterError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let mut table = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        table.push(record.iter().map(str::to_owned).collect());
    }
    Ok(table)
}

/// Turn a header-first table into validated rows.
///
/// `header_row` is the sheet row number of the header, used in `EmptyField`.
fn rows_from_table(table: Vec<Vec<String>>, header_row: usize) -> Result<Vec<RosterRow>, RosterError> {
    let mut lines = table.into_iter();
    let header = lines.next().unwrap_or_default();
    let column = |wanted: &str| header.iter().position(|h| h.trim() == wanted);

    let (name_idx, email_idx) = match (column(NAME_COLUMN), column(EMAIL_COLUMN)) {
        (Some(n), Some(e)) => (n, e),
        (n, e) => {
            let mut missing = Vec::new();
            if n.is_none() {
                missing.push(NAME_COLUMN.to_string());
            }
            if e.is_none() {
                missing.push(EMAIL_COLUMN.to_string());
            }
            return Err(RosterError::MissingColumns { missing });
        }
    };

    let mut rows = Vec::new();
    // Row numbers match what a spreadsheet shows.
    for (offset, line) in lines.enumerate() {
        let row_number = header_row + offset + 1;
        let field = |idx: usize| line.get(idx).map(|s| s.trim()).unwrap_or("");
        let (name, email) = (field(name_idx), field(email_idx));

        match (name.is_empty(), email.is_empty()) {
            (true, true) => continue,
            (true, false) => {
                return Err(RosterError::EmptyField {
                    row: row_number,
                    column: NAME_COLUMN,
                })
            }
            (false, true) => {
                return Err(RosterError::EmptyField {
                    row: row_number,
                    column: EMAIL_COLUMN,
                })
            }
            (false, false) => {}
        }
        if let Some(row) = RosterRow::new(name, email) {
            rows.push(row);
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// 3. Discovery
// ---------------------------------------------------------------------------

/// Return the first roster file in `dir`, ordered by file name.
///
/// Returns `RosterError::SourceNotFound` if the directory is missing or holds
/// no `.xlsx` / `.csv` file.
pub fn discover_at(dir: &Path) -> Result<PathBuf, RosterError> {
    if !dir.is_dir() {
        return Err(RosterError::SourceNotFound {
            dir: dir.to_path_buf(),
        });
    }

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| roster_io(dir, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|s| s.to_str())
                .map(|ext| EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    candidates.sort_by_key(|p| p.file_name().map(|n| n.to_owned()));

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| RosterError::SourceNotFound {
            dir: dir.to_path_buf(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
