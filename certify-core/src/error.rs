//! Error types for certify-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading or discovering a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Underlying I/O failure, with the path that was being read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet could not be opened or parsed.
    #[error("failed to read spreadsheet {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// The spreadsheet has no worksheet to read rows from.
    #[error("spreadsheet {path} has no worksheets")]
    NoWorksheet { path: PathBuf },

    /// The CSV file could not be parsed.
    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Only `.xlsx` and `.csv` rosters are understood.
    #[error("unsupported roster format at {path}; expected .xlsx or .csv")]
    UnsupportedFormat { path: PathBuf },

    /// Header row lacks one or more required columns.
    #[error("Missing columns in the uploaded file: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A row has one required field filled in and the other left blank.
    #[error("row {row}: column '{column}' is empty")]
    EmptyField { row: usize, column: &'static str },

    /// No roster file was found in the working directory.
    #[error("No roster file found in {dir}. Please upload a file first.")]
    SourceNotFound { dir: PathBuf },
}

/// All errors that can arise while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, with the path that was being read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A value that must be present after env overrides is still missing.
    #[error("missing required config value: {0}")]
    Missing(&'static str),
}

pub(crate) fn roster_io(path: impl Into<PathBuf>, source: std::io::Error) -> RosterError {
    RosterError::Io {
        path: path.into(),
        source,
    }
}
