//! Domain types shared by the render and send phases.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// One recipient: the name printed on the certificate and the address it is
/// mailed to. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    pub name: String,
    pub email: String,
}

impl RosterRow {
    /// Build a row, trimming both fields. Returns `None` if either is blank.
    pub fn new(name: impl AsRef<str>, email: impl AsRef<str>) -> Option<Self> {
        let name = name.as_ref().trim();
        let email = email.as_ref().trim();
        if name.is_empty() || email.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }
}

impl fmt::Display for RosterRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// An ordered roster together with the file it was read from.
///
/// The source path is the roster's identity: both phases of a batch are
/// handed the same `Roster` rather than re-discovering a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub source: PathBuf,
    pub rows: Vec<RosterRow>,
}

impl Roster {
    pub fn new(source: impl Into<PathBuf>, rows: Vec<RosterRow>) -> Self {
        Self {
            source: source.into(),
            rows,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Batch outcome
// ---------------------------------------------------------------------------

/// Outcome of one pass over a roster.
///
/// `errors` holds one human-readable message per failing row, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub errors: Vec<String>,
    pub success_count: usize,
}

impl BatchResult {
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// `true` when no row failed.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rows attempted: every row either succeeded or produced one error.
    pub fn attempted(&self) -> usize {
        self.errors.len() + self.success_count
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
