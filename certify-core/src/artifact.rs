//! Certificate artifact naming.
//!
//! The render phase writes and the send phase reads the same file, so both
//! go through [`artifact_path`]. The name keeps its original case; only the
//! text drawn on the page is upper-cased.
//!
//! ```text
//! <workdir>/certificate_<name>.pdf
//! ```

use std::path::{Path, PathBuf};

const PREFIX: &str = "certificate_";
const EXTENSION: &str = "pdf";

/// `certificate_<name>.pdf`, pure, no I/O.
pub fn artifact_file_name(name: &str) -> String {
    format!("{PREFIX}{name}.{EXTENSION}")
}

/// `<workdir>/certificate_<name>.pdf`, pure, no I/O.
pub fn artifact_path(name: &str, workdir: &Path) -> PathBuf {
    workdir.join(artifact_file_name(name))
}

/// Whether `name` yields a file directly inside the working directory.
///
/// Names containing a path separator or NUL would escape the flat layout.
pub fn is_flat_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\', '\0'])
}
