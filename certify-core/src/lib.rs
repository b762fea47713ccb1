//! Certify core library - domain types, roster loading, configuration, errors.
//!
//! Public API surface:
//! - [`types`] - [`RosterRow`], [`Roster`], [`BatchResult`]
//! - [`artifact`] - the shared `certificate_<name>.pdf` naming convention
//! - [`roster`] - `.xlsx` / `.csv` roster loading and discovery
//! - [`config`] - YAML configuration with environment overrides
//! - [`error`] - [`RosterError`], [`ConfigError`]

pub mod artifact;
pub mod config;
pub mod error;
pub mod roster;
pub mod types;

pub use artifact::{artifact_file_name, artifact_path};
pub use config::{Config, LetterConfig, SmtpConfig, TlsMode};
pub use error::{ConfigError, RosterError};
pub use types::{BatchResult, Roster, RosterRow};
