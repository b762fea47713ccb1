//! Error types for certify-pipeline.
//!
//! [`PipelineError`] aborts a whole phase. [`RowFailure`] is one row's
//! problem; the batch loop folds it into the `BatchResult` and moves on.

use std::path::PathBuf;

use thiserror::Error;

use certify_core::RosterError;
use certify_mailer::MailError;

/// Phase-level failures, returned to the caller immediately.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The shared SMTP session could not be established.
    #[error("Error sending emails: {0}")]
    Session(#[source] MailError),

    /// The roster could not be found or loaded.
    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Why one row of the send phase did not go out.
#[derive(Debug, Error)]
pub enum RowFailure {
    /// The certificate for this name was never rendered or was removed.
    #[error("Certificate not found for {name}")]
    ArtifactMissing { name: String },

    /// The certificate exists but could not be read.
    #[error("Error sending email to {email}: cannot read {path}: {source}")]
    Read {
        email: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Composing or delivering the message failed.
    #[error("Error sending email to {email}: {source}")]
    Send {
        email: String,
        #[source]
        source: MailError,
    },
}
