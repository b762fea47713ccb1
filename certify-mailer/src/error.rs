//! Error types for certify-mailer.

use thiserror::Error;

use certify_core::ConfigError;

/// All errors that can arise while composing or delivering mail.
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP settings are incomplete.
    #[error("mail config error: {0}")]
    Config(#[from] ConfigError),

    /// A sender or recipient address does not parse.
    #[error("invalid email address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The MIME message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// The body template failed to render.
    #[error("template engine error: {0}")]
    Template(#[from] tera::Error),

    /// Connecting or authenticating to the relay failed.
    #[error("SMTP session error: {0}")]
    Session(String),

    /// The relay refused or failed one message.
    #[error("SMTP error: {0}")]
    Send(String),
}

impl From<lettre::error::Error> for MailError {
    fn from(e: lettre::error::Error) -> Self {
        MailError::Build(e.to_string())
    }
}
