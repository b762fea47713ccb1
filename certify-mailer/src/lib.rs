//! # certify-mailer
//!
//! Certificate email composition and delivery.
//!
//! [`Composer`] turns a roster row plus its PDF into a MIME message;
//! [`MailTransport`] opens one [`MailSession`] per batch. [`SmtpMailer`] talks
//! to a real relay over TLS, [`MemoryTransport`] records messages for dry runs.

pub mod error;
pub mod letter;
pub mod memory;
pub mod transport;

pub use error::MailError;
pub use letter::{Composer, PdfAttachment};
pub use memory::{MemoryTransport, SentMessage};
pub use transport::{MailSession, MailTransport, SmtpMailer};
