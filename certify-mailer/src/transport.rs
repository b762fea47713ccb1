//! Mail transport seam - [`MailTransport`] / [`MailSession`] and the SMTP
//! implementation.
//!
//! A transport opens one session per batch. Opening connects, negotiates TLS
//! and authenticates, so a bad password surfaces before any row is touched.
//! Every message of the batch then goes through that session.

use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::PoolConfig;
use lettre::{Message, SmtpTransport, Transport};

use certify_core::{SmtpConfig, TlsMode};

use crate::error::MailError;

/// Opens sessions against a mail relay.
pub trait MailTransport {
    type Session: MailSession;

    /// Connect and authenticate. Failure aborts the whole send phase.
    fn open(&self) -> Result<Self::Session, MailError>;
}

/// One authenticated connection reused for every message in a batch.
pub trait MailSession {
    /// Deliver one message. Failure affects only that message.
    fn send(&mut self, message: &Message) -> Result<(), MailError>;

    /// End the session.
    fn close(self) -> Result<(), MailError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SMTP
// ---------------------------------------------------------------------------

/// Blocking SMTP relay, always encrypted (implicit TLS or STARTTLS).
#[derive(Clone)]
pub struct SmtpMailer {
    transport: SmtpTransport,
    host: String,
}

impl SmtpMailer {
    /// Build a mailer from config. Requires username and password.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailError> {
        let (user, pass) = config.credentials()?;
        let builder = match config.tls {
            TlsMode::Tls => SmtpTransport::relay(&config.host),
            TlsMode::Starttls => SmtpTransport::starttls_relay(&config.host),
        }
        .map_err(|e| MailError::Session(e.to_string()))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            // One pooled connection: the whole batch shares it.
            .pool_config(PoolConfig::new().max_size(1))
            .build();

        Ok(Self {
            transport,
            host: config.host.clone(),
        })
    }
}

impl MailTransport for SmtpMailer {
    type Session = SmtpSession;

    fn open(&self) -> Result<SmtpSession, MailError> {
        match self.transport.test_connection() {
            Ok(true) => {
                tracing::info!("SMTP session open: {}", self.host);
                Ok(SmtpSession {
                    transport: self.transport.clone(),
                })
            }
            Ok(false) => Err(MailError::Session(format!(
                "{} did not accept the connection",
                self.host
            ))),
            Err(e) => Err(MailError::Session(format!("{}: {e}", self.host))),
        }
    }
}

/// Session handle over the pooled SMTP connection.
pub struct SmtpSession {
    transport: SmtpTransport,
}

impl MailSession for SmtpSession {
    fn send(&mut self, message: &Message) -> Result<(), MailError> {
        self.transport
            .send(message)
            .map(|_| ())
            .map_err(|e| MailError::Send(e.to_string()))
    }

    /// Send QUIT on the pooled connection and drop it.
    fn close(self) -> Result<(), MailError> {
        self.transport.shutdown();
        tracing::debug!("SMTP session closed");
        Ok(())
    }
}
