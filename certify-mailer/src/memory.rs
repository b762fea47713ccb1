//! In-memory transport: records messages instead of delivering them.
//!
//! Backs `certify send --dry-run`, and lets the pipeline be exercised without
//! a relay. Failures can be scripted per recipient or for the whole session.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use lettre::Message;

use crate::error::MailError;
use crate::transport::{MailSession, MailTransport};

/// A message captured by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: Vec<String>,
    pub raw: Vec<u8>,
}

impl SentMessage {
    pub fn raw_text(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }
}

#[derive(Debug, Default)]
struct Outbox {
    sessions_opened: usize,
    sessions_closed: usize,
    sent: Vec<SentMessage>,
}

/// Transport that keeps every accepted message in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    outbox: Rc<RefCell<Outbox>>,
    open_failure: Option<String>,
    rejected: BTreeSet<String>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make [`MailTransport::open`] fail with `reason`.
    pub fn failing_open(mut self, reason: impl Into<String>) -> Self {
        self.open_failure = Some(reason.into());
        self
    }

    /// Refuse messages addressed to `address`.
    pub fn rejecting(mut self, address: impl Into<String>) -> Self {
        self.rejected.insert(address.into());
        self
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.outbox.borrow().sent.clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.outbox.borrow().sessions_opened
    }

    pub fn sessions_closed(&self) -> usize {
        self.outbox.borrow().sessions_closed
    }
}

impl MailTransport for MemoryTransport {
    type Session = MemorySession;

    fn open(&self) -> Result<MemorySession, MailError> {
        if let Some(reason) = &self.open_failure {
            return Err(MailError::Session(reason.clone()));
        }
        self.outbox.borrow_mut().sessions_opened += 1;
        Ok(MemorySession {
            outbox: Rc::clone(&self.outbox),
            rejected: self.rejected.clone(),
        })
    }
}

/// Session handle writing into the shared outbox.
#[derive(Debug)]
pub struct MemorySession {
    outbox: Rc<RefCell<Outbox>>,
    rejected: BTreeSet<String>,
}

impl MailSession for MemorySession {
    fn send(&mut self, message: &Message) -> Result<(), MailError> {
        let to: Vec<String> = message.envelope().to().iter().map(|a| a.to_string()).collect();
        if let Some(bad) = to.iter().find(|a| self.rejected.contains(*a)) {
            return Err(MailError::Send(format!("550 recipient rejected: {bad}")));
        }
        self.outbox.borrow_mut().sent.push(SentMessage {
            to,
            raw: message.formatted(),
        });
        Ok(())
    }

    fn close(self) -> Result<(), MailError> {
        self.outbox.borrow_mut().sessions_closed += 1;
        Ok(())
    }
}
