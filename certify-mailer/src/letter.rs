//! Certificate email composition.
//!
//! The plain-text body is a tera template baked into the binary via
//! `include_str!`; the subject and event wording come from [`LetterConfig`].

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;
use serde::Serialize;
use tera::{Context, Tera};

use certify_core::{LetterConfig, RosterRow};

use crate::error::MailError;

const BODY_TEMPLATE: &str = "certificate_email.txt";
const BODY_SOURCE: &str = include_str!("templates/certificate_email.txt.tera");
const PDF_MIME: &str = "application/pdf";

/// Values interpolated into the body template.
#[derive(Debug, Serialize)]
struct BodyContext<'a> {
    name: &'a str,
    event: &'a str,
    organization: &'a str,
}

/// A file to attach, named as the recipient will see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Builds one message per roster row.
#[derive(Debug)]
pub struct Composer {
    tera: Tera,
    from: Mailbox,
    letter: LetterConfig,
}

impl Composer {
    /// Create a composer sending as `from`.
    pub fn new(from: &str, letter: LetterConfig) -> Result<Self, MailError> {
        let mut tera = Tera::default();
        tera.add_raw_template(BODY_TEMPLATE, BODY_SOURCE)?;
        Ok(Self {
            tera,
            from: parse_mailbox(from)?,
            letter,
        })
    }

    pub fn subject(&self) -> &str {
        &self.letter.subject
    }

    /// Render the plain-text body for `name`.
    pub fn body(&self, name: &str) -> Result<String, MailError> {
        let ctx = Context::from_serialize(BodyContext {
            name,
            event: &self.letter.event,
            organization: &self.letter.organization,
        })?;
        Ok(self.tera.render(BODY_TEMPLATE, &ctx)?)
    }

    /// Assemble the message for `row` with `attachment` as a PDF part.
    pub fn compose(&self, row: &RosterRow, attachment: PdfAttachment) -> Result<Message, MailError> {
        let to = parse_mailbox(&row.email)?;
        let content_type =
            ContentType::parse(PDF_MIME).map_err(|e| MailError::Build(e.to_string()))?;
        let pdf = Attachment::new(attachment.file_name).body(attachment.bytes, content_type);

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(self.subject())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(self.body(&row.name)?))
                    .singlepart(pdf),
            )?;
        Ok(message)
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse::<Mailbox>().map_err(|source| MailError::Address {
        address: address.to_string(),
        source,
    })
}
