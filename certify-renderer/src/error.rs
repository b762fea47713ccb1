//! Error types for certify-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// A certificate could not be produced for one recipient.
///
/// Displays as `Error creating certificate for <name>: <cause>`, the message
/// the batch pipeline records for the row.
#[derive(Debug, Error)]
#[error("Error creating certificate for {name}: {cause}")]
pub struct RenderError {
    pub name: String,
    #[source]
    pub cause: RenderCause,
}

impl RenderError {
    pub fn new(name: impl Into<String>, cause: RenderCause) -> Self {
        Self {
            name: name.into(),
            cause,
        }
    }
}

/// What went wrong while rendering.
#[derive(Debug, Error)]
pub enum RenderCause {
    /// The template file could not be read.
    #[error("cannot read template {path}: {source}")]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template bytes are not a decodable raster image.
    #[error("cannot decode template {path}: {source}")]
    TemplateDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The name contains a character Helvetica-Bold cannot draw.
    #[error("cannot measure text: no Helvetica-Bold glyph for {ch:?}")]
    UnsupportedGlyph { ch: char },

    /// The name cannot form a flat file name inside the working directory.
    #[error("name {0:?} cannot be used as a file name")]
    InvalidName(String),

    /// lopdf failed to encode the page.
    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    /// Filesystem error while writing the artifact.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderCause {
    RenderCause::Io {
        path: path.into(),
        source,
    }
}
