//! Background template image.
//!
//! Loaded once per batch and shared read-only by every render. JPEG templates
//! with gray or RGB data are kept as the original bytes and embedded with
//! `DCTDecode`; everything else is decoded to 8-bit RGB and Flate-compressed
//! when the document is saved.

use std::path::{Path, PathBuf};

use image::{ColorType, ImageFormat};

use crate::error::RenderCause;

/// Pixel payload ready for an image XObject.
#[derive(Debug, Clone)]
pub(crate) enum ImageData {
    Jpeg {
        bytes: Vec<u8>,
        color_space: &'static str,
    },
    Rgb(Vec<u8>),
}

/// A decoded background image and its pixel dimensions.
#[derive(Debug, Clone)]
pub struct Template {
    path: PathBuf,
    width: u32,
    height: u32,
    pub(crate) data: ImageData,
}

impl Template {
    /// Read and decode the image at `path`.
    pub fn open(path: &Path) -> Result<Self, RenderCause> {
        let bytes = std::fs::read(path).map_err(|source| RenderCause::TemplateIo {
            path: path.to_path_buf(),
            source,
        })?;
        let decode_err = |source| RenderCause::TemplateDecode {
            path: path.to_path_buf(),
            source,
        };
        let format = image::guess_format(&bytes).map_err(decode_err)?;
        let decoded = image::load_from_memory_with_format(&bytes, format).map_err(decode_err)?;
        let (width, height) = (decoded.width(), decoded.height());

        let data = match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => ImageData::Jpeg {
                bytes,
                color_space: "DeviceRGB",
            },
            (ImageFormat::Jpeg, ColorType::L8) => ImageData::Jpeg {
                bytes,
                color_space: "DeviceGray",
            },
            _ => ImageData::Rgb(decoded.to_rgb8().into_raw()),
        };

        tracing::debug!(
            "loaded template {} ({}x{}, {:?})",
            path.display(),
            width,
            height,
            format
        );
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `(width, height)` in pixels, which is also the page size in points.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
