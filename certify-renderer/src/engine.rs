//! Certificate composition - [`CertificateStyle`] and [`Renderer`].
//!
//! # Page layout
//!
//! | Element    | Placement                                              |
//! |------------|--------------------------------------------------------|
//! | MediaBox   | `[0 0 width height]`, 1 template pixel = 1 pt          |
//! | Background | image XObject `Im0`, scaled to the full page           |
//! | Name       | upper-cased, Helvetica-Bold, centered on x, baseline y |

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use certify_core::artifact::{artifact_path, is_flat_name};

use crate::error::{io_err, RenderCause, RenderError};
use crate::metrics;
use crate::template::{ImageData, Template};

const FONT_RESOURCE: &str = "F1";
const IMAGE_RESOURCE: &str = "Im0";
const BASE_FONT: &str = "Helvetica-Bold";

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Fixed typography for the printed name.
///
/// These values belong to one template design; they are not derived from the
/// template's size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CertificateStyle {
    pub font_size: f32,
    /// Baseline distance from the bottom edge, in points.
    pub baseline: f32,
    pub color: [u8; 3],
}

impl Default for CertificateStyle {
    fn default() -> Self {
        Self {
            font_size: 64.0,
            baseline: 660.0,
            color: [29, 54, 84],
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Where and what to draw for one name.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Upper-cased display text.
    pub text: String,
    /// `text` as WinAnsi bytes.
    pub encoded: Vec<u8>,
    pub width: f32,
    pub x: f32,
    pub y: f32,
}

/// Upper-case `name` and center it on a page `page_width` points wide.
pub fn layout(name: &str, page_width: f32, style: &CertificateStyle) -> Result<TextLayout, RenderCause> {
    let text = name.to_uppercase();
    let (encoded, width) = metrics::encode_and_measure(&text, style.font_size)?;
    let x = (page_width - width) / 2.0;
    if x < 0.0 {
        tracing::warn!("'{text}' is wider than the page ({width:.1} > {page_width})");
    }
    Ok(TextLayout {
        text,
        encoded,
        width,
        x,
        y: style.baseline,
    })
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Writes certificates into a working directory.
#[derive(Debug, Clone)]
pub struct Renderer {
    workdir: PathBuf,
    style: CertificateStyle,
}

impl Renderer {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            style: CertificateStyle::default(),
        }
    }

    pub fn with_style(mut self, style: CertificateStyle) -> Self {
        self.style = style;
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Load the template at `template_path` and render one certificate.
    pub fn render_from_path(&self, name: &str, template_path: &Path) -> Result<PathBuf, RenderError> {
        let template = Template::open(template_path).map_err(|e| RenderError::new(name, e))?;
        self.render(name, &template)
    }

    /// Render `name` over `template` and write `certificate_<name>.pdf`.
    ///
    /// An existing artifact with the same name is replaced.
    pub fn render(&self, name: &str, template: &Template) -> Result<PathBuf, RenderError> {
        self.render_inner(name, template)
            .map_err(|cause| RenderError::new(name, cause))
    }

    fn render_inner(&self, name: &str, template: &Template) -> Result<PathBuf, RenderCause> {
        if !is_flat_name(name) {
            return Err(RenderCause::InvalidName(name.to_string()));
        }
        let (width, _) = template.dimensions();
        let text = layout(name, width as f32, &self.style)?;
        let pdf = compose(template, &text, &self.style)?;

        let path = artifact_path(name, &self.workdir);
        write_atomic(&path, &pdf)?;
        tracing::info!("wrote: {}", path.display());
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// PDF composition
// ---------------------------------------------------------------------------

fn image_stream(template: &Template) -> Stream {
    let (width, height) = template.dimensions();
    match &template.data {
        ImageData::Jpeg { bytes, color_space } => Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => *color_space,
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            bytes.clone(),
        )
        .with_compression(false),
        ImageData::Rgb(raw) => Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            raw.clone(),
        ),
    }
}

fn page_operations(page: (f32, f32), text: &TextLayout, style: &CertificateStyle) -> Vec<Operation> {
    let (width, height) = page;
    let [r, g, b] = style.color.map(|c| f32::from(c) / 255.0);
    vec![
        // Background.
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                width.into(),
                0.into(),
                0.into(),
                height.into(),
                0.into(),
                0.into(),
            ],
        ),
        Operation::new("Do", vec![Object::Name(IMAGE_RESOURCE.into())]),
        Operation::new("Q", vec![]),
        // Name.
        Operation::new("BT", vec![]),
        Operation::new("rg", vec![r.into(), g.into(), b.into()]),
        Operation::new(
            "Tf",
            vec![Object::Name(FONT_RESOURCE.into()), style.font_size.into()],
        ),
        Operation::new("Td", vec![text.x.into(), text.y.into()]),
        Operation::new("Tj", vec![Object::string_literal(text.encoded.clone())]),
        Operation::new("ET", vec![]),
    ]
}

/// Build the single-page PDF and return its bytes.
fn compose(template: &Template, text: &TextLayout, style: &CertificateStyle) -> Result<Vec<u8>, RenderCause> {
    let (width, height) = template.dimensions();
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => BASE_FONT,
        "Encoding" => "WinAnsiEncoding",
    });
    let image_id = doc.add_object(image_stream(template));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT_RESOURCE => font_id },
        "XObject" => dictionary! { IMAGE_RESOURCE => image_id },
    });

    let content = Content {
        operations: page_operations((width as f32, height as f32), text, style),
    };
    let encoded = content.encode().map_err(|e| RenderCause::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), i64::from(width).into(), i64::from(height).into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| RenderCause::Pdf(e.to_string()))?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Write `bytes` to `<path>.certify.tmp`, then rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), RenderCause> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let tmp = PathBuf::from(format!("{}.certify.tmp", path.display()));
    std::fs::write(&tmp, bytes).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
