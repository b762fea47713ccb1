//! # certify-renderer
//!
//! Composes one-page certificate PDFs: a raster template as full-bleed
//! background with the recipient's name centered on top.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use certify_renderer::{Renderer, Template};
//!
//! fn render_all(names: &[&str]) {
//!     let renderer = Renderer::new("uploads");
//!     if let Ok(template) = Template::open(Path::new("templates/Training.jpg")) {
//!         for name in names {
//!             match renderer.render(name, &template) {
//!                 Ok(path) => println!("{}", path.display()),
//!                 Err(e) => eprintln!("{e}"),
//!             }
//!         }
//!     }
//! }
//! ```

pub mod engine;
pub mod error;
pub mod metrics;
pub mod template;

pub use engine::{layout, CertificateStyle, Renderer, TextLayout};
pub use error::{RenderCause, RenderError};
pub use template::Template;
