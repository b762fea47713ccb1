//! # certify-pipeline
//!
//! Batch orchestration over a roster.
//!
//! Call [`render_batch`] to write one certificate per row, then (later, as a
//! separate step) [`send_batch`] to mail them. Both return a
//! [`BatchResult`](certify_core::BatchResult): row failures are collected,
//! only phase-level failures come back as [`PipelineError`].

pub mod error;
pub mod render;
pub mod send;

pub use error::{PipelineError, RowFailure};
pub use render::{render_batch, render_rows};
pub use send::{resolve_roster, send_batch};
