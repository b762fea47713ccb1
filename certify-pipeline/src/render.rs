//! Render phase: one certificate per roster row.

use std::path::Path;

use certify_core::{BatchResult, RosterRow};
use certify_renderer::{Renderer, Template};

/// Render a certificate for every row into `workdir`.
///
/// The template is decoded once. Row failures are recorded in order and never
/// stop the batch; `errors.len() + success_count == rows.len()` always holds.
pub fn render_batch(rows: &[RosterRow], template_path: &Path, workdir: &Path) -> BatchResult {
    let renderer = Renderer::new(workdir);
    match Template::open(template_path) {
        Ok(template) => render_rows(&renderer, &template, rows),
        Err(cause) => {
            tracing::warn!("template unusable, failing all {} rows: {cause}", rows.len());
            let mut result = BatchResult::default();
            for row in rows {
                result.record_error(format!(
                    "Error creating certificate for {}: {cause}",
                    row.name
                ));
            }
            result
        }
    }
}

/// Render every row with an already-loaded template.
pub fn render_rows(renderer: &Renderer, template: &Template, rows: &[RosterRow]) -> BatchResult {
    tracing::info!(
        "rendering {} rows over {} into {}",
        rows.len(),
        template.path().display(),
        renderer.workdir().display()
    );
    let mut result = BatchResult::default();
    for row in rows {
        match renderer.render(&row.name, template) {
            Ok(_) => result.record_success(),
            Err(e) => {
                tracing::warn!("{e}");
                result.record_error(e.to_string());
            }
        }
    }
    tracing::info!(
        "render batch finished: {} written, {} failed",
        result.success_count,
        result.errors.len()
    );
    result
}
