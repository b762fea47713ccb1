//! `certify render`: write one certificate per roster row.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use certify_core::{roster, BatchResult, Config, Roster};
use certify_pipeline::render_batch;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Roster spreadsheet (`.xlsx` or `.csv`) with `Name` and `Email` columns.
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Background image (overrides the config's `template`).
    #[arg(long, value_name = "IMAGE")]
    pub template: Option<PathBuf>,

    /// Working directory for rosters and certificates (overrides the config).
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Print the batch result as JSON.
    #[arg(long)]
    pub json: bool,
}

impl RenderArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let result = self.execute(config)?;
        super::print_render(&result, self.json)
    }

    /// Validate inputs, stage the roster in the workdir and render the batch.
    pub fn execute(&self, config: &Config) -> Result<BatchResult> {
        let template = self.template.as_deref().unwrap_or(&config.template);
        let workdir = self.workdir.as_deref().unwrap_or(&config.workdir);

        if !template.is_file() {
            bail!("Certificate template {} not found", template.display());
        }

        let roster = roster::load_at(&self.roster)
            .with_context(|| format!("failed to read roster {}", self.roster.display()))?;
        if roster.is_empty() {
            tracing::warn!("roster {} has no rows", roster.source().display());
        } else {
            tracing::info!("loaded {} rows from {}", roster.len(), roster.source().display());
        }
        stage_roster(&roster, workdir)?;

        Ok(render_batch(&roster.rows, template, workdir))
    }
}

/// Copy the roster into `workdir` so a later `send` can discover it.
fn stage_roster(roster: &Roster, workdir: &Path) -> Result<()> {
    let Some(file_name) = roster.source().file_name() else {
        return Ok(());
    };
    std::fs::create_dir_all(workdir)
        .with_context(|| format!("failed to create {}", workdir.display()))?;

    let dest = workdir.join(file_name);
    let same = match (dest.canonicalize(), roster.source().canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if !same {
        std::fs::copy(roster.source(), &dest).with_context(|| {
            format!(
                "failed to copy {} to {}",
                roster.source().display(),
                dest.display()
            )
        })?;
        tracing::debug!("staged roster at {}", dest.display());
    }
    Ok(())
}
