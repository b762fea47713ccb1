//! `certify run`: render, then send the same roster.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use certify_core::Config;

use super::{render::RenderArgs, send::SendArgs};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Roster spreadsheet (`.xlsx` or `.csv`) with `Name` and `Email` columns.
    #[arg(long, value_name = "FILE")]
    pub roster: PathBuf,

    /// Background image (overrides the config's `template`).
    #[arg(long, value_name = "IMAGE")]
    pub template: Option<PathBuf>,

    /// Working directory (overrides the config).
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Render for real, but deliver nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Print both batch results as JSON.
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let render = RenderArgs {
            roster: self.roster.clone(),
            template: self.template,
            workdir: self.workdir.clone(),
            json: self.json,
        };
        let rendered = render.execute(config)?;
        super::print_render(&rendered, self.json)?;

        let send = SendArgs {
            roster: Some(self.roster),
            workdir: self.workdir,
            dry_run: self.dry_run,
            json: self.json,
        };
        let sent = send.execute(config)?;
        super::print_send(&sent, self.json, self.dry_run)
    }
}
