//! `certify send`: mail every rendered certificate.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use certify_core::{BatchResult, Config};
use certify_mailer::{Composer, MemoryTransport, SmtpMailer};
use certify_pipeline::{resolve_roster, send_batch};

/// Sender used for dry runs when the config names none.
const DRY_RUN_SENDER: &str = "noreply@example.com";

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Roster to mail (default: first `.xlsx`/`.csv` in the workdir).
    #[arg(long, value_name = "FILE")]
    pub roster: Option<PathBuf>,

    /// Working directory holding the certificates (overrides the config).
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Compose every message but deliver nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the batch result as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SendArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let result = self.execute(config)?;
        super::print_send(&result, self.json, self.dry_run)
    }

    pub fn execute(&self, config: &Config) -> Result<BatchResult> {
        let workdir = self.workdir.as_deref().unwrap_or(&config.workdir);
        let roster = resolve_roster(self.roster.as_deref(), workdir)?;
        tracing::info!("mailing {} rows from {}", roster.len(), roster.source().display());

        let sender = match config.smtp.sender() {
            Ok(sender) => sender,
            Err(_) if self.dry_run => DRY_RUN_SENDER,
            Err(e) => return Err(e).context("no sender address configured"),
        };
        let composer = Composer::new(sender, config.letter.clone())
            .with_context(|| format!("invalid sender address {sender}"))?;

        let result = if self.dry_run {
            let transport = MemoryTransport::new();
            let result = send_batch(&roster.rows, workdir, &transport, &composer)?;
            for message in transport.sent() {
                tracing::info!("[dry-run] would send to {}", message.to.join(", "));
            }
            result
        } else {
            let transport = SmtpMailer::from_config(&config.smtp)
                .context("failed to configure SMTP transport")?;
            send_batch(&roster.rows, workdir, &transport, &composer)?
        };
        Ok(result)
    }
}
