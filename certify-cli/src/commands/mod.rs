//! Subcommands and the output helpers they share.

pub mod render;
pub mod run;
pub mod send;

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use certify_core::{BatchResult, Config};

/// Load `.env`, then the YAML config, then `CERTIFY_SMTP_*` overrides.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("loaded environment from {}", path.display());
    }
    let config = Config::load(explicit).context("failed to load configuration")?;
    Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
}

#[derive(Serialize)]
struct PhaseJson<'a> {
    phase: &'a str,
    #[serde(flatten)]
    result: &'a BatchResult,
}

pub fn print_json(phase: &str, result: &BatchResult) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&PhaseJson { phase, result })
            .context("failed to serialize batch result")?
    );
    Ok(())
}

fn print_errors(result: &BatchResult) {
    for error in &result.errors {
        println!("{} {error}", "✗".red().bold());
    }
}

pub fn print_render(result: &BatchResult, json: bool) -> Result<()> {
    if json {
        return print_json("render", result);
    }
    if result.is_complete() {
        println!("{} All certificates created successfully!", "✓".green().bold());
    } else {
        print_errors(result);
        println!(
            "{} {} of {} certificates created",
            "!".yellow().bold(),
            result.success_count,
            result.attempted()
        );
    }
    Ok(())
}

pub fn print_send(result: &BatchResult, json: bool, dry_run: bool) -> Result<()> {
    if json {
        return print_json(if dry_run { "send (dry-run)" } else { "send" }, result);
    }
    let prefix = if dry_run { "[dry-run] " } else { "" };
    print_errors(result);
    println!(
        "{prefix}{} Successfully sent {} certificates!",
        "✓".green().bold(),
        result.success_count
    );
    Ok(())
}
