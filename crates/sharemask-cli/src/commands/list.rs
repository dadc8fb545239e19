//! List command - build every share from the configuration file.
//!
//! Definitions are built in parallel. Invalid ones are skipped with a warning
//! unless strict mode is on (`--strict` or `shares.strict = true`).
//!
//! # Examples
//!
//! ```bash
//! sharemask list
//! sharemask --config ./shares.toml list --json --remote-only
//! sharemask list --strict
//! ```

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use sharemask_core::{FsResolver, ShareBatch};

use crate::config::{Config, config_path};
use crate::output::print_shares;

#[derive(ClapArgs, Clone)]
pub struct Args {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Leave out local paths and raw definitions
    #[arg(long)]
    pub remote_only: bool,

    /// Fail on the first invalid definition instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

#[instrument(level = "info", name = "cmd::list", skip_all)]
pub fn execute(config: &Config, args: &Args) -> Result<()> {
    let definitions = &config.shares.directories;

    if definitions.is_empty() {
        eprintln!("No shares configured.");
        eprintln!(
            "Add definitions under [shares] directories in {}",
            config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "~/.config/sharemask/config.toml".to_string())
        );
        return Ok(());
    }

    let strict = args.strict || config.shares.strict;
    let batch = ShareBatch::build(definitions, &FsResolver::new());
    let skipped = batch.failures.len();

    let shares = if strict {
        batch
            .into_result()
            .context("Invalid share definition in configuration (strict mode)")?
    } else {
        for (raw, e) in &batch.failures {
            tracing::warn!(definition = %raw, "Skipping share: {e}");
        }
        batch.shares
    };

    print_shares(&shares, args.json, args.remote_only)?;

    if skipped > 0 {
        eprintln!("{skipped} definition(s) skipped, run with -v for details");
    }

    Ok(())
}
