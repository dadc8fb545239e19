//! Share command - build shares from definitions given on the command line.
//!
//! # Examples
//!
//! ```bash
//! # Show how peers would see a folder
//! sharemask share /srv/music/Jazz
//!
//! # Alias and exclusion markers (use -- before definitions starting with '-')
//! sharemask share --json -- "[Smooth]/srv/music/Jazz" "-/srv/music/private"
//!
//! # Only what peers may learn
//! sharemask share --remote-only /srv/music/Jazz
//! ```

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use sharemask_core::{FsResolver, Share};

use crate::output::print_shares;

#[derive(ClapArgs, Clone)]
pub struct Args {
    /// Share definitions: ["-"|"!"] ["[" alias "]"] path
    #[arg(required = true, value_name = "DEFINITION")]
    pub definitions: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Leave out local paths and raw definitions
    #[arg(long)]
    pub remote_only: bool,
}

#[instrument(level = "info", name = "cmd::share", skip_all, fields(count = args.definitions.len()))]
pub fn execute(args: &Args) -> Result<()> {
    let resolver = FsResolver::new();

    let shares = args
        .definitions
        .iter()
        .map(|raw| {
            Share::new(raw, &resolver).with_context(|| format!("Failed to build share from '{raw}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    print_shares(&shares, args.json, args.remote_only)
}
