//! Shell completion generation for the sharemask CLI.
//!
//! # Examples
//!
//! ```bash
//! # Bash (add to ~/.bashrc)
//! eval "$(sharemask completions bash)"
//!
//! # Fish (save to completions directory)
//! sharemask completions fish > ~/.config/fish/completions/sharemask.fish
//! ```

use std::io;

use anyhow::Result;
use clap::{Args as ClapArgs, CommandFactory};
use clap_complete::{Shell, generate};

use crate::Cli;

#[derive(ClapArgs, Clone)]
pub struct Args {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn execute(args: &Args) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "sharemask", &mut io::stdout());
    Ok(())
}
