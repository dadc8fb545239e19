#![deny(unsafe_code)]

mod commands;
mod config;
mod exit_code;
mod output;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sharemask_core::error::{FilterError, ResolveError, ShareError};

use crate::commands::{completions, filter, list, share};
use crate::config::Config;

/// Masked share definitions and search filters for a P2P file-sharing peer
#[derive(Parser)]
#[command(name = "sharemask")]
#[command(author, version)]
#[command(propagate_version = true)]
#[command(after_help = "EXAMPLES:
    # Show how peers see a shared folder
    sharemask share /srv/music/Jazz

    # Alias a folder and exclude a subfolder
    sharemask share -- \"[Smooth]/srv/music/Jazz\" \"-/srv/music/Jazz/private\"

    # Build every share from ~/.config/sharemask/config.toml
    sharemask list --remote-only

    # Filter search responses
    sharemask filter \"minbr:256 iscbr -live\" --input responses.json
")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build shares from definitions given on the command line
    Share(share::Args),

    /// Build every share listed in the configuration file
    List(list::Args),

    /// Filter search responses with a query
    Filter(filter::Args),

    /// Generate shell completions
    Completions(completions::Args),
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too
            let code = if e.use_stderr() {
                exit_code::USAGE_ERROR
            } else {
                exit_code::SUCCESS
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    let quiet = cli.quiet;

    match run(cli) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS),
        Err(e) => {
            if !quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::from(categorize_error(&e))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.quiet {
        setup_tracing(cli.verbose);
    }

    match cli.command {
        Commands::Share(args) => share::execute(&args),
        Commands::List(args) => {
            let config = Config::load(cli.config.as_deref())?;
            list::execute(&config, &args)
        }
        Commands::Filter(args) => {
            let config = Config::load(cli.config.as_deref())?;
            filter::execute(&config, &args)
        }
        Commands::Completions(args) => completions::execute(&args),
    }
}

fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();
}

/// Categorize an error into an exit code using typed error downcasting
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(share_err) = cause.downcast_ref::<ShareError>()
            && matches!(share_err, ShareError::InvalidDefinition { .. })
        {
            return exit_code::INVALID_DEFINITION;
        }

        if let Some(resolve_err) = cause.downcast_ref::<ResolveError>() {
            match resolve_err {
                ResolveError::NotFound { .. }
                | ResolveError::NotADirectory { .. }
                | ResolveError::NoParent { .. } => return exit_code::NOT_FOUND,
                ResolveError::PermissionDenied { .. } => return exit_code::PERMISSION_DENIED,
                ResolveError::NonUtf8 { .. } => return exit_code::INVALID_INPUT,
                ResolveError::Io { .. } => {}
            }
        }

        if cause.downcast_ref::<FilterError>().is_some() {
            return exit_code::INVALID_DEFINITION;
        }

        if cause.downcast_ref::<serde_json::Error>().is_some()
            || cause.downcast_ref::<toml::de::Error>().is_some()
        {
            return exit_code::INVALID_INPUT;
        }

        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::PermissionDenied => return exit_code::PERMISSION_DENIED,
                io::ErrorKind::NotFound => return exit_code::NOT_FOUND,
                _ => {}
            }
        }
    }

    exit_code::GENERAL_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_invalid_definition_exit_code() {
        let err = sharemask_core::Share::new("[]/srv/music", &|_: &str| {
            Ok::<_, ResolveError>("/srv".to_string())
        })
        .unwrap_err();
        let e = anyhow::Error::new(err).context("Failed to build share");
        assert_eq!(categorize_error(&e), exit_code::INVALID_DEFINITION);
    }

    #[test]
    fn test_missing_path_exit_code() {
        let err = ShareError::from(ResolveError::NotFound {
            path: "/nope".into(),
        });
        let e = anyhow::Error::new(err).context("Failed to build share");
        assert_eq!(categorize_error(&e), exit_code::NOT_FOUND);
    }

    #[test]
    fn test_io_error_exit_code() {
        let e = anyhow::Error::new(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(categorize_error(&e), exit_code::PERMISSION_DENIED);
    }

    #[test]
    fn test_unknown_error_is_general() {
        assert_eq!(categorize_error(&anyhow::anyhow!("boom")), exit_code::GENERAL_ERROR);
    }
}
