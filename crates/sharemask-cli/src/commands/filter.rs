//! Filter command - apply a search filter query to peer search responses.
//!
//! Responses are read as a JSON array of objects with `username`,
//! `fileCount`, `lockedFileCount` and `files` (each file has `filename`,
//! `size` and optional `bitRate`/`length`).
//!
//! # Examples
//!
//! ```bash
//! # Filter responses saved to a file
//! sharemask filter "minbr:256 iscbr -live" --input responses.json
//!
//! # Read from stdin, hide peers with nothing left
//! cat responses.json | sharemask filter "minfif:5 jazz" --hide-empty
//!
//! # Show how a query is understood
//! sharemask filter "minbr:320 isvbr -demo" --explain
//! ```

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use sharemask_core::{SearchFilter, SearchResponse};

use crate::config::Config;

#[derive(ClapArgs, Clone)]
pub struct Args {
    /// Filter query, e.g. "minbr:256 -live iscbr" (defaults to search.default_query)
    #[arg(allow_hyphen_values = true)]
    pub query: Option<String>,

    /// Read responses from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Print the parsed filter and exit
    #[arg(long)]
    pub explain: bool,

    /// Drop responses left without files
    #[arg(long)]
    pub hide_empty: bool,
}

#[instrument(level = "info", name = "cmd::filter", skip_all)]
pub fn execute(config: &Config, args: &Args) -> Result<()> {
    let query = args
        .query
        .as_deref()
        .or(config.search.default_query.as_deref())
        .unwrap_or_default();

    let filter = SearchFilter::parse(query)
        .with_context(|| format!("Invalid filter query '{query}'"))?;

    if args.explain {
        println!("{}", serde_json::to_string_pretty(&filter)?);
        return Ok(());
    }

    let content = read_input(args)?;
    let responses: Vec<SearchResponse> =
        serde_json::from_str(&content).context("Failed to parse search responses")?;

    let total: usize = responses.iter().map(|r| r.files.len()).sum();
    let filtered: Vec<SearchResponse> = responses
        .into_iter()
        .map(|response| filter.apply(response))
        .filter(|response| !args.hide_empty || !response.files.is_empty())
        .collect();
    let kept: usize = filtered.iter().map(|r| r.files.len()).sum();

    tracing::info!(total, kept, responses = filtered.len(), "Applied filter");

    println!("{}", serde_json::to_string_pretty(&filtered)?);
    Ok(())
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(path) = &args.input {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("No input: pass --input FILE or pipe search responses on stdin");
    }

    let mut content = String::new();
    stdin
        .read_to_string(&mut content)
        .context("Failed to read search responses from stdin")?;
    Ok(content)
}
