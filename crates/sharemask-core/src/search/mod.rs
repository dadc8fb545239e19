//! Search-response filtering.
//!
//! Peers answer a search with one [`SearchResponse`] per user. A
//! [`SearchFilter`] parsed from the free-text query (`"miles davis minbr:256
//! -live iscbr"`) narrows those responses down to the files worth showing.
//!
//! This module is independent of [`crate::share`]; it never sees local paths.

pub mod filter;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use filter::{SearchFilter, is_constant_bit_rate};

/// Errors that can occur while parsing a filter query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A numeric filter key was given a value that is not a non-negative integer.
    ///
    /// **[USER ERROR]** e.g. `minbr:fast` or a value that overflows.
    #[error("Invalid value '{value}' for filter '{key}'")]
    InvalidValue { key: String, value: String },
}

/// A single file offered in a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFile {
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// Bit rate in kbps; absent for non-audio files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u32>,
    /// Duration in seconds; absent for non-audio files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

/// One peer's answer to a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub username: String,
    #[serde(default)]
    pub file_count: u32,
    #[serde(default)]
    pub locked_file_count: u32,
    #[serde(default)]
    pub files: Vec<SearchFile>,
}
