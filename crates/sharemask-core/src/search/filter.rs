use std::str::FromStr;

use serde::Serialize;

use super::{FilterError, SearchFile, SearchResponse};

/// MP3 bit rates (kbps) that indicate a constant bit rate encoding.
const CONSTANT_BIT_RATES: [u32; 18] = [
    8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 192, 224, 256, 320,
];

/// Whether `bit_rate` is one of the standard MP3 CBR rates.
pub fn is_constant_bit_rate(bit_rate: u32) -> bool {
    CONSTANT_BIT_RATES.binary_search(&bit_rate).is_ok()
}

/// Per-file predicates parsed from a search query.
///
/// # Query syntax
///
/// Tokens are separated by whitespace and compared case-insensitively:
///
/// | Token | Effect |
/// |---|---|
/// | `minbr:N`, `minbitrate:N` | bit rate at least N kbps |
/// | `minfs:N`, `minfilesize:N` | size at least N bytes |
/// | `minlen:N`, `minlength:N` | length at least N seconds |
/// | `minfif:N`, `minfilesinfolder:N` | response must offer at least N files |
/// | `isvbr` / `iscbr` | variable / constant bit rate only |
/// | `-term` | filename must not contain `term` |
/// | `term` | filename must contain at least one include term |
///
/// Any other `key:value` token is reserved and ignored.
///
/// # Examples
///
/// ```
/// use sharemask_core::SearchFilter;
///
/// let filter: SearchFilter = "Miles minbr:256 -live iscbr".parse().unwrap();
/// assert_eq!(filter.min_bit_rate, 256);
/// assert_eq!(filter.include, ["miles"]);
/// assert_eq!(filter.exclude, ["live"]);
/// assert!(filter.is_cbr);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    pub min_bit_rate: u32,
    pub min_file_size: u64,
    pub min_length: u32,
    pub min_files_in_folder: u32,
    pub is_vbr: bool,
    pub is_cbr: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl SearchFilter {
    /// Parse a free-text query. When a key repeats, the last value wins.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidValue` if a numeric key has a value that is
    /// not a non-negative integer in range.
    pub fn parse(query: &str) -> Result<Self, FilterError> {
        let mut filter = SearchFilter::default();

        for token in query.split_whitespace() {
            let token = token.to_lowercase();

            if let Some((key, value)) = token.split_once(':') {
                match key {
                    "minbr" | "minbitrate" => filter.min_bit_rate = parse_value(key, value)?,
                    "minfs" | "minfilesize" => filter.min_file_size = parse_value(key, value)?,
                    "minlen" | "minlength" => filter.min_length = parse_value(key, value)?,
                    "minfif" | "minfilesinfolder" => {
                        filter.min_files_in_folder = parse_value(key, value)?;
                    }
                    _ => tracing::trace!(token = %token, "Ignoring reserved filter token"),
                }
                continue;
            }

            match token.as_str() {
                "isvbr" => filter.is_vbr = true,
                "iscbr" => filter.is_cbr = true,
                _ => match token.strip_prefix('-') {
                    Some("") => {}
                    Some(term) => filter.exclude.push(term.to_string()),
                    None => filter.include.push(token),
                },
            }
        }

        Ok(filter)
    }

    /// True when the filter accepts every file of every response.
    pub fn is_empty(&self) -> bool {
        *self == SearchFilter::default()
    }

    /// Whether a single file passes every predicate.
    ///
    /// Files without a bit rate or length (non-audio files) pass the minimum
    /// checks for those fields but never count as constant bit rate.
    pub fn matches(&self, file: &SearchFile) -> bool {
        let is_cbr = file.bit_rate.is_some_and(is_constant_bit_rate);

        if self.is_cbr && !is_cbr {
            return false;
        }
        if self.is_vbr && is_cbr {
            return false;
        }
        if file.bit_rate.is_some_and(|br| br < self.min_bit_rate) {
            return false;
        }
        if file.size < self.min_file_size {
            return false;
        }
        if file.length.is_some_and(|len| len < self.min_length) {
            return false;
        }

        let filename = file.filename.to_lowercase();
        if !self.include.is_empty()
            && !self.include.iter().any(|term| filename.contains(term.as_str()))
        {
            return false;
        }
        if self.exclude.iter().any(|term| filename.contains(term.as_str())) {
            return false;
        }

        true
    }

    /// Keep only the files of `response` that pass the filter.
    ///
    /// A response advertising fewer than `min_files_in_folder` files (counting
    /// locked ones) keeps no files at all.
    pub fn apply(&self, mut response: SearchResponse) -> SearchResponse {
        let offered = response.file_count.saturating_add(response.locked_file_count);
        if offered < self.min_files_in_folder {
            response.files.clear();
            return response;
        }

        response.files.retain(|file| self.matches(file));
        response
    }
}

impl FromStr for SearchFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchFilter::parse(s)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, FilterError> {
    value.parse().map_err(|_| FilterError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
