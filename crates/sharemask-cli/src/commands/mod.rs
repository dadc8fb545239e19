pub mod completions;
pub mod filter;
pub mod list;
pub mod share;
