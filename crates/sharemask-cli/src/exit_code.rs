//! Exit codes for the CLI.
//!
//! These follow common Unix conventions and provide meaningful
//! status information for scripting and automation.

/// Successful execution
pub const SUCCESS: u8 = 0;

/// General/unspecified error
pub const GENERAL_ERROR: u8 = 1;

/// Command-line usage error (bad arguments)
pub const USAGE_ERROR: u8 = 2;

/// A share definition or search query is malformed
pub const INVALID_DEFINITION: u8 = 3;

/// Shared folder or input file not found
pub const NOT_FOUND: u8 = 4;

/// Permission denied while inspecting a shared folder or reading input
pub const PERMISSION_DENIED: u8 = 5;

/// Input data (config file, search responses) could not be parsed
pub const INVALID_INPUT: u8 = 6;
