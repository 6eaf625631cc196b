//! CLI exit code registry.
//!
//! Single source of truth for all exit codes. Exit codes are part of
//! the shell contract: scripts rely on them.
//!
//! | Range  | Domain     | Description                          |
//! |--------|------------|--------------------------------------|
//! | 0      | Universal  | Success                              |
//! | 1      | Universal  | General error (unspecified)          |
//! | 2      | Universal  | CLI usage error                      |
//! | 10-19  | dictionary | Dictionary load/validation           |
//! | 50-59  | fetch      | Remote dictionary download           |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// No dictionary: nothing cached and no --dict given, or the given
/// file cannot be read.
pub const EXIT_DICT_MISSING: u8 = 10;

/// Dictionary file exists but fails parsing or schema validation.
pub const EXIT_DICT_INVALID: u8 = 11;

/// Name-list or report file cannot be read or written.
pub const EXIT_FILE_IO: u8 = 12;

/// Network error reaching the dictionary URL.
pub const EXIT_FETCH_NETWORK: u8 = 50;

/// Fetched payload is not a valid dictionary.
pub const EXIT_FETCH_PAYLOAD: u8 = 51;
