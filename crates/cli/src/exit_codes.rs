//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success; every comparison row classified OK        |
//! | 1    | General error (unspecified)                        |
//! | 2    | CLI usage error (bad args)                         |
//! | 3    | Discrepancies found (any non-OK reason)            |
//! | 4    | Invalid config (parse or validation failure)       |
//! | 5    | Runtime failure (file IO, missing columns, engine) |

/// Success - command completed and every row is "OK".
pub const EXIT_SUCCESS: u8 = 0;

// Code 1 is reserved for unspecified failures; nothing maps to it on
// purpose — every failure path has a specific code below.

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Reconciliation completed but at least one row is not "OK".
/// Like `diff(1)`, a nonzero exit here means "the sources differ."
pub const EXIT_DISCREPANCY: u8 = 3;

/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// Runtime failure: unreadable input, missing columns, engine error.
pub const EXIT_RUNTIME: u8 = 5;
