//! Stable exit codes for journey CLI commands.

/// Command succeeded; every verified journey is well-formed.
pub const OK: i32 = 0;
/// Command failed due to invalid arguments, config, dataset, or other errors.
pub const INVALID: i32 = 1;
/// The verifier found at least one malformed journey.
pub const PATHS_FAILED: i32 = 2;
