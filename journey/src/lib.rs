//! Daily journey path builder and combination verifier.
//!
//! A journey is a fixed sequence of content segments, some gated by a choice
//! point. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (path building, enumeration,
//!   verification, session state). No I/O, fully testable in isolation.
//! - **[`io`]**: Config and dataset loading.
//!
//! [`dataset`] holds the static content types shared by both.

pub mod core;
pub mod dataset;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
