//! Deterministic, pure logic shared by the journey core.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod book;
pub mod combinations;
pub mod invariants;
pub mod journey_id;
pub mod map;
pub mod path;
pub mod session;
pub mod types;
pub mod verify;
