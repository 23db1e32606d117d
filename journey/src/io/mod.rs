//! I/O helpers for journey commands.

pub mod config;
pub mod dataset_store;
