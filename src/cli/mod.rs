//! CLI command handlers

pub mod commands;

pub use commands::{load, LoadOptions};
