//! CLI module
//!
//! Command-line interface for decoding bodies.
//!
//! # Commands
//!
//! - `decode` - Decode a file or URL against a shape and print JSON
//! - `shape` - Validate and print a shape

mod commands;
mod runner;

pub use commands::{Cli, Commands, FormatArg};
pub use runner::Runner;
