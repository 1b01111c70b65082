//! CLI commands and argument parsing

use crate::types::ContentFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Decode XML and JSON bodies into typed records
#[derive(Parser, Debug)]
#[command(name = "bodymap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a body and print the record as JSON
    Decode {
        /// Body file to decode
        #[arg(short, long, conflicts_with = "url", required_unless_present = "url")]
        input: Option<PathBuf>,

        /// URL to fetch the body from
        #[arg(short, long)]
        url: Option<String>,

        /// Body format (default: file extension, Content-Type, or first byte)
        #[arg(short, long)]
        format: Option<FormatArg>,

        /// Built-in shape name or path to a shape file (YAML/JSON)
        #[arg(short, long, default_value = "pet")]
        shape: String,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a shape and print it as YAML
    Shape {
        /// Built-in shape name or path to a shape file
        #[arg(default_value = "pet")]
        shape: String,
    },
}

/// Body format argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    /// XML element tree
    Xml,
    /// JSON document
    Json,
}

impl From<FormatArg> for ContentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xml => ContentFormat::Xml,
            FormatArg::Json => ContentFormat::Json,
        }
    }
}
