//! CLI interface for rawlog

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod decode;

mod formatting;

/// rawlog: decode git raw-log output into structured change sets
#[derive(Parser)]
#[command(name = "rawlog")]
#[command(about = "Decode git raw-log output into structured change sets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// Decode a raw-log dump into structured change sets
    Decode(decode::DecodeCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Decode(decode_cmd) => decode_cmd.execute(),
        }
    }
}
