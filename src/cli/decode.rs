//! Decode command — turns a raw-log dump into YAML, JSON, or a summary.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use super::formatting;
use crate::changeset::ChangeLog;
use crate::data::{self, ChangeSetView};

/// Output renderings supported by the decode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML document, multiline messages as literal blocks.
    Yaml,
    /// Pretty-printed JSON array.
    Json,
    /// Colored per-commit summary with file actions.
    Summary,
}

/// Decode command options.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Raw-log file to decode (reads standard input when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Display the committer identity and date instead of the author's
    #[arg(long)]
    pub committer: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

impl DecodeCommand {
    /// Executes the decode command.
    pub fn execute(self) -> Result<()> {
        let text = self.read_input()?;
        let log = ChangeLog::parse(&text, !self.committer);

        match self.format {
            OutputFormat::Yaml => {
                println!("{}", data::to_yaml(&views(&log))?);
            }
            OutputFormat::Json => {
                let rendered = serde_json::to_string_pretty(&views(&log))
                    .context("Failed to serialize change sets to JSON")?;
                println!("{rendered}");
            }
            OutputFormat::Summary => formatting::print_summary(log.entries())?,
        }

        Ok(())
    }

    fn read_input(&self) -> Result<String> {
        match &self.file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read raw log file: {}", path.display())),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read raw log from stdin")?;
                Ok(text)
            }
        }
    }
}

fn views(log: &ChangeLog) -> Vec<ChangeSetView> {
    log.entries()
        .iter()
        .map(|changeset| ChangeSetView::from(changeset.as_ref()))
        .collect()
}
