//! Entity structure report

use anyhow::{Context, Result};
use crudforge::report::{json_report, TextReport};
use crudforge::scaffold::{Extractor, PatternExtractor};
use std::fs;
use std::path::PathBuf;

/// Print what the extractor recovers from an entity file
pub struct DescribeCommand {
    file: PathBuf,
    json: bool,
}

impl DescribeCommand {
    /// Create a new command instance
    pub const fn new(file: PathBuf, json: bool) -> Self {
        Self { file, json }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        let text = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read entity file: {}", self.file.display()))?;

        let entity = PatternExtractor
            .extract(&text)
            .with_context(|| format!("Failed to extract entity from {}", self.file.display()))?;

        if self.json {
            println!("{}", json_report(&entity)?);
        } else {
            print!("{}", TextReport(&entity));
        }

        Ok(())
    }
}
