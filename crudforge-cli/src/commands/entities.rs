//! Entity discovery command

use anyhow::Result;
use console::style;
use crudforge::config::CrudforgeConfig;
use crudforge_cli_lib::find_entities;
use std::path::PathBuf;

/// List entity definitions below a directory
pub struct EntitiesCommand {
    dir: PathBuf,
}

impl EntitiesCommand {
    /// Create a new command instance
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Execute the command
    pub fn execute(&self, config: &CrudforgeConfig) -> Result<()> {
        let files = find_entities(&self.dir, &config.naming.marker)?;

        if files.is_empty() {
            println!(
                "{} no *{}.java files under {}",
                style("!").yellow().bold(),
                config.naming.marker,
                self.dir.display()
            );
            return Ok(());
        }

        for file in &files {
            let shown = file.strip_prefix(&self.dir).unwrap_or(file);
            println!("  {}", shown.display());
        }
        println!(
            "\n{} {} entity file(s)",
            style("Found").green().bold(),
            files.len()
        );

        Ok(())
    }
}
