//! Artifact generation command
//!
//! # Example
//!
//! ```bash
//! crudforge generate src/main/java/com/acme/app/models/entities/OrderEntity.java \
//!   --out generated \
//!   --fields id,status,shippingAddress
//! ```

use anyhow::{Context, Result};
use console::style;
use crudforge::config::CrudforgeConfig;
use crudforge::scaffold::ScaffoldPipeline;
use crudforge_cli_lib::{choose_entity, find_entities, FieldSource, FsSink};
use std::fs;
use std::path::{Path, PathBuf};

/// Render the artifact family for one entity
pub struct GenerateCommand {
    path: PathBuf,
    out: PathBuf,
    fields: Option<String>,
    all: bool,
    dry_run: bool,
}

impl GenerateCommand {
    /// Create a new command instance
    pub const fn new(
        path: PathBuf,
        out: PathBuf,
        fields: Option<String>,
        all: bool,
        dry_run: bool,
    ) -> Self {
        Self {
            path,
            out,
            fields,
            all,
            dry_run,
        }
    }

    /// Execute the command
    pub fn execute(&self, config: CrudforgeConfig) -> Result<()> {
        let entity_file = self.resolve_entity_file(&config.naming.marker)?;
        let text = fs::read_to_string(&entity_file)
            .with_context(|| format!("Failed to read entity file: {}", entity_file.display()))?;

        println!(
            "\n{} {} {}",
            style("Scaffolding").cyan().bold(),
            style(entity_file.display()).green().bold(),
            style("...").cyan().bold()
        );

        let pipeline =
            ScaffoldPipeline::new(config).context("Failed to load artifact templates")?;
        let source = FieldSource::from_flags(self.fields.as_deref(), self.all);
        let mut sink = FsSink::new(&self.out).dry_run(self.dry_run);

        let output = pipeline
            .run_into(&text, source, &mut sink)
            .with_context(|| format!("Nothing generated for {}", entity_file.display()))?;

        println!(
            "\n{} {} files{}:",
            style(if self.dry_run { "Would generate" } else { "Generated" })
                .green()
                .bold(),
            output.artifacts.len(),
            if self.dry_run { " (dry run)" } else { "" }
        );

        for (artifact, path) in output.artifacts.iter().zip(sink.written()) {
            println!(
                "  {} {} ({})",
                style("✓").green(),
                style(path.display()).dim(),
                style(artifact.kind.description()).dim()
            );
        }

        let plain = output.selection.plain().count();
        let embedded = output.selection.embedded().count();
        println!(
            "\n{} {} ready: {} field(s), {} embedded, under {}",
            style("✨").green().bold(),
            style(&output.names.base_name).green().bold(),
            plain,
            embedded,
            style(sink.root().display()).yellow()
        );

        Ok(())
    }

    fn resolve_entity_file(&self, marker: &str) -> Result<PathBuf> {
        if !self.path.is_dir() {
            return Ok(self.path.clone());
        }

        let files = find_entities(&self.path, marker)?;
        match files.as_slice() {
            [] => anyhow::bail!(
                "No *{marker}.java files found under {}",
                self.path.display()
            ),
            [only] => Ok(only.clone()),
            _ => choose_entity(&files, Path::new(&self.path)),
        }
    }
}
