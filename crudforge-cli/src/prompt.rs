//! Interactive and scripted selection

use anyhow::{Context, Result};
use crudforge::error::SelectionError;
use crudforge::scaffold::{AllFields, FieldChooser, FieldDescriptor, NamedFields};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{MultiSelect, Select};
use std::path::{Path, PathBuf};

/// Multi-select prompt over the declared fields
#[derive(Default)]
pub struct PromptChooser {
    theme: ColorfulTheme,
}

impl PromptChooser {
    /// Label shown for one candidate
    #[must_use]
    pub fn label(field: &FieldDescriptor) -> String {
        if field.is_embedded {
            format!("{field} (embedded)")
        } else {
            field.to_string()
        }
    }
}

impl FieldChooser for PromptChooser {
    fn choose(self, candidates: &[FieldDescriptor]) -> Result<Vec<usize>, SelectionError> {
        let items: Vec<String> = candidates.iter().map(Self::label).collect();

        MultiSelect::with_theme(&self.theme)
            .with_prompt("Select the fields to include (space to toggle, enter to confirm)")
            .items(&items)
            .interact()
            .map_err(|e| SelectionError::Prompt(e.to_string()))
    }
}

/// Where the field selection comes from
pub enum FieldSource {
    /// Every declared field
    All,
    /// A scripted list of names
    Named(NamedFields),
    /// Ask interactively
    Prompt(PromptChooser),
}

impl FieldSource {
    /// Pick the source from command-line flags; the prompt is the fallback
    #[must_use]
    pub fn from_flags(fields: Option<&str>, all: bool) -> Self {
        match (fields, all) {
            (_, true) => Self::All,
            (Some(list), false) => Self::Named(NamedFields::parse(list)),
            (None, false) => Self::Prompt(PromptChooser::default()),
        }
    }
}

impl FieldChooser for FieldSource {
    fn choose(self, candidates: &[FieldDescriptor]) -> Result<Vec<usize>, SelectionError> {
        match self {
            Self::All => AllFields.choose(candidates),
            Self::Named(named) => named.choose(candidates),
            Self::Prompt(prompt) => prompt.choose(candidates),
        }
    }
}

/// Ask which of several entity files to use
///
/// Paths are shown relative to `root`.
///
/// # Errors
///
/// Returns an error if the prompt fails or is aborted.
pub fn choose_entity(files: &[PathBuf], root: &Path) -> Result<PathBuf> {
    let items: Vec<String> = files
        .iter()
        .map(|path| {
            path.strip_prefix(root)
                .unwrap_or(path)
                .display()
                .to_string()
        })
        .collect();

    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select an entity")
        .items(&items)
        .default(0)
        .interact()
        .context("Entity selection aborted")?;

    files
        .get(index)
        .cloned()
        .context("Entity selection out of range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Long", "id"),
            FieldDescriptor::new("String", "status"),
            FieldDescriptor::new("Address", "address").embedded(),
        ]
    }

    #[test]
    fn test_labels() {
        let fields = candidates();
        assert_eq!(PromptChooser::label(&fields[0]), "Long id");
        assert_eq!(PromptChooser::label(&fields[2]), "Address address (embedded)");
    }

    #[test]
    fn test_all_flag_wins() {
        let source = FieldSource::from_flags(Some("id"), true);
        assert_eq!(source.choose(&candidates()).unwrap(), [0, 1, 2]);
    }

    #[test]
    fn test_named_fields_flag() {
        let source = FieldSource::from_flags(Some("status,address"), false);
        assert_eq!(source.choose(&candidates()).unwrap(), [1, 2]);
    }

    #[test]
    fn test_prompt_is_the_fallback() {
        assert!(matches!(
            FieldSource::from_flags(None, false),
            FieldSource::Prompt(_)
        ));
    }
}
