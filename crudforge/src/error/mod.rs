//! Error types and error handling
//!
//! Every failure in the pipeline is fatal for the run: the orchestrator stops
//! before any artifact is handed to a sink, so callers either receive the full
//! artifact family or an [`Error`] naming the precondition that failed.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while recovering metadata from class-definition text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No `public class <Name>` declaration was found
    #[error("no public class declaration found in the entity definition")]
    MissingClassName,

    /// A field carries both the identifier and the embedded marker
    #[error("field '{field}' is marked both as identifier and as embedded")]
    AmbiguousMarkers {
        /// Name of the offending field
        field: String,
    },
}

/// Failures while computing the run-wide field selection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The chooser returned no fields
    #[error("no fields were selected")]
    Empty,

    /// The chooser returned an index outside the candidate list
    #[error("selected index {index} is out of range ({available} candidates)")]
    OutOfRange {
        /// Offending index
        index: usize,
        /// Number of candidates offered
        available: usize,
    },

    /// A scripted selection named a field the entity does not declare
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// The interactive prompt failed or was aborted
    #[error("field prompt failed: {0}")]
    Prompt(String),
}

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Extraction failed
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Extraction succeeded but found no field declarations
    #[error("entity '{entity}' declares no fields")]
    NoFields {
        /// Simple name of the entity
        entity: String,
    },

    /// Selection failed
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Template registration or rendering failed
    #[error("failed to render template '{name}': {source}")]
    Template {
        /// Template name
        name: String,
        /// Underlying minijinja error
        #[source]
        source: minijinja::Error,
    },

    /// A template override could not be read
    #[error("failed to read template override {}: {source}", path.display())]
    TemplateOverride {
        /// Override file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Default configuration could not be serialized
    #[error("failed to serialize default configuration: {0}")]
    ConfigDefaults(#[from] toml::ser::Error),

    /// An artifact could not be written by a sink
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON export failed
    #[error("failed to encode entity report: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Result alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;
