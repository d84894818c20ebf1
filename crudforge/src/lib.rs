//! crudforge: derive a consistent CRUD/search artifact family from one entity
//!
//! Given the text of a single JPA-style entity class, crudforge renders the
//! seventeen source files of a conventional create/read/update/delete/search
//! surface around it:
//! - transfer object, value object and mapper
//! - persistence interface
//! - create/find/patch/delete/search handlers and entry points
//! - search model, predicate builder and predicate factory
//!
//! # Pipeline
//!
//! 1. **Extract**: pattern-match the class name, package, fields and length
//!    constants ([`scaffold::PatternExtractor`])
//! 2. **Derive names**: every type name, variable spelling and package path,
//!    computed once ([`scaffold::NameDeriver`])
//! 3. **Select**: ask a [`scaffold::FieldChooser`] once and freeze the answer
//!    ([`scaffold::Selection`])
//! 4. **Render**: one minijinja template per artifact kind, all fed from the
//!    same context ([`scaffold::ArtifactRenderer`])
//!
//! A run yields every artifact or none.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use crudforge::prelude::*;
//!
//! fn main() -> crudforge::Result<()> {
//!     let text = std::fs::read_to_string("OrderEntity.java").unwrap_or_default();
//!     let pipeline = ScaffoldPipeline::new(CrudforgeConfig::load(None)?)?;
//!     let output = pipeline.run(&text, AllFields)?;
//!
//!     for artifact in &output.artifacts {
//!         println!("{}", artifact.relative_path().display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod observability;
pub mod report;
pub mod scaffold;

pub use error::{Error, Result};

pub mod prelude {
    //! Convenience re-exports for common types and traits

    pub use crate::config::{CrudforgeConfig, PackageMode, Pluralization};
    pub use crate::error::{Error, ExtractionError, Result, SelectionError};
    pub use crate::scaffold::{
        AllFields, ArtifactKind, ArtifactSink, EntityMetadata, FieldChooser, FieldDescriptor,
        GeneratedArtifact, NamedFields, ScaffoldOutput, ScaffoldPipeline,
    };
}
