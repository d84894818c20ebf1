//! Entity scaffolding
//!
//! Extraction, name derivation, field selection and artifact rendering,
//! tied together by [`ScaffoldPipeline`].

pub mod artifacts;
pub mod entity;
pub mod extractor;
pub mod generator;
pub mod naming;
pub mod selection;
pub mod templates;

pub use artifacts::{ArtifactKind, ArtifactRenderer, GeneratedArtifact, TemplateRegistry};
pub use entity::{EntityMetadata, FieldDescriptor, DEFAULT_PACKAGE};
pub use extractor::{Extractor, PatternExtractor};
pub use generator::{ArtifactSink, ScaffoldOutput, ScaffoldPipeline};
pub use naming::{DerivedNames, NameDeriver, PackageLayout, PackageRole};
pub use selection::{select, AllFields, FieldChooser, NamedFields, SelectedField, Selection};
