//! crudforge CLI library

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod discovery;
pub mod prompt;
pub mod writer;

pub use discovery::find_entities;
pub use prompt::{choose_entity, FieldSource, PromptChooser};
pub use writer::FsSink;
