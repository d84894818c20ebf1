//! Run-wide field selection
//!
//! A [`FieldChooser`] is consulted exactly once per run. The chosen indices
//! are validated, normalised to declaration order and frozen into a
//! [`Selection`] that every generator then reads. `Selection` is neither
//! `Clone` nor constructible outside [`select`], so there is only one per run.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use super::entity::{EntityMetadata, FieldDescriptor};
use super::naming::upper_first;
use crate::error::SelectionError;

/// Collaborator that picks a subset of the candidate fields
///
/// Consumed on use: a chooser can answer at most once.
pub trait FieldChooser {
    /// Return indices into `candidates`
    ///
    /// # Errors
    ///
    /// Implementations return [`SelectionError`] when they cannot produce a
    /// choice (unknown names, aborted prompt).
    fn choose(self, candidates: &[FieldDescriptor]) -> Result<Vec<usize>, SelectionError>;
}

impl<F> FieldChooser for F
where
    F: FnOnce(&[FieldDescriptor]) -> Result<Vec<usize>, SelectionError>,
{
    fn choose(self, candidates: &[FieldDescriptor]) -> Result<Vec<usize>, SelectionError> {
        self(candidates)
    }
}

/// Select every declared field
#[derive(Debug, Clone, Copy, Default)]
pub struct AllFields;

impl FieldChooser for AllFields {
    fn choose(self, candidates: &[FieldDescriptor]) -> Result<Vec<usize>, SelectionError> {
        Ok((0..candidates.len()).collect())
    }
}

/// Select fields by name (scripted selection)
#[derive(Debug, Clone, Default)]
pub struct NamedFields(pub Vec<String>);

impl NamedFields {
    /// Parse a comma separated list, ignoring blanks
    #[must_use]
    pub fn parse(list: &str) -> Self {
        Self(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToString::to_string)
                .collect(),
        )
    }
}

impl FieldChooser for NamedFields {
    fn choose(self, candidates: &[FieldDescriptor]) -> Result<Vec<usize>, SelectionError> {
        self.0
            .into_iter()
            .map(|name| {
                candidates
                    .iter()
                    .position(|f| f.name == name)
                    .ok_or(SelectionError::UnknownField(name))
            })
            .collect()
    }
}

/// One selected field with everything the templates need resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedField {
    /// Declared type token
    #[serde(rename = "type")]
    pub ty: String,
    /// Field name
    pub name: String,
    /// Bean accessor suffix (`firstName` -> `FirstName`)
    pub accessor: String,
    /// Carries the embedded marker
    pub is_embedded: bool,
    /// Is the entity's identifier field
    pub is_identifier: bool,
    /// Constant named by a length bound that resolved
    pub length_constant: Option<String>,
    /// Resolved length bound value
    pub max_length: Option<i64>,
}

impl SelectedField {
    fn resolve(entity: &EntityMetadata, field: &FieldDescriptor) -> Self {
        let max_length = entity.length_bound(field);
        if max_length.is_none() {
            if let Some(constant) = &field.length_constant_ref {
                warn!(
                    field = %field.name,
                    constant = %constant,
                    "length bound references an unknown constant, rendering without a bound"
                );
            }
        }

        Self {
            ty: field.ty.clone(),
            name: field.name.clone(),
            accessor: upper_first(&field.name),
            is_embedded: field.is_embedded,
            is_identifier: entity.is_identifier(field),
            length_constant: max_length.and(field.length_constant_ref.clone()),
            max_length,
        }
    }
}

/// The single field subset shared by every generator in a run
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    fields: Vec<SelectedField>,
}

impl Selection {
    /// Selected fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &[SelectedField] {
        &self.fields
    }

    /// Selected fields without the embedded marker
    pub fn plain(&self) -> impl Iterator<Item = &SelectedField> {
        self.fields.iter().filter(|f| !f.is_embedded)
    }

    /// Selected fields with the embedded marker
    pub fn embedded(&self) -> impl Iterator<Item = &SelectedField> {
        self.fields.iter().filter(|f| f.is_embedded)
    }

    /// The identifier field, when it was selected
    #[must_use]
    pub fn identifier(&self) -> Option<&SelectedField> {
        self.fields.iter().find(|f| f.is_identifier)
    }

    /// Constants referenced by the resolved bounds of plain fields
    #[must_use]
    pub fn used_constants(&self) -> BTreeMap<&str, i64> {
        self.plain()
            .filter_map(|f| Some((f.length_constant.as_deref()?, f.max_length?)))
            .collect()
    }

    /// Number of selected fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false for a constructed selection
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Run the chooser once and freeze its answer
///
/// Duplicate indices collapse and the result follows declaration order
/// regardless of the order the chooser returned.
///
/// # Errors
///
/// Returns [`SelectionError::Empty`] when nothing was chosen,
/// [`SelectionError::OutOfRange`] for an index past the candidate list, or
/// whatever the chooser itself reported.
pub fn select(
    entity: &EntityMetadata,
    chooser: impl FieldChooser,
) -> Result<Selection, SelectionError> {
    let candidates = entity.fields.as_slice();
    let chosen = chooser.choose(candidates)?;

    let mut indices = BTreeSet::new();
    for index in chosen {
        if index >= candidates.len() {
            return Err(SelectionError::OutOfRange {
                index,
                available: candidates.len(),
            });
        }
        indices.insert(index);
    }

    if indices.is_empty() {
        return Err(SelectionError::Empty);
    }

    let fields: Vec<_> = indices
        .into_iter()
        .map(|idx| SelectedField::resolve(entity, &candidates[idx]))
        .collect();

    debug!(
        selected = ?fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        "field selection frozen"
    );

    Ok(Selection { fields })
}
