//! Entity metadata model
//!
//! The extractor produces one [`EntityMetadata`] per run from immutable source
//! text. Nothing downstream mutates it; generators only read from it.
//!
//! # Recognised field markers
//!
//! ```text
//! @Id                               → identifier field
//! @Embedded                         → embedded value
//! @Column(length = MAX_NAME)        → length bound referencing a constant
//! private static final int MAX_NAME = 80;
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Package used when the definition declares none
pub const DEFAULT_PACKAGE: &str = "com.example.models.entities";

/// One declared field of the entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Type token as written in the source (opaque)
    #[serde(rename = "type")]
    pub ty: String,
    /// Field name
    pub name: String,
    /// Whether the field carries the embedded marker
    pub is_embedded: bool,
    /// Constant named by the length-bound marker, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_constant_ref: Option<String>,
}

impl FieldDescriptor {
    /// Create a plain field with no markers
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            is_embedded: false,
            length_constant_ref: None,
        }
    }

    /// Mark the field as an embedded value
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.is_embedded = true;
        self
    }

    /// Attach a length bound referencing the named constant
    #[must_use]
    pub fn with_length_ref(mut self, constant: impl Into<String>) -> Self {
        self.length_constant_ref = Some(constant.into());
        self
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// Structured metadata recovered from one class definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityMetadata {
    /// Class name as declared (e.g. `OrderEntity`)
    #[serde(rename = "name")]
    pub simple_name: String,
    /// Dotted package path
    #[serde(rename = "package")]
    pub package_path: String,
    /// Declared fields in source order; names are unique
    #[serde(rename = "attributes")]
    pub fields: Vec<FieldDescriptor>,
    /// Index into `fields` of the identifier field
    #[serde(skip)]
    pub identifier: Option<usize>,
    /// Named integer constants, used only as length bounds
    pub constants: BTreeMap<String, i64>,
}

impl EntityMetadata {
    /// The identifier field, if one was marked
    #[must_use]
    pub fn identifier_field(&self) -> Option<&FieldDescriptor> {
        self.identifier.and_then(|idx| self.fields.get(idx))
    }

    /// Whether `field` is the identifier field
    #[must_use]
    pub fn is_identifier(&self, field: &FieldDescriptor) -> bool {
        self.identifier_field()
            .is_some_and(|id| id.name == field.name)
    }

    /// Type of the identifier field, `Long` when none is marked
    #[must_use]
    pub fn identifier_type(&self) -> &str {
        self.identifier_field().map_or("Long", |f| f.ty.as_str())
    }

    /// Resolve a field's length bound
    ///
    /// Unresolved constant references yield `None`: an unknown constant means
    /// "no bound", never an error.
    #[must_use]
    pub fn length_bound(&self, field: &FieldDescriptor) -> Option<i64> {
        field
            .length_constant_ref
            .as_ref()
            .and_then(|name| self.constants.get(name).copied())
    }

    /// Look up a field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> EntityMetadata {
        EntityMetadata {
            simple_name: "OrderEntity".to_string(),
            package_path: "com.acme.app.models.entities".to_string(),
            fields: vec![
                FieldDescriptor::new("Long", "id"),
                FieldDescriptor::new("String", "status").with_length_ref("MAX_STATUS"),
                FieldDescriptor::new("String", "note").with_length_ref("MISSING"),
                FieldDescriptor::new("Address", "address").embedded(),
            ],
            identifier: Some(0),
            constants: BTreeMap::from([("MAX_STATUS".to_string(), 20)]),
        }
    }

    #[test]
    fn test_identifier_lookup() {
        let entity = order();
        assert_eq!(entity.identifier_field().unwrap().name, "id");
        assert_eq!(entity.identifier_type(), "Long");
        assert!(entity.is_identifier(&entity.fields[0]));
        assert!(!entity.is_identifier(&entity.fields[1]));
    }

    #[test]
    fn test_identifier_type_defaults_to_long() {
        let mut entity = order();
        entity.identifier = None;
        entity.fields[0].ty = "UUID".to_string();
        assert_eq!(entity.identifier_type(), "Long");
    }

    #[test]
    fn test_length_bound_resolution() {
        let entity = order();
        assert_eq!(entity.length_bound(&entity.fields[1]), Some(20));
        assert_eq!(entity.length_bound(&entity.fields[2]), None);
        assert_eq!(entity.length_bound(&entity.fields[0]), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldDescriptor::new("Long", "id").to_string(), "Long id");
    }
}
