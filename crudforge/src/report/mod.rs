//! Entity structure reports
//!
//! Plain-text and JSON views of extracted metadata, used to check what the
//! extractor recovered before generating anything.

use std::fmt;

use crate::error::Result;
use crate::scaffold::EntityMetadata;

/// Plain-text structure report
///
/// ```text
/// Entity: OrderEntity
/// Package: com.acme.app.models.entities
///
/// Attributes:
/// - Long id [identifier]
/// - String status [max MAX_STATUS = 20]
/// ```
#[must_use]
pub fn text_report(entity: &EntityMetadata) -> String {
    TextReport(entity).to_string()
}

/// [`fmt::Display`] form of [`text_report`]
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a>(pub &'a EntityMetadata);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entity = self.0;
        writeln!(f, "Entity: {}", entity.simple_name)?;
        writeln!(f, "Package: {}", entity.package_path)?;
        writeln!(f, "\nAttributes:")?;

        if entity.fields.is_empty() {
            writeln!(f, "  (none)")?;
        }

        for field in &entity.fields {
            let mut flags = Vec::new();
            if entity.is_identifier(field) {
                flags.push("identifier".to_string());
            }
            if field.is_embedded {
                flags.push("embedded".to_string());
            }
            if let Some(constant) = &field.length_constant_ref {
                flags.push(entity.length_bound(field).map_or_else(
                    || format!("max {constant} (unresolved)"),
                    |value| format!("max {constant} = {value}"),
                ));
            }

            if flags.is_empty() {
                writeln!(f, "- {field}")?;
            } else {
                writeln!(f, "- {field} [{}]", flags.join(", "))?;
            }
        }

        if !entity.constants.is_empty() {
            writeln!(f, "\nConstants:")?;
            for (name, value) in &entity.constants {
                writeln!(f, "- {name} = {value}")?;
            }
        }

        Ok(())
    }
}

/// JSON export: `{"name", "package", "identifier", "attributes", "constants"}`
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn json_report(entity: &EntityMetadata) -> Result<String> {
    let mut value = serde_json::to_value(entity)?;
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "identifier".to_string(),
            entity
                .identifier_field()
                .map_or(serde_json::Value::Null, |f| f.name.clone().into()),
        );
    }
    Ok(serde_json::to_string_pretty(&value)?)
}
