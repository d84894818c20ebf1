//! Entity definition extractor
//!
//! Recovers an [`EntityMetadata`] from free-form class-definition text by
//! pattern matching. This is deliberately not a parser: anything the patterns
//! do not recognise is ignored. The [`Extractor`] trait is the seam where a
//! real parser can be swapped in without touching anything downstream.
//!
//! # Recognised shapes
//!
//! ```text
//! package com.acme.app.models.entities;        → package path (else DEFAULT_PACKAGE)
//! public class OrderEntity {                   → class name (required)
//! private static final int MAX_STATUS = 20;    → constant
//! @Id                                          → marks the next field as identifier
//! @Embedded private Address address;           → same-line markers work too
//! @Column(name = "status", length = MAX_STATUS)
//! private String status;                       → field with a length bound
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::entity::{EntityMetadata, FieldDescriptor, DEFAULT_PACKAGE};
use crate::error::ExtractionError;

static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bpublic\s+(?:(?:abstract|final)\s+)*class\s+(\w+)").expect("Invalid class regex")
});

static PACKAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*package\s+([\w.]+)\s*;").expect("Invalid package regex"));

static CONSTANT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"private\s+static\s+final\s+int\s+(\w+)\s*=\s*(\d+)\s*;")
        .expect("Invalid constant regex")
});

static STATIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^private\s+(?:\w+\s+)*?static\b").expect("Invalid static regex"));

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^private\s+(?:(?:final|transient|volatile)\s+)*([\w.$]+(?:<[^;=]*>)?(?:\[\])*)\s+(\w+)\s*(?:=[^;]*)?;",
    )
    .expect("Invalid field regex")
});

// Annotation name at the start of a line; arguments are matched by `annotation_args`
static ANNOTATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@([\w.]+)\s*").expect("Invalid annotation regex"));

static LENGTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\blength\s*=\s*([A-Za-z_]\w*)").expect("Invalid length regex")
});

/// Source-text to metadata transform
pub trait Extractor {
    /// Recover entity metadata from `text`
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::MissingClassName`] when no class declaration
    /// is found, and [`ExtractionError::AmbiguousMarkers`] when one field is
    /// marked both identifier and embedded. An empty field list is not an
    /// error at this level.
    fn extract(&self, text: &str) -> Result<EntityMetadata, ExtractionError>;
}

/// Regex-driven, line-oriented extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl Extractor for PatternExtractor {
    fn extract(&self, text: &str) -> Result<EntityMetadata, ExtractionError> {
        let simple_name = CLASS_RE
            .captures(text)
            .map(|caps| caps[1].to_string())
            .ok_or(ExtractionError::MissingClassName)?;

        let package_path = PACKAGE_RE.captures(text).map_or_else(
            || {
                debug!(fallback = DEFAULT_PACKAGE, "no package declaration, using fallback");
                DEFAULT_PACKAGE.to_string()
            },
            |caps| caps[1].to_string(),
        );

        let constants = extract_constants(text);
        let (fields, identifier) = scan_fields(text)?;

        if fields.is_empty() {
            warn!(entity = %simple_name, "no field declarations recognised");
        }

        Ok(EntityMetadata {
            simple_name,
            package_path,
            fields,
            identifier,
            constants,
        })
    }
}

/// Markers collected from annotations preceding a declaration
#[derive(Debug, Default)]
struct Markers {
    identifier: bool,
    embedded: bool,
    length_ref: Option<String>,
}

impl Markers {
    fn absorb(&mut self, annotation: &str, args: Option<&str>) {
        let simple = annotation.rsplit('.').next().unwrap_or(annotation);
        match simple {
            "Id" => self.identifier = true,
            "Embedded" => self.embedded = true,
            "Column" => {
                if let Some(caps) = args.and_then(|a| LENGTH_RE.captures(a)) {
                    self.length_ref = Some(caps[1].to_string());
                }
            }
            _ => {}
        }
    }
}

fn extract_constants(text: &str) -> BTreeMap<String, i64> {
    CONSTANT_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let value = caps[2].parse::<i64>().ok()?;
            Some((caps[1].to_string(), value))
        })
        .collect()
}

fn scan_fields(text: &str) -> Result<(Vec<FieldDescriptor>, Option<usize>), ExtractionError> {
    let mut fields: Vec<FieldDescriptor> = Vec::new();
    let mut identifier: Option<usize> = None;
    let mut pending = Markers::default();
    let mut in_block_comment = false;
    // Annotation whose argument list has not closed yet
    let mut open_annotation = String::new();

    for raw in text.lines() {
        let joined: String;
        let mut line = raw.trim();

        if in_block_comment {
            match line.find("*/") {
                Some(end) => {
                    in_block_comment = false;
                    line = line[end + 2..].trim();
                }
                None => continue,
            }
        }
        if line.starts_with("/*") {
            if !line.contains("*/") {
                in_block_comment = true;
            }
            continue;
        }
        line = strip_line_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if !open_annotation.is_empty() {
            open_annotation.push(' ');
            open_annotation.push_str(line);
            if paren_depth(&open_annotation) > 0 {
                continue;
            }
            joined = std::mem::take(&mut open_annotation);
            line = joined.as_str();
        } else if line.starts_with('@') && paren_depth(line) > 0 {
            open_annotation.push_str(line);
            continue;
        }

        while let Some(caps) = ANNOTATION_RE.captures(line) {
            let rest = &line[caps[0].len()..];
            let args = annotation_args(rest);
            pending.absorb(&caps[1], args);
            line = rest[args.map_or(0, str::len)..].trim_start();
        }
        if line.is_empty() {
            continue;
        }

        let markers = std::mem::take(&mut pending);
        if STATIC_RE.is_match(line) {
            continue;
        }
        let Some(caps) = FIELD_RE.captures(line) else {
            continue;
        };

        let idx = record_field(&mut fields, &caps[1], &caps[2], &markers);
        if markers.identifier {
            match identifier {
                None => identifier = Some(idx),
                Some(existing) if existing != idx => {
                    warn!(
                        field = %fields[idx].name,
                        identifier = %fields[existing].name,
                        "second identifier marker ignored"
                    );
                }
                Some(_) => {}
            }
        }
    }

    if let Some(field) = identifier.map(|idx| &fields[idx]).filter(|f| f.is_embedded) {
        return Err(ExtractionError::AmbiguousMarkers {
            field: field.name.clone(),
        });
    }

    Ok((fields, identifier))
}

/// Record a declaration once, merging markers into an earlier record of the
/// same name. Returns the field's index.
fn record_field(
    fields: &mut Vec<FieldDescriptor>,
    ty: &str,
    name: &str,
    markers: &Markers,
) -> usize {
    if let Some(idx) = fields.iter().position(|f| f.name == name) {
        let existing = &mut fields[idx];
        existing.is_embedded |= markers.embedded;
        if existing.length_constant_ref.is_none() {
            existing.length_constant_ref.clone_from(&markers.length_ref);
        }
        debug!(field = name, "duplicate declaration merged");
        return idx;
    }

    debug!(
        field = name,
        ty,
        identifier = markers.identifier,
        embedded = markers.embedded,
        length_ref = markers.length_ref.as_deref(),
        "field recognised"
    );
    fields.push(FieldDescriptor {
        ty: ty.split_whitespace().collect::<Vec<_>>().join(" "),
        name: name.to_string(),
        is_embedded: markers.embedded,
        length_constant_ref: markers.length_ref.clone(),
    });
    fields.len() - 1
}

/// The balanced `(...)` group at the start of `text`, if it closes
fn annotation_args(text: &str) -> Option<&str> {
    if !text.starts_with('(') {
        return None;
    }
    let mut depth = 0;
    let mut in_string = false;
    let mut prev = '\0';
    for (idx, ch) in text.char_indices() {
        match ch {
            '"' if prev != '\\' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
        prev = ch;
    }
    None
}

/// Net count of open parentheses outside string literals
fn paren_depth(text: &str) -> i32 {
    let mut depth = 0;
    let mut in_string = false;
    let mut prev = '\0';
    for ch in text.chars() {
        match ch {
            '"' if prev != '\\' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth -= 1,
            _ => {}
        }
        prev = ch;
    }
    depth
}

/// Drop a trailing `//` comment that is not inside a string literal
fn strip_line_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut prev = '\0';
    for (idx, ch) in line.char_indices() {
        match ch {
            '"' if prev != '\\' => in_string = !in_string,
            '/' if !in_string && prev == '/' => return &line[..idx - 1],
            _ => {}
        }
        prev = ch;
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER: &str = r#"
package com.acme.app.models.entities;

import jakarta.persistence.*;

@Entity
@Table(name = "orders")
public class OrderEntity {

    private static final int MAX_STATUS = 20;
    private static final long SERIAL = 1L;

    @Id
    @GeneratedValue(strategy = GenerationType.IDENTITY)
    private Long id;

    @Column(name = "status", length = MAX_STATUS)
    private String status;

    @Embedded private Address shippingAddress;

    // private String ignored;
    private List<OrderLineEntity> lines;
}
"#;

    fn extract(text: &str) -> EntityMetadata {
        PatternExtractor.extract(text).unwrap()
    }

    #[test]
    fn test_extracts_class_and_package() {
        let entity = extract(ORDER);
        assert_eq!(entity.simple_name, "OrderEntity");
        assert_eq!(entity.package_path, "com.acme.app.models.entities");
    }

    #[test]
    fn test_extracts_fields_in_order() {
        let entity = extract(ORDER);
        let names: Vec<_> = entity.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "status", "shippingAddress", "lines"]);
        assert_eq!(entity.fields[3].ty, "List<OrderLineEntity>");
    }

    #[test]
    fn test_markers() {
        let entity = extract(ORDER);
        assert_eq!(entity.identifier_field().unwrap().name, "id");
        assert_eq!(
            entity.fields[1].length_constant_ref.as_deref(),
            Some("MAX_STATUS")
        );
        assert!(entity.fields[2].is_embedded);
        assert!(!entity.fields[1].is_embedded);
    }

    #[test]
    fn test_constants_only_int() {
        let entity = extract(ORDER);
        assert_eq!(entity.constants.len(), 1);
        assert_eq!(entity.constants["MAX_STATUS"], 20);
    }

    #[test]
    fn test_missing_class_name() {
        let err = PatternExtractor
            .extract("package a.b;\nprivate String name;")
            .unwrap_err();
        assert_eq!(err, ExtractionError::MissingClassName);
    }

    #[test]
    fn test_missing_package_uses_fallback() {
        let entity = extract("public class ThingEntity {\n private String name;\n}");
        assert_eq!(entity.package_path, DEFAULT_PACKAGE);
    }

    #[test]
    fn test_no_fields_is_not_an_error() {
        let entity = extract("public class EmptyEntity {}");
        assert!(entity.fields.is_empty());
        assert!(entity.identifier.is_none());
    }

    #[test]
    fn test_duplicate_declaration_recorded_once_with_richer_markers() {
        let text = "public class DupEntity {\n\
                    private String code;\n\
                    @Column(length = MAX_CODE)\n\
                    private String code;\n\
                    }";
        let entity = extract(text);
        assert_eq!(entity.fields.len(), 1);
        assert_eq!(
            entity.fields[0].length_constant_ref.as_deref(),
            Some("MAX_CODE")
        );
    }

    #[test]
    fn test_identifier_and_embedded_is_ambiguous() {
        let text = "public class OddEntity {\n@Id\n@Embedded\nprivate Key key;\n}";
        let err = PatternExtractor.extract(text).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::AmbiguousMarkers {
                field: "key".to_string()
            }
        );
    }

    #[test]
    fn test_markers_do_not_leak_past_other_declarations() {
        let text = "public class LeakEntity {\n\
                    @Id\n\
                    public LeakEntity() {}\n\
                    private String name;\n\
                    }";
        let entity = extract(text);
        assert!(entity.identifier.is_none());
    }

    #[test]
    fn test_literal_length_is_not_a_constant_ref() {
        let text = "public class LitEntity {\n@Column(length = 50)\nprivate String name;\n}";
        let entity = extract(text);
        assert!(entity.fields[0].length_constant_ref.is_none());
    }

    #[test]
    fn test_qualified_annotations_and_initialisers() {
        let text = "public class QEntity {\n\
                    @jakarta.persistence.Id private Long id;\n\
                    private Boolean active = Boolean.TRUE;\n\
                    private Map<String, Integer> counts;\n\
                    }";
        let entity = extract(text);
        assert_eq!(entity.identifier_field().unwrap().name, "id");
        assert_eq!(entity.fields[1].name, "active");
        assert_eq!(entity.fields[2].ty, "Map<String, Integer>");
    }

    #[test]
    fn test_block_comments_are_skipped() {
        let text = "public class CEntity {\n\
                    /*\n\
                    private String hidden;\n\
                    */\n\
                    private String shown;\n\
                    }";
        let entity = extract(text);
        assert_eq!(entity.fields.len(), 1);
        assert_eq!(entity.fields[0].name, "shown");
    }

    #[test]
    fn test_markers_survive_multi_line_annotations() {
        let text = r#"package com.acme.app.models.entities;

public class OrderEntity {
    private static final int MAX_STATUS = 20;

    @Id
    @Column(
        name = "order_id",
        nullable = false)
    private UUID id;

    @Column(name = "status",
            length = MAX_STATUS)
    private String status;

    @Embedded
    @AttributeOverrides({
        @AttributeOverride(name = "street", column = @Column(name = "ship_street"))
    })
    private Address shippingAddress;

    @Column(name = "note",
            columnDefinition = "varchar(40) default '(none)'")
    private String note;
}
"#;
        let entity = extract(text);

        let names: Vec<_> = entity.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "status", "shippingAddress", "note"]);
        assert_eq!(entity.identifier_field().unwrap().name, "id");
        assert_eq!(entity.identifier_type(), "UUID");
        assert_eq!(
            entity.fields[1].length_constant_ref.as_deref(),
            Some("MAX_STATUS")
        );
        assert!(entity.fields[2].is_embedded);
        assert!(!entity.fields[3].is_embedded);
    }

    #[test]
    fn test_paren_depth_ignores_strings() {
        assert_eq!(paren_depth("@Column("), 1);
        assert_eq!(paren_depth("@Column(name = \"a(b\")"), 0);
        assert_eq!(paren_depth("@A({ @B(x = @C(y)) })"), 0);
    }

    #[test]
    fn test_annotation_args_are_balanced() {
        assert_eq!(
            annotation_args("(a = @B(c = \")\")) private X x;"),
            Some("(a = @B(c = \")\"))")
        );
        assert_eq!(annotation_args("(unclosed"), None);
        assert_eq!(annotation_args("private X x;"), None);
    }

    #[test]
    fn test_strip_line_comment_respects_strings() {
        assert_eq!(strip_line_comment("private String a; // note"), "private String a; ");
        assert_eq!(
            strip_line_comment(r#"@Column(name = "http://x")"#),
            r#"@Column(name = "http://x")"#
        );
    }
}
