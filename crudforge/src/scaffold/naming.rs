//! Name derivation for the artifact family
//!
//! Every spelling the generators need is computed here, once per run, from
//! the entity's simple name and package path. Generators receive the
//! resulting [`DerivedNames`] by reference and never re-derive anything, so
//! two artifacts can never disagree on a type name or a package.

use inflector::Inflector;
use serde::Serialize;
use std::collections::BTreeMap;

use super::artifacts::ArtifactKind;
use crate::config::{NamingSettings, PackageMode, PackageSettings, Pluralization};

/// Package group an artifact lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageRole {
    /// Transfer objects
    Dtos,
    /// Plain value objects
    Pojos,
    /// Operation handlers
    Services,
    /// Persistence-access interfaces
    Repositories,
    /// Request entry points
    Controllers,
    /// Search/filter models
    Search,
    /// Predicate builders
    Specifications,
    /// Predicate factories
    Factories,
    /// Object mappers
    Mappers,
}

impl PackageRole {
    /// All roles in a fixed order
    pub const ALL: [Self; 9] = [
        Self::Dtos,
        Self::Pojos,
        Self::Services,
        Self::Repositories,
        Self::Controllers,
        Self::Search,
        Self::Specifications,
        Self::Factories,
        Self::Mappers,
    ];

    /// Segment group appended to the root package
    #[must_use]
    pub const fn segments(self) -> &'static str {
        match self {
            Self::Dtos => "models.dtos",
            Self::Pojos => "models.pojos",
            Self::Services => "services",
            Self::Repositories => "repositories",
            Self::Controllers => "controllers",
            Self::Search => "search",
            Self::Specifications => "specifications",
            Self::Factories => "factories",
            Self::Mappers => "mappers",
        }
    }
}

/// Package paths for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageLayout {
    /// Package the entity itself is declared in
    pub entity: String,
    /// Shared root every derived package starts with
    pub root: String,
    /// Derived package per role
    pub roles: BTreeMap<PackageRole, String>,
}

impl PackageLayout {
    /// Derive the layout from the entity package
    ///
    /// Both modes are pure functions of `package_path` and the settings.
    #[must_use]
    pub fn derive(package_path: &str, settings: &PackageSettings) -> Self {
        let root = match settings.mode {
            PackageMode::Suffix => strip_segment_suffix(package_path, &settings.entity_suffix),
            PackageMode::Root => truncate_segments(package_path, settings.root_depth),
        };

        let roles = PackageRole::ALL
            .iter()
            .map(|&role| (role, join_package(&root, role.segments())))
            .collect();

        Self {
            entity: package_path.to_string(),
            root,
            roles,
        }
    }

    /// Package for a role
    #[must_use]
    pub fn get(&self, role: PackageRole) -> &str {
        self.roles.get(&role).map_or(self.root.as_str(), String::as_str)
    }
}

/// Every spelling derived from the entity name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedNames {
    /// Declared entity class name (e.g. `CustomerEntity`)
    pub entity: String,
    /// Entity name with the marker token stripped (e.g. `Customer`)
    pub base_name: String,
    /// Base name with its first letter lower-cased (e.g. `customer`)
    pub variable_name: String,
    /// Plural URL path segment (e.g. `customers`)
    pub route_segment: String,
    /// Base name upper-cased, no separators (e.g. `CUSTOMER`, `ORDERLINE`)
    pub upper_constant: String,
    /// Package paths
    pub packages: PackageLayout,
}

impl DerivedNames {
    /// Type name of an artifact kind
    #[must_use]
    pub fn type_name(&self, kind: ArtifactKind) -> String {
        kind.name_template().replace("{}", &self.base_name)
    }

    /// Package of an artifact kind
    #[must_use]
    pub fn package_of(&self, kind: ArtifactKind) -> &str {
        self.packages.get(kind.package_role())
    }

    /// Fully qualified name of an artifact kind
    #[must_use]
    pub fn qualified_name(&self, kind: ArtifactKind) -> String {
        format!("{}.{}", self.package_of(kind), self.type_name(kind))
    }
}

/// Computes [`DerivedNames`] from configuration
#[derive(Debug, Clone)]
pub struct NameDeriver {
    naming: NamingSettings,
    packages: PackageSettings,
}

impl NameDeriver {
    /// Create a deriver for the given settings
    #[must_use]
    pub const fn new(naming: NamingSettings, packages: PackageSettings) -> Self {
        Self { naming, packages }
    }

    /// Derive all names for an entity. Total and pure.
    #[must_use]
    pub fn derive(&self, simple_name: &str, package_path: &str) -> DerivedNames {
        let base_name = strip_marker(simple_name, &self.naming.marker);
        let route_segment = match self.naming.pluralization {
            Pluralization::Naive => format!("{}s", base_name.to_lowercase()),
            Pluralization::Inflector => base_name.to_lowercase().to_plural(),
        };

        DerivedNames {
            entity: simple_name.to_string(),
            variable_name: lower_first(&base_name),
            upper_constant: base_name.to_uppercase(),
            route_segment,
            packages: PackageLayout::derive(package_path, &self.packages),
            base_name,
        }
    }
}

/// Remove one trailing occurrence of `marker`
///
/// A name that *is* the marker keeps it, so the base name is never empty.
#[must_use]
pub fn strip_marker(simple_name: &str, marker: &str) -> String {
    match simple_name.strip_suffix(marker) {
        Some(base) if !marker.is_empty() && !base.is_empty() => base.to_string(),
        _ => simple_name.to_string(),
    }
}

/// Lower-case only the first character
#[must_use]
pub fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_lowercase().to_string() + chars.as_str()
    })
}

/// Upper-case only the first character (bean accessor spelling)
#[must_use]
pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

/// Strip a trailing dotted segment group, matching whole segments only
fn strip_segment_suffix(package_path: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return package_path.to_string();
    }
    if package_path == suffix {
        return String::new();
    }
    package_path
        .strip_suffix(suffix)
        .and_then(|head| head.strip_suffix('.'))
        .unwrap_or(package_path)
        .to_string()
}

/// Keep the first `depth` segments
fn truncate_segments(package_path: &str, depth: usize) -> String {
    package_path
        .split('.')
        .filter(|segment| !segment.is_empty())
        .take(depth)
        .collect::<Vec<_>>()
        .join(".")
}

fn join_package(root: &str, tail: &str) -> String {
    if root.is_empty() {
        tail.to_string()
    } else {
        format!("{root}.{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deriver() -> NameDeriver {
        NameDeriver::new(NamingSettings::default(), PackageSettings::default())
    }

    fn root_deriver(depth: usize) -> NameDeriver {
        NameDeriver::new(
            NamingSettings::default(),
            PackageSettings {
                mode: PackageMode::Root,
                root_depth: depth,
                ..PackageSettings::default()
            },
        )
    }

    #[test]
    fn test_customer_spellings() {
        let names = deriver().derive("CustomerEntity", "com.acme.app.models.entities");
        assert_eq!(names.base_name, "Customer");
        assert_eq!(names.variable_name, "customer");
        assert_eq!(names.route_segment, "customers");
        assert_eq!(names.upper_constant, "CUSTOMER");
    }

    #[test]
    fn test_marker_only_stripped_at_end() {
        assert_eq!(strip_marker("EntityType", "Entity"), "EntityType");
        assert_eq!(strip_marker("EntityEntity", "Entity"), "Entity");
        assert_eq!(strip_marker("Entity", "Entity"), "Entity");
        assert_eq!(strip_marker("Order", "Entity"), "Order");
        assert_eq!(strip_marker("Order", ""), "Order");
    }

    #[test]
    fn test_multi_word_names() {
        let names = deriver().derive("OrderLineEntity", "com.acme.app.models.entities");
        assert_eq!(names.variable_name, "orderLine");
        assert_eq!(names.route_segment, "orderlines");
        assert_eq!(names.upper_constant, "ORDERLINE");
    }

    #[test]
    fn test_inflector_pluralization() {
        let deriver = NameDeriver::new(
            NamingSettings {
                pluralization: Pluralization::Inflector,
                ..NamingSettings::default()
            },
            PackageSettings::default(),
        );
        assert_eq!(deriver.derive("CategoryEntity", "a.b").route_segment, "categories");
        assert_eq!(deriver.derive("PostEntity", "a.b").route_segment, "posts");
    }

    #[test]
    fn test_naive_pluralization_has_no_irregulars() {
        assert_eq!(deriver().derive("CategoryEntity", "a.b").route_segment, "categorys");
    }

    #[test]
    fn test_suffix_mode_packages() {
        let names = deriver().derive("OrderEntity", "com.acme.app.models.entities");
        let packages = &names.packages;
        assert_eq!(packages.root, "com.acme.app");
        assert_eq!(packages.get(PackageRole::Dtos), "com.acme.app.models.dtos");
        assert_eq!(packages.get(PackageRole::Pojos), "com.acme.app.models.pojos");
        assert_eq!(packages.get(PackageRole::Services), "com.acme.app.services");
        assert_eq!(packages.get(PackageRole::Mappers), "com.acme.app.mappers");
        assert_eq!(packages.entity, "com.acme.app.models.entities");
    }

    #[test]
    fn test_suffix_mode_without_suffix_appends() {
        let names = deriver().derive("OrderEntity", "com.acme.orders");
        assert_eq!(names.packages.root, "com.acme.orders");
        assert_eq!(
            names.packages.get(PackageRole::Search),
            "com.acme.orders.search"
        );
    }

    #[test]
    fn test_suffix_matches_whole_segments() {
        let names = deriver().derive("OrderEntity", "com.acme.legacymodels.entities");
        assert_eq!(names.packages.root, "com.acme.legacymodels.entities");
    }

    #[test]
    fn test_root_mode_packages() {
        let names = root_deriver(3).derive("OrderEntity", "com.acme.app.domain.models.entities");
        assert_eq!(names.packages.root, "com.acme.app");
        assert_eq!(
            names.packages.get(PackageRole::Repositories),
            "com.acme.app.repositories"
        );
    }

    #[test]
    fn test_root_mode_short_package() {
        let names = root_deriver(3).derive("OrderEntity", "orders");
        assert_eq!(names.packages.root, "orders");
        assert_eq!(names.packages.get(PackageRole::Factories), "orders.factories");
    }

    #[test]
    fn test_type_names_follow_templates() {
        let names = deriver().derive("OrderEntity", "com.acme.app.models.entities");
        assert_eq!(names.type_name(ArtifactKind::CreateService), "CreateOrderService");
        assert_eq!(names.type_name(ArtifactKind::Dto), "OrderDto");
        assert_eq!(names.type_name(ArtifactKind::ValueObject), "Order");
        assert_eq!(
            names.qualified_name(ArtifactKind::SpecificationFactory),
            "com.acme.app.factories.OrderSpecificationFactory"
        );
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(lower_first("Order"), "order");
        assert_eq!(upper_first("firstName"), "FirstName");
        assert_eq!(lower_first(""), "");
    }
}
