//! Property tests over generated entity definitions

use crudforge::config::{CrudforgeConfig, NamingSettings, PackageMode, PackageSettings};
use crudforge::scaffold::{ArtifactKind, NameDeriver, NamedFields, PackageRole, ScaffoldPipeline};
use proptest::prelude::*;
use std::collections::BTreeSet;

const TYPES: [&str; 6] = ["String", "Long", "Integer", "Boolean", "LocalDate", "BigDecimal"];

#[derive(Debug, Clone)]
struct Field {
    ty: &'static str,
    name: String,
    embedded: bool,
    selected: bool,
}

fn arb_fields() -> impl Strategy<Value = Vec<Field>> {
    prop::collection::btree_set("f[a-z]{1,6}", 1..8).prop_flat_map(|names| {
        let count = names.len();
        (
            Just(names),
            prop::collection::vec((0..TYPES.len(), any::<bool>(), any::<bool>()), count),
        )
            .prop_map(|(names, attrs)| {
                names
                    .into_iter()
                    .zip(attrs)
                    .map(|(name, (ty, embedded, selected))| Field {
                        ty: TYPES[ty],
                        name,
                        embedded,
                        selected,
                    })
                    .collect()
            })
    })
}

fn arb_package() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 1..6).prop_map(|segments| segments.join("."))
}

fn render_source(class: &str, package: &str, fields: &[Field]) -> String {
    let mut text = format!("package {package};\n\npublic class {class} {{\n");
    for field in fields {
        if field.embedded {
            text.push_str("    @Embedded\n");
        }
        text.push_str(&format!("    private {} {};\n", field.ty, field.name));
    }
    text.push_str("}\n");
    text
}

fn selected_names(fields: &[Field]) -> String {
    fields
        .iter()
        .filter(|f| f.selected)
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

proptest! {
    #[test]
    fn rendering_is_idempotent(
        class in "[A-Z][a-z]{2,8}Entity",
        package in arb_package(),
        fields in arb_fields(),
    ) {
        prop_assume!(fields.iter().any(|f| f.selected));
        let text = render_source(&class, &package, &fields);
        let pipeline = ScaffoldPipeline::new(CrudforgeConfig::default()).unwrap();

        let first = pipeline.run(&text, NamedFields::parse(&selected_names(&fields))).unwrap();
        let second = pipeline.run(&text, NamedFields::parse(&selected_names(&fields))).unwrap();

        prop_assert_eq!(first.artifacts, second.artifacts);
    }

    #[test]
    fn selection_reaches_predicates_exactly(
        package in arb_package(),
        fields in arb_fields(),
    ) {
        prop_assume!(fields.iter().any(|f| f.selected));
        let text = render_source("ItemEntity", &package, &fields);
        let output = ScaffoldPipeline::new(CrudforgeConfig::default())
            .unwrap()
            .run(&text, NamedFields::parse(&selected_names(&fields)))
            .unwrap();

        let body = |kind: ArtifactKind| {
            output.artifacts.iter().find(|a| a.kind == kind).map(|a| a.body.clone()).unwrap()
        };
        let specifications = body(ArtifactKind::Specifications);
        let factory = body(ArtifactKind::SpecificationFactory);
        let search = body(ArtifactKind::SearchModel);

        for field in &fields {
            let plain = field.selected && !field.embedded;
            prop_assert_eq!(
                specifications.contains(&format!("> {}(final", field.name)),
                plain
            );
            prop_assert_eq!(
                factory.contains(&format!("ItemSpecifications::{})", field.name)),
                plain
            );
            prop_assert_eq!(
                search.contains(&format!(" {};", field.name)),
                field.selected
            );
        }
        prop_assert!(factory.contains(".orElse(ItemSpecifications.empty());"));
    }

    #[test]
    fn derived_packages_share_one_root(
        class in "[A-Z][A-Za-z]{0,10}",
        package in arb_package(),
        root_mode in any::<bool>(),
        depth in 1usize..5,
    ) {
        let packages = PackageSettings {
            mode: if root_mode { PackageMode::Root } else { PackageMode::Suffix },
            root_depth: depth,
            ..PackageSettings::default()
        };
        let names = NameDeriver::new(NamingSettings::default(), packages).derive(&class, &package);

        prop_assert!(!names.base_name.is_empty());
        let roots: BTreeSet<_> = PackageRole::ALL
            .iter()
            .map(|&role| {
                let path = names.packages.get(role).to_string();
                path.strip_suffix(role.segments()).map(|head| head.trim_end_matches('.').to_string())
            })
            .collect();
        prop_assert_eq!(roots.len(), 1);
        prop_assert_eq!(roots.into_iter().next().flatten(), Some(names.packages.root.clone()));
    }
}
