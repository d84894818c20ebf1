//! Artifact catalogue and rendering
//!
//! [`ArtifactKind`] fixes, per kind, the type-name template, the package role
//! and the template used to render it. [`ArtifactRenderer`] turns one run's
//! metadata, names and selection into a shared context and renders each kind
//! from it; the renderer holds no mutable state, so rendering the same kind
//! twice yields identical bodies.

use minijinja::Environment;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::entity::EntityMetadata;
use super::naming::{DerivedNames, PackageRole};
use super::selection::Selection;
use super::templates;
use crate::config::RenderSettings;
use crate::error::{Error, Result};

/// Extension of template override files
pub const TEMPLATE_EXTENSION: &str = "java.j2";

/// Every artifact kind generated for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// `<B>Dto`
    Dto,
    /// `<B>`
    ValueObject,
    /// `<B>Repository`
    Repository,
    /// `Create<B>Service`
    CreateService,
    /// `Find<B>Service`
    FindService,
    /// `Patch<B>Service`
    PatchService,
    /// `Delete<B>Service`
    DeleteService,
    /// `Search<B>Service`
    SearchService,
    /// `Post<B>Controller`
    PostController,
    /// `Get<B>Controller`
    GetController,
    /// `Patch<B>Controller`
    PatchController,
    /// `Delete<B>Controller`
    DeleteController,
    /// `Search<B>Controller`
    SearchController,
    /// `<B>SearchModel`
    SearchModel,
    /// `<B>Specifications`
    Specifications,
    /// `<B>SpecificationFactory`
    SpecificationFactory,
    /// `<B>Mapper`
    Mapper,
}

impl ArtifactKind {
    /// All kinds, in generation order
    pub const ALL: [Self; 17] = [
        Self::Dto,
        Self::ValueObject,
        Self::Repository,
        Self::CreateService,
        Self::FindService,
        Self::PatchService,
        Self::DeleteService,
        Self::SearchService,
        Self::PostController,
        Self::GetController,
        Self::PatchController,
        Self::DeleteController,
        Self::SearchController,
        Self::SearchModel,
        Self::Specifications,
        Self::SpecificationFactory,
        Self::Mapper,
    ];

    /// Type-name template; `{}` stands for the base name
    #[must_use]
    pub const fn name_template(self) -> &'static str {
        match self {
            Self::Dto => "{}Dto",
            Self::ValueObject => "{}",
            Self::Repository => "{}Repository",
            Self::CreateService => "Create{}Service",
            Self::FindService => "Find{}Service",
            Self::PatchService => "Patch{}Service",
            Self::DeleteService => "Delete{}Service",
            Self::SearchService => "Search{}Service",
            Self::PostController => "Post{}Controller",
            Self::GetController => "Get{}Controller",
            Self::PatchController => "Patch{}Controller",
            Self::DeleteController => "Delete{}Controller",
            Self::SearchController => "Search{}Controller",
            Self::SearchModel => "{}SearchModel",
            Self::Specifications => "{}Specifications",
            Self::SpecificationFactory => "{}SpecificationFactory",
            Self::Mapper => "{}Mapper",
        }
    }

    /// Package group the artifact belongs to
    #[must_use]
    pub const fn package_role(self) -> PackageRole {
        match self {
            Self::Dto => PackageRole::Dtos,
            Self::ValueObject => PackageRole::Pojos,
            Self::Repository => PackageRole::Repositories,
            Self::CreateService
            | Self::FindService
            | Self::PatchService
            | Self::DeleteService
            | Self::SearchService => PackageRole::Services,
            Self::PostController
            | Self::GetController
            | Self::PatchController
            | Self::DeleteController
            | Self::SearchController => PackageRole::Controllers,
            Self::SearchModel => PackageRole::Search,
            Self::Specifications => PackageRole::Specifications,
            Self::SpecificationFactory => PackageRole::Factories,
            Self::Mapper => PackageRole::Mappers,
        }
    }

    /// Template name, also the stem of an override file
    #[must_use]
    pub const fn template_name(self) -> &'static str {
        match self {
            Self::Dto => "dto",
            Self::ValueObject => "value_object",
            Self::Repository => "repository",
            Self::CreateService => "create_service",
            Self::FindService => "find_service",
            Self::PatchService => "patch_service",
            Self::DeleteService => "delete_service",
            Self::SearchService => "search_service",
            Self::PostController => "post_controller",
            Self::GetController => "get_controller",
            Self::PatchController => "patch_controller",
            Self::DeleteController => "delete_controller",
            Self::SearchController => "search_controller",
            Self::SearchModel => "search_model",
            Self::Specifications => "specifications",
            Self::SpecificationFactory => "specification_factory",
            Self::Mapper => "mapper",
        }
    }

    const fn embedded_template(self) -> &'static str {
        match self {
            Self::Dto => templates::DTO,
            Self::ValueObject => templates::VALUE_OBJECT,
            Self::Repository => templates::REPOSITORY,
            Self::CreateService => templates::CREATE_SERVICE,
            Self::FindService => templates::FIND_SERVICE,
            Self::PatchService => templates::PATCH_SERVICE,
            Self::DeleteService => templates::DELETE_SERVICE,
            Self::SearchService => templates::SEARCH_SERVICE,
            Self::PostController => templates::POST_CONTROLLER,
            Self::GetController => templates::GET_CONTROLLER,
            Self::PatchController => templates::PATCH_CONTROLLER,
            Self::DeleteController => templates::DELETE_CONTROLLER,
            Self::SearchController => templates::SEARCH_CONTROLLER,
            Self::SearchModel => templates::SEARCH_MODEL,
            Self::Specifications => templates::SPECIFICATIONS,
            Self::SpecificationFactory => templates::SPECIFICATION_FACTORY,
            Self::Mapper => templates::MAPPER,
        }
    }

    /// Human readable description for status output
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Dto => "transfer object",
            Self::ValueObject => "value object",
            Self::Repository => "persistence interface",
            Self::CreateService => "create handler",
            Self::FindService => "find handler",
            Self::PatchService => "patch handler",
            Self::DeleteService => "delete handler",
            Self::SearchService => "search handler",
            Self::PostController => "create entry point",
            Self::GetController => "find entry point",
            Self::PatchController => "patch entry point",
            Self::DeleteController => "delete entry point",
            Self::SearchController => "search entry point",
            Self::SearchModel => "search model",
            Self::Specifications => "predicate builder",
            Self::SpecificationFactory => "predicate factory",
            Self::Mapper => "object mapper",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

/// One rendered source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Kind the artifact was rendered from
    pub kind: ArtifactKind,
    /// Type name, also the file stem
    pub logical_name: String,
    /// Dotted package path
    pub package_path: String,
    /// Rendered source text
    pub body: String,
}

impl GeneratedArtifact {
    /// `<package as directories>/<logical name>.java`
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package_path
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}.java", self.logical_name));
        path
    }

    /// Fully qualified type name
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package_path, self.logical_name)
    }
}

/// Template environment with embedded defaults and optional overrides
#[derive(Debug)]
pub struct TemplateRegistry {
    env: Environment<'static>,
}

impl TemplateRegistry {
    /// Registry holding only the embedded templates
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded template fails to parse.
    pub fn new() -> Result<Self> {
        Self::with_overrides(None)
    }

    /// Registry where `<dir>/<kind>.java.j2` replaces the embedded template
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be read or any template fails
    /// to parse.
    pub fn with_overrides(dir: Option<&Path>) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        for kind in ArtifactKind::ALL {
            let name = kind.template_name();
            let override_path = dir.map(|d| d.join(format!("{name}.{TEMPLATE_EXTENSION}")));

            let added = match override_path.filter(|path| path.is_file()) {
                Some(path) => {
                    debug!(template = name, path = %path.display(), "using template override");
                    let source = std::fs::read_to_string(&path)
                        .map_err(|source| Error::TemplateOverride { path, source })?;
                    env.add_template_owned(name, source)
                }
                None => env.add_template(name, kind.embedded_template()),
            };
            added.map_err(|source| Error::Template {
                name: name.to_string(),
                source,
            })?;
        }

        Ok(Self { env })
    }

    /// Render one kind against a context
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails (e.g. an override references an
    /// unknown filter).
    pub fn render(&self, kind: ArtifactKind, context: &Value) -> Result<String> {
        let name = kind.template_name();
        self.env
            .get_template(name)
            .and_then(|template| template.render(context))
            .map_err(|source| Error::Template {
                name: name.to_string(),
                source,
            })
    }
}

/// Renders every artifact kind for one run
#[derive(Debug)]
pub struct ArtifactRenderer<'a> {
    registry: &'a TemplateRegistry,
    names: &'a DerivedNames,
    context: Value,
}

impl<'a> ArtifactRenderer<'a> {
    /// Build the shared context for a run
    #[must_use]
    pub fn new(
        registry: &'a TemplateRegistry,
        entity: &EntityMetadata,
        names: &'a DerivedNames,
        selection: &Selection,
        render: &RenderSettings,
    ) -> Self {
        Self {
            registry,
            names,
            context: build_context(entity, names, selection, render),
        }
    }

    /// The shared context (without per-artifact keys)
    #[must_use]
    pub const fn context(&self) -> &Value {
        &self.context
    }

    /// Render one artifact
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render(&self, kind: ArtifactKind) -> Result<GeneratedArtifact> {
        let logical_name = self.names.type_name(kind);
        let package_path = self.names.package_of(kind).to_string();

        let mut context = self.context.clone();
        if let Some(map) = context.as_object_mut() {
            map.insert("class_name".to_string(), json!(logical_name));
            map.insert("package".to_string(), json!(package_path));
        }

        let body = self.registry.render(kind, &context)?;
        trace!(kind = %kind, bytes = body.len(), "rendered artifact");

        Ok(GeneratedArtifact {
            kind,
            logical_name,
            package_path,
            body,
        })
    }

    /// Render every kind, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the first rendering error; no partial list is returned.
    pub fn render_all(&self) -> Result<Vec<GeneratedArtifact>> {
        ArtifactKind::ALL
            .iter()
            .map(|&kind| self.render(kind))
            .collect()
    }
}

fn build_context(
    entity: &EntityMetadata,
    names: &DerivedNames,
    selection: &Selection,
    render: &RenderSettings,
) -> Value {
    let types: Map<String, Value> = ArtifactKind::ALL
        .iter()
        .map(|&kind| {
            (
                kind.template_name().to_string(),
                json!({
                    "name": names.type_name(kind),
                    "qualified": names.qualified_name(kind),
                }),
            )
        })
        .collect();

    let constants: Vec<_> = selection
        .used_constants()
        .into_iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();

    let plain_fields: Vec<_> = selection.plain().collect();
    let embedded_fields: Vec<_> = selection.embedded().collect();
    let has_bounds = selection.fields().iter().any(|f| f.max_length.is_some());

    json!({
        "entity": {
            "name": entity.simple_name,
            "package": entity.package_path,
            "qualified": format!("{}.{}", entity.package_path, entity.simple_name),
        },
        "base_name": names.base_name,
        "variable_name": names.variable_name,
        "route_segment": names.route_segment,
        "upper_constant": names.upper_constant,
        "root_package": names.packages.root,
        "types": types,
        "id_type": entity.identifier_type(),
        "id_param": format!("{}Id", names.variable_name),
        "item_path": format!("/{{{}Id}}", names.variable_name),
        "route": format!("{}/{}", render.api_prefix.trim_end_matches('/'), names.route_segment),
        "controller_constant": format!("CON_{}", names.upper_constant),
        "fields": selection.fields(),
        "plain_fields": plain_fields,
        "embedded_fields": embedded_fields,
        "identifier": selection.identifier(),
        "constants": constants,
        "has_bounds": has_bounds,
        "render": {
            "api_prefix": render.api_prefix,
            "audit": render.audit,
            "controller_id": render.controller_id,
        },
    })
}
