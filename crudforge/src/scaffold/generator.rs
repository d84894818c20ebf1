//! CRUD scaffold orchestrator
//!
//! Sequences one run for one entity:
//! extract → check fields → derive names → select once → render every kind.
//!
//! A run either yields the complete artifact family or an error. Nothing is
//! handed to an [`ArtifactSink`] until every artifact has rendered.

use tracing::{info, warn};

use super::artifacts::{ArtifactRenderer, GeneratedArtifact, TemplateRegistry};
use super::entity::EntityMetadata;
use super::extractor::{Extractor, PatternExtractor};
use super::naming::{DerivedNames, NameDeriver};
use super::selection::{select, FieldChooser, Selection};
use crate::config::CrudforgeConfig;
use crate::error::{Error, Result};

/// Destination for rendered artifacts
pub trait ArtifactSink {
    /// Accept one artifact
    ///
    /// # Errors
    ///
    /// Implementations report write failures.
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<()>;
}

impl ArtifactSink for Vec<GeneratedArtifact> {
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<()> {
        self.push(artifact.clone());
        Ok(())
    }
}

/// Everything one run produced
#[derive(Debug)]
pub struct ScaffoldOutput {
    /// Extracted metadata
    pub entity: EntityMetadata,
    /// Names derived from it
    pub names: DerivedNames,
    /// The run-wide selection
    pub selection: Selection,
    /// Rendered artifacts, one per kind
    pub artifacts: Vec<GeneratedArtifact>,
}

/// Entity → artifact family pipeline
pub struct ScaffoldPipeline {
    config: CrudforgeConfig,
    extractor: Box<dyn Extractor>,
    templates: TemplateRegistry,
}

impl std::fmt::Debug for ScaffoldPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaffoldPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ScaffoldPipeline {
    /// Create a pipeline using the pattern extractor
    ///
    /// # Errors
    ///
    /// Returns an error if the templates (embedded or overridden through
    /// `render.template_dir`) cannot be loaded.
    pub fn new(config: CrudforgeConfig) -> Result<Self> {
        let templates = TemplateRegistry::with_overrides(config.render.template_dir.as_deref())?;
        Ok(Self {
            config,
            extractor: Box::new(PatternExtractor),
            templates,
        })
    }

    /// Replace the extractor
    #[must_use]
    pub fn with_extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &CrudforgeConfig {
        &self.config
    }

    /// Extract metadata and fail on an entity without fields
    ///
    /// # Errors
    ///
    /// Returns [`Error::Extraction`] or [`Error::NoFields`].
    pub fn inspect(&self, text: &str) -> Result<EntityMetadata> {
        let entity = self.extractor.extract(text)?;
        if entity.fields.is_empty() {
            return Err(Error::NoFields {
                entity: entity.simple_name,
            });
        }
        Ok(entity)
    }

    /// Derive names for extracted metadata
    #[must_use]
    pub fn derive_names(&self, entity: &EntityMetadata) -> DerivedNames {
        NameDeriver::new(self.config.naming.clone(), self.config.packages.clone())
            .derive(&entity.simple_name, &entity.package_path)
    }

    /// Run the whole pipeline and return every rendered artifact
    ///
    /// The chooser is invoked exactly once.
    ///
    /// # Errors
    ///
    /// Any failing stage aborts the run; no artifacts are returned.
    pub fn run(&self, text: &str, chooser: impl FieldChooser) -> Result<ScaffoldOutput> {
        let entity = self.inspect(text)?;
        let names = self.derive_names(&entity);
        info!(
            entity = %entity.simple_name,
            base = %names.base_name,
            root = %names.packages.root,
            "entity extracted"
        );

        let selection = select(&entity, chooser).inspect_err(|err| {
            warn!(entity = %entity.simple_name, error = %err, "selection rejected, nothing generated");
        })?;

        let artifacts = ArtifactRenderer::new(
            &self.templates,
            &entity,
            &names,
            &selection,
            &self.config.render,
        )
        .render_all()?;

        info!(
            entity = %entity.simple_name,
            fields = selection.len(),
            artifacts = artifacts.len(),
            "artifact family rendered"
        );

        Ok(ScaffoldOutput {
            entity,
            names,
            selection,
            artifacts,
        })
    }

    /// Run the pipeline and hand every artifact to `sink`
    ///
    /// # Errors
    ///
    /// Pipeline errors are returned before the sink sees anything. A sink
    /// error stops delivery of the remaining artifacts.
    pub fn run_into(
        &self,
        text: &str,
        chooser: impl FieldChooser,
        sink: &mut impl ArtifactSink,
    ) -> Result<ScaffoldOutput> {
        let output = self.run(text, chooser)?;
        for artifact in &output.artifacts {
            sink.write(artifact)?;
        }
        Ok(output)
    }
}
