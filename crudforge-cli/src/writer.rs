//! Filesystem sink for rendered artifacts

use crudforge::error::{Error, Result};
use crudforge::scaffold::{ArtifactSink, GeneratedArtifact};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes each artifact to `<root>/<package dirs>/<Name>.java`
#[derive(Debug)]
pub struct FsSink {
    root: PathBuf,
    dry_run: bool,
    written: Vec<PathBuf>,
}

impl FsSink {
    /// Sink rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
            written: Vec::new(),
        }
    }

    /// Record destinations without touching the filesystem
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Output root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destinations handled so far, in delivery order
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ArtifactSink for FsSink {
    fn write(&mut self, artifact: &GeneratedArtifact) -> Result<()> {
        let path = self.root.join(artifact.relative_path());

        if !self.dry_run {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| Error::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, &artifact.body).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "artifact written");
        }

        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudforge::scaffold::ArtifactKind;
    use tempfile::TempDir;

    fn dto() -> GeneratedArtifact {
        GeneratedArtifact {
            kind: ArtifactKind::Dto,
            logical_name: "OrderDto".to_string(),
            package_path: "com.acme.app.models.dtos".to_string(),
            body: "package com.acme.app.models.dtos;\n".to_string(),
        }
    }

    #[test]
    fn test_writes_into_package_directories() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = FsSink::new(temp_dir.path());

        sink.write(&dto()).unwrap();

        let expected = temp_dir.path().join("com/acme/app/models/dtos/OrderDto.java");
        assert_eq!(sink.written(), [expected.clone()]);
        assert_eq!(
            fs::read_to_string(expected).unwrap(),
            "package com.acme.app.models.dtos;\n"
        );
    }

    #[test]
    fn test_dry_run_leaves_disk_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = FsSink::new(temp_dir.path()).dry_run(true);

        sink.write(&dto()).unwrap();

        assert_eq!(sink.written().len(), 1);
        assert!(!temp_dir.path().join("com").exists());
    }

    #[test]
    fn test_unwritable_root_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut sink = FsSink::new(&blocker);

        let err = sink.write(&dto()).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
