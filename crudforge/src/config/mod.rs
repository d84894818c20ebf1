//! Configuration management for crudforge
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `CRUDFORGE_` prefix, `__` for nesting)
//! 2. An explicit file passed on the command line
//! 3. `./crudforge.toml` (project)
//! 4. `~/.config/crudforge/config.toml` (user config, XDG)
//! 5. Hardcoded defaults (fallback)
//!
//! Environment variable format: `CRUDFORGE_SECTION__FIELD_NAME`, for example
//! `CRUDFORGE_PACKAGES__MODE=root`.
//!
//! # Example Configuration
//!
//! ```toml
//! [naming]
//! marker = "Entity"
//! pluralization = "naive"
//!
//! [packages]
//! mode = "root"
//! entity_suffix = "models.entities"
//! root_depth = 3
//!
//! [render]
//! api_prefix = "/1.0"
//! audit = true
//! controller_id = 40
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Project-local configuration file name
pub const LOCAL_CONFIG_FILE: &str = "crudforge.toml";

/// How the plural route segment is formed from the base name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pluralization {
    /// Lower-case the base name and append `s`
    #[default]
    Naive,
    /// English plural rules (`category` -> `categories`)
    Inflector,
}

/// How sibling package paths are derived from the entity package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageMode {
    /// Replace the trailing entity segment group with the artifact's group
    #[default]
    Suffix,
    /// Keep the first `root_depth` segments and append the artifact's group
    Root,
}

/// Naming settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingSettings {
    /// Marker token stripped from the end of the entity name
    pub marker: String,

    /// Route pluralization strategy
    pub pluralization: Pluralization,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            marker: "Entity".to_string(),
            pluralization: Pluralization::Naive,
        }
    }
}

/// Package derivation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageSettings {
    /// Derivation mode
    pub mode: PackageMode,

    /// Trailing segment group that identifies the entity package (suffix mode)
    pub entity_suffix: String,

    /// Number of leading segments kept as the root package (root mode)
    pub root_depth: usize,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            mode: PackageMode::Suffix,
            entity_suffix: "models.entities".to_string(),
            root_depth: 3,
        }
    }
}

/// Rendering settings for the generated sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Versioned prefix for every request-entry-point route
    pub api_prefix: String,

    /// Emit audit annotations on mutating entry points
    pub audit: bool,

    /// Controller id used by the audit annotations
    pub controller_id: u32,

    /// Directory holding `<kind>.java.j2` template overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            api_prefix: "/1.0".to_string(),
            audit: true,
            controller_id: 40,
            template_dir: None,
        }
    }
}

/// Complete crudforge configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrudforgeConfig {
    /// Naming settings
    #[serde(default)]
    pub naming: NamingSettings,

    /// Package derivation settings
    #[serde(default)]
    pub packages: PackageSettings,

    /// Rendering settings
    #[serde(default)]
    pub render: RenderSettings,
}

impl CrudforgeConfig {
    /// Load configuration from the standard locations
    ///
    /// `explicit` is merged after the user and project files, so a file passed
    /// on the command line wins over both. Environment variables win over all
    /// files.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file contains invalid TOML or a
    /// value cannot be converted to its field type.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Self::defaults()?;

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("CRUDFORGE_").split("__").lowercase(true));

        Ok(figment.extract()?)
    }

    /// Load configuration from a single file on top of the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or a value cannot be
    /// converted to its field type.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::defaults()?.merge(Toml::file(path)).extract()?;
        Ok(config)
    }

    /// Get the recommended XDG config path
    ///
    /// Returns `~/.config/crudforge/config.toml` on Linux.
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(LOCAL_CONFIG_FILE),
            |config_dir| config_dir.join("crudforge").join("config.toml"),
        )
    }

    fn defaults() -> Result<Figment> {
        Ok(Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = CrudforgeConfig::default();
        assert_eq!(config.naming.marker, "Entity");
        assert_eq!(config.naming.pluralization, Pluralization::Naive);
        assert_eq!(config.packages.mode, PackageMode::Suffix);
        assert_eq!(config.packages.entity_suffix, "models.entities");
        assert_eq!(config.packages.root_depth, 3);
        assert_eq!(config.render.api_prefix, "/1.0");
        assert!(config.render.audit);
        assert!(config.render.template_dir.is_none());
    }

    #[test]
    fn test_load_from_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crudforge.toml");
        fs::write(
            &path,
            "[packages]\nmode = \"root\"\nroot_depth = 2\n\n[naming]\npluralization = \"inflector\"\n",
        )
        .unwrap();

        let config = CrudforgeConfig::load_from(&path).unwrap();
        assert_eq!(config.packages.mode, PackageMode::Root);
        assert_eq!(config.packages.root_depth, 2);
        assert_eq!(config.naming.pluralization, Pluralization::Inflector);
        // untouched sections keep their defaults
        assert_eq!(config.naming.marker, "Entity");
        assert_eq!(config.render.controller_id, 40);
    }

    #[test]
    fn test_load_from_rejects_bad_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crudforge.toml");
        fs::write(&path, "[packages]\nmode = \"sideways\"\n").unwrap();

        assert!(CrudforgeConfig::load_from(&path).is_err());
    }
}
