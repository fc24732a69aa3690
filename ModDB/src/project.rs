//! Project manifest types for moddb.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::meta::{parse_version_string, to_folder_name, version_to_int64};

/// File name of the manifest at a project root.
pub const MANIFEST_FILE: &str = "moddb.toml";

fn default_version() -> String {
    "1.0.0.0".to_string()
}

fn default_languages() -> Vec<Language> {
    vec![Language {
        short: "en".to_string(),
        full: "English".to_string(),
    }]
}

fn default_output_dir() -> String {
    "build".to_string()
}

fn default_prologue() -> String {
    modtools::gamedata::DEFAULT_PROLOGUE.to_string()
}

/// The full project manifest (moddb.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub project: ProjectMeta,
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub schema: SchemaPaths,
    #[serde(default)]
    pub build: BuildSettings,
}

/// Mod project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub name: String,
    pub folder: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub uuid: String,
    /// Dotted (`1.2.0.0`) or raw Version64.
    #[serde(default = "default_version")]
    pub version: String,
}

/// A localization language: `short` keys translations, `full` names the
/// output directory and file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub short: String,
    pub full: String,
}

/// Stats schema files. Relative paths resolve against the project root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaPaths {
    pub modifiers: Option<PathBuf>,
    pub valuelists: Option<PathBuf>,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Directory of extracted base game files, read by `Mod::load_base`.
    #[serde(default)]
    pub base_data: Option<PathBuf>,
    #[serde(default = "default_prologue")]
    pub stats_prologue: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            base_data: None,
            stats_prologue: default_prologue(),
        }
    }
}

impl ProjectManifest {
    /// A fresh manifest with a random UUID and version 1.0.0.0.
    #[must_use]
    pub fn new(name: &str, author: &str, description: &str) -> Self {
        ProjectManifest {
            project: ProjectMeta {
                name: name.to_string(),
                folder: to_folder_name(name),
                author: author.to_string(),
                description: description.to_string(),
                uuid: Uuid::new_v4().to_string(),
                version: default_version(),
            },
            languages: default_languages(),
            schema: SchemaPaths::default(),
            build: BuildSettings::default(),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let manifest: ProjectManifest = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Reading manifest {}", path.display());
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Check the fields that must parse before a build can start.
    pub fn validate(&self) -> Result<()> {
        if self.project.folder.is_empty() {
            return Err(Error::Manifest {
                field: "project.folder",
                reason: "must not be empty".to_string(),
            });
        }
        if self.languages.is_empty() {
            return Err(Error::Manifest {
                field: "languages",
                reason: "at least one language is required".to_string(),
            });
        }
        self.uuid()?;
        self.version()?;
        Ok(())
    }

    pub fn uuid(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.project.uuid).map_err(|e| Error::Manifest {
            field: "project.uuid",
            reason: e.to_string(),
        })
    }

    /// `(major, minor, revision, build)`.
    pub fn version(&self) -> Result<(u32, u32, u32, u32)> {
        parse_version_string(&self.project.version).ok_or_else(|| Error::Manifest {
            field: "project.version",
            reason: format!("cannot parse '{}'", self.project.version),
        })
    }

    pub fn version64(&self) -> Result<i64> {
        let (major, minor, revision, build) = self.version()?;
        Ok(version_to_int64(major, minor, revision, build))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_manifest_roundtrip() {
        let mut manifest = ProjectManifest::new("Oath of the Tide", "ModderName", "A paladin subclass");
        manifest.languages.push(Language {
            short: "fr".to_string(),
            full: "French".to_string(),
        });
        manifest.schema.modifiers = Some(PathBuf::from("schema/Modifiers.txt"));

        let toml_str = manifest.to_toml().unwrap();
        let parsed = ProjectManifest::parse(&toml_str).unwrap();

        assert_eq!(parsed.project.name, "Oath of the Tide");
        assert_eq!(parsed.project.folder, "Oath_of_the_Tide");
        assert_eq!(parsed.languages, manifest.languages);
        assert_eq!(parsed.schema.modifiers, Some(PathBuf::from("schema/Modifiers.txt")));
        assert_eq!(parsed.schema.valuelists, None);
        assert_eq!(parsed.uuid().unwrap(), manifest.uuid().unwrap());
    }

    #[test]
    fn test_minimal_manifest_takes_defaults() {
        let parsed = ProjectManifest::parse(
            r#"
[project]
name = "Tide"
folder = "Tide"
author = "Me"
uuid = "550e8400-e29b-41d4-a716-446655440000"
"#,
        )
        .unwrap();

        assert_eq!(parsed.project.version, "1.0.0.0");
        assert_eq!(parsed.languages, default_languages());
        assert_eq!(parsed.build.output_dir, "build");
        assert!(parsed.build.base_data.is_none());
        assert_eq!(parsed.build.stats_prologue, modtools::gamedata::DEFAULT_PROLOGUE);
        assert_eq!(parsed.version64().unwrap(), 1 << 55);
    }

    #[test]
    fn test_invalid_uuid_rejected() {
        let err = ProjectManifest::parse(
            r#"
[project]
name = "Tide"
folder = "Tide"
author = "Me"
uuid = "not-a-uuid"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Manifest { field: "project.uuid", .. }));
    }

    #[test]
    fn test_invalid_version_rejected() {
        let mut manifest = ProjectManifest::new("Tide", "Me", "");
        manifest.project.version = "1.x".to_string();
        assert!(matches!(manifest.validate(), Err(Error::Manifest { field: "project.version", .. })));
    }
}
