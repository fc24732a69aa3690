//! Meta.lsx generation
//!
//! The module descriptor is declared with the same schema system as any
//! other `.lsx` document, so it validates like one.

use std::sync::{Arc, OnceLock};

use modtools::formats::DataType;
use modtools::model::{Document, DocumentSchema, Node, Schema};
use uuid::Uuid;

/// Node kinds of `meta.lsx`.
#[derive(Debug)]
pub struct MetaSchemas {
    pub document: Arc<DocumentSchema>,
    pub module_info: Arc<Schema>,
    pub publish_version: Arc<Schema>,
    pub target_modes: Arc<Schema>,
    pub target: Arc<Schema>,
    pub dependencies: Arc<Schema>,
    pub module_short_desc: Arc<Schema>,
}

/// The shared `meta.lsx` schemas.
pub fn meta_schemas() -> &'static MetaSchemas {
    static SCHEMAS: OnceLock<MetaSchemas> = OnceLock::new();
    SCHEMAS.get_or_init(|| {
        let publish_version = Schema::builder("PublishVersion")
            .attribute("Version64", DataType::Int64)
            .build();
        let target = Schema::builder("Target")
            .attribute("Object", DataType::FixedString)
            .build();
        let target_modes = Schema::builder("TargetModes").child(&target).build();
        let module_info = Schema::builder("ModuleInfo")
            .key("UUID", DataType::FixedString)
            .attribute("Author", DataType::LSString)
            .attribute("CharacterCreationLevelName", DataType::FixedString)
            .attribute("Description", DataType::LSString)
            .attribute("Folder", DataType::LSString)
            .attribute("LobbyLevelName", DataType::FixedString)
            .attribute("MD5", DataType::LSString)
            .attribute("MainMenuBackgroundVideo", DataType::FixedString)
            .attribute("MenuLevelName", DataType::FixedString)
            .attribute("Name", DataType::LSString)
            .attribute("NumPlayers", DataType::UInt8)
            .attribute("PhotoBooth", DataType::FixedString)
            .attribute("StartupLevelName", DataType::FixedString)
            .attribute("Tags", DataType::LSString)
            .attribute("Type", DataType::FixedString)
            .attribute("Version64", DataType::Int64)
            .child(&publish_version)
            .child(&target_modes)
            .build();
        let module_short_desc = Schema::builder("ModuleShortDesc")
            .key("UUID", DataType::FixedString)
            .attribute("Folder", DataType::LSString)
            .attribute("MD5", DataType::LSString)
            .attribute("Name", DataType::LSString)
            .attribute("Version64", DataType::Int64)
            .build();
        let dependencies = Schema::builder("Dependencies")
            .child(&module_short_desc)
            .build();
        let document = DocumentSchema::new(
            "Config",
            "root",
            &[Arc::clone(&dependencies), Arc::clone(&module_info)],
        );

        MetaSchemas {
            document,
            module_info,
            publish_version,
            target_modes,
            target,
            dependencies,
            module_short_desc,
        }
    })
}

/// Another mod this one requires to be loaded first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub folder: String,
    pub uuid: Uuid,
    pub version64: i64,
}

/// Everything `meta.lsx` says about a module.
#[derive(Debug, Clone)]
pub struct ModuleMeta {
    pub name: String,
    pub folder: String,
    pub author: String,
    pub description: String,
    pub uuid: Uuid,
    pub version64: i64,
    pub dependencies: Vec<Dependency>,
}

impl ModuleMeta {
    /// Build the `meta.lsx` document.
    pub fn to_document(&self) -> modtools::Result<Document> {
        let schemas = meta_schemas();

        let mut dependencies = Node::builder(&schemas.dependencies);
        for dep in &self.dependencies {
            dependencies = dependencies.child(
                Node::builder(&schemas.module_short_desc)
                    .attr("Folder", dep.folder.as_str())
                    .attr("MD5", "")
                    .attr("Name", dep.name.as_str())
                    .attr("UUID", dep.uuid)
                    .attr("Version64", dep.version64)
                    .build()?,
            );
        }

        let module_info = Node::builder(&schemas.module_info)
            .attr("Author", self.author.as_str())
            .attr("CharacterCreationLevelName", "")
            .attr("Description", self.description.as_str())
            .attr("Folder", self.folder.as_str())
            .attr("LobbyLevelName", "")
            .attr("MD5", "")
            .attr("MainMenuBackgroundVideo", "")
            .attr("MenuLevelName", "")
            .attr("Name", self.name.as_str())
            .attr("NumPlayers", 4u8)
            .attr("PhotoBooth", "")
            .attr("StartupLevelName", "")
            .attr("Tags", "")
            .attr("Type", "Add-on")
            .attr("UUID", self.uuid)
            .attr("Version64", self.version64)
            .child(
                Node::builder(&schemas.publish_version)
                    .attr("Version64", self.version64)
                    .build()?,
            )
            .child(
                Node::builder(&schemas.target_modes)
                    .child(
                        Node::builder(&schemas.target)
                            .attr("Object", "Story")
                            .build()?,
                    )
                    .build()?,
            )
            .build()?;

        Document::with_nodes(&schemas.document, [dependencies.build()?, module_info])
    }
}

/// Convert version components to BG3's int64 format
///
/// BG3 version format: major << 55 | minor << 47 | revision << 31 | build
#[must_use]
pub fn version_to_int64(major: u32, minor: u32, revision: u32, build: u32) -> i64 {
    (i64::from(major) << 55) | (i64::from(minor) << 47) | (i64::from(revision) << 31) | i64::from(build)
}

/// Parse a version string into components
///
/// Accepts:
/// - Full version: "1.0.0.0"
/// - Partial versions: "1", "1.0", "1.0.0" (missing parts default to 0)
/// - Raw Version64 integer: "36028797018963968"
#[must_use]
pub fn parse_version_string(version: &str) -> Option<(u32, u32, u32, u32)> {
    // Values at or above 2^31 without dots are Version64; smaller ones are a
    // bare major version.
    const VERSION64_THRESHOLD: i64 = 1 << 31;

    let trimmed = version.trim();
    if !trimmed.contains('.') {
        let v64 = trimmed.parse::<i64>().ok()?;
        if v64 >= VERSION64_THRESHOLD {
            let major = u32::try_from((v64 >> 55) & 0x7F).ok()?;
            let minor = u32::try_from((v64 >> 47) & 0xFF).ok()?;
            let revision = u32::try_from((v64 >> 31) & 0xFFFF).ok()?;
            let build = u32::try_from(v64 & 0x7FFF_FFFF).ok()?;
            return Some((major, minor, revision, build));
        }
        return Some((u32::try_from(v64).ok()?, 0, 0, 0));
    }

    let parts: Vec<&str> = trimmed.split('.').collect();
    if parts.len() > 4 {
        return None;
    }
    let mut numbers = [0u32; 4];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part.parse().ok()?;
    }
    Some((numbers[0], numbers[1], numbers[2], numbers[3]))
}

/// Convert a string to a safe folder name
///
/// - Spaces become underscores
/// - Special characters (apostrophes, hyphens, parentheses, etc.) are stripped
/// - Multiple underscores are collapsed
#[must_use]
pub fn to_folder_name(s: &str) -> String {
    let mut collapsed = String::with_capacity(s.len());
    let mut prev_underscore = true;
    for c in s.chars() {
        if c.is_alphanumeric() {
            collapsed.push(c);
            prev_underscore = false;
        } else if (c == ' ' || c == '_') && !prev_underscore {
            collapsed.push('_');
            prev_underscore = true;
        }
    }
    if collapsed.ends_with('_') {
        collapsed.pop();
    }
    collapsed
}
