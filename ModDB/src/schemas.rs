//! Schemas for base game files that mods patch
//!
//! Progressions and spell lists are the files mods most often merge into:
//! load the base file, find entries by UUID, edit them, write the result.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use modtools::formats::DataType;
use modtools::model::{DocumentSchema, Schema};

/// `Progressions.lsx` node kinds.
#[derive(Debug)]
pub struct Progressions {
    pub document: Arc<DocumentSchema>,
    pub progression: Arc<Schema>,
    pub subclasses: Arc<Schema>,
    pub subclass: Arc<Schema>,
}

pub fn progressions() -> &'static Progressions {
    static SCHEMAS: OnceLock<Progressions> = OnceLock::new();
    SCHEMAS.get_or_init(|| {
        let subclass = Schema::builder("SubClass")
            .attribute("Object", DataType::Guid)
            .build();
        let subclasses = Schema::builder("SubClasses").child(&subclass).build();
        let progression = Schema::builder("Progression")
            .key("UUID", DataType::Guid)
            .attribute("AllowImprovement", DataType::Bool)
            .attribute("Boosts", DataType::StringList)
            .attribute("IsMulticlass", DataType::Bool)
            .attribute("Level", DataType::UInt8)
            .attribute("Name", DataType::LSString)
            .attribute("PassivePrototypesAdded", DataType::StringList)
            .attribute("PassivePrototypesRemoved", DataType::StringList)
            .attribute("PassivesAdded", DataType::StringList)
            .attribute("PassivesRemoved", DataType::StringList)
            .attribute("ProgressionType", DataType::UInt8)
            .attribute("Selectors", DataType::StringList)
            .attribute("TableUUID", DataType::Guid)
            .child(&subclasses)
            .build();
        let document = DocumentSchema::new("Progressions", "root", &[Arc::clone(&progression)]);

        Progressions {
            document,
            progression,
            subclasses,
            subclass,
        }
    })
}

/// `SpellLists.lsx` node kinds.
#[derive(Debug)]
pub struct SpellLists {
    pub document: Arc<DocumentSchema>,
    pub spell_list: Arc<Schema>,
}

pub fn spell_lists() -> &'static SpellLists {
    static SCHEMAS: OnceLock<SpellLists> = OnceLock::new();
    SCHEMAS.get_or_init(|| {
        let spell_list = Schema::builder("SpellList")
            .key("UUID", DataType::Guid)
            .attribute("Comment", DataType::LSString)
            .attribute("Spells", DataType::StringList)
            .build();
        let document = DocumentSchema::new("SpellLists", "root", &[Arc::clone(&spell_list)]);

        SpellLists {
            document,
            spell_list,
        }
    })
}

/// A patchable base file kind, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchKind {
    Progressions,
    SpellLists,
}

impl PatchKind {
    #[must_use]
    pub fn document_schema(self) -> &'static Arc<DocumentSchema> {
        match self {
            PatchKind::Progressions => &progressions().document,
            PatchKind::SpellLists => &spell_lists().document,
        }
    }
}

impl fmt::Display for PatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatchKind::Progressions => "progressions",
            PatchKind::SpellLists => "spell-lists",
        })
    }
}

impl FromStr for PatchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "progressions" | "progression" => Ok(PatchKind::Progressions),
            "spell-lists" | "spelllists" | "spelllist" => Ok(PatchKind::SpellLists),
            _ => Err(format!(
                "Invalid kind '{s}'. Valid values: progressions, spell-lists"
            )),
        }
    }
}
