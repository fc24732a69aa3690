//! # ModTools
//!
//! Schema-driven builders for Baldur's Gate 3 mod content.
//!
//! ## Layers
//!
//! - **`formats`** - untyped `.lsx`, `.loca.xml` and stats text readers/writers
//! - **`model`** - typed schemas, nodes, children collections and documents
//! - **`gamedata`** - flat stats entities validated against `Modifiers.txt`
//!   and `ValueLists.txt`
//! - **`localization`** - deterministic handles and per-language string tables
//!
//! ## Quick Start
//!
//! ```
//! use modtools::prelude::*;
//!
//! let spell_list = Schema::builder("SpellList")
//!     .key("UUID", DataType::Guid)
//!     .attribute("Spells", DataType::StringList)
//!     .build();
//! let lists = DocumentSchema::new("SpellLists", "root", &[spell_list.clone()]);
//!
//! let node = Node::builder(&spell_list)
//!     .attr("UUID", "4d1a2b3c-0000-4000-8000-000000000001")
//!     .attr("Spells", vec!["Target_Smite", "Shout_Rally"])
//!     .build()?;
//!
//! let doc = Document::with_nodes(&lists, [node])?;
//! assert!(doc.to_xml()?.contains("value=\"Target_Smite;Shout_Rally\""));
//! # Ok::<(), modtools::Error>(())
//! ```

pub mod error;
pub mod formats;
pub mod gamedata;
pub mod localization;
pub mod model;
pub mod utils;

pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::common::DataType;
    pub use crate::formats::lsx::{LsxDocument, LsxNode};
    pub use crate::gamedata::{Entity, EntityKind, GameData, MemberValue, StatsSchema};
    pub use crate::localization::Localization;
    pub use crate::model::{
        AttrValue, Attribute, Children, Document, DocumentSchema, Node, Schema, by_key,
    };
    pub use crate::utils::{loca_handle, name_uuid};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
