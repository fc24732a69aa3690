//! `ModDB` - mod project builder for Baldur's Gate 3 content generation
//!
//! Generator programs open a [`Mod`] from a `moddb.toml` manifest, add stats
//! entities, localized strings and patched `.lsx` documents, then call
//! [`Mod::build`] to write the output tree.
//!
//! ```no_run
//! use moddb::Mod;
//! use modtools::gamedata::{Entity, EntityKind};
//!
//! let mut m = Mod::open("MyMod")?;
//! let name = m.loca("Smite_DisplayName", [("en", "Tidal Smite")])?;
//! let spell = m.ensure_entity("tidal_smite", |m| {
//!     let description = m.loca("Smite_Description", [("en", "Deal 1d8 cold damage.")])?;
//!     Ok(Entity::new("Target_TidalSmite", EntityKind::SpellData)
//!         .using("Target_Smite_Divine")
//!         .with("SpellType", "Target")
//!         .with("DisplayName", format!("{name};1"))
//!         .with("Description", format!("{description};1")))
//! })?;
//! println!("added {spell}");
//! m.build()?;
//! # Ok::<(), moddb::Error>(())
//! ```

pub use modtools;

pub mod error;
pub mod meta;
pub mod modbuilder;
pub mod project;
pub mod registry;
pub mod schemas;

pub use error::{Error, Result};
pub use modbuilder::{BuildReport, Mod};
pub use project::{MANIFEST_FILE, ProjectManifest};
pub use registry::Registry;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
