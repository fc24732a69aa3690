//! Flat stats entities and their validation
//!
//! An [`Entity`] is a named record of one [`EntityKind`] with an optional
//! `using` base and free-form members. A [`GameData`] collection accepts an
//! entity only after [`StatsSchema`] has checked every member against
//! `Modifiers.txt` and `ValueLists.txt`.

mod collection;
pub mod entity;
mod modifiers;
mod validation;
mod valuelists;

pub use collection::{DEFAULT_PROLOGUE, GameData};
pub use entity::{Entity, EntityKind, Filing, MemberValue, is_private};
pub use modifiers::Modifiers;
pub use validation::StatsSchema;
pub use valuelists::ValueLists;
