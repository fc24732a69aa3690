//! Member validation against `Modifiers.txt` and `ValueLists.txt`

use std::path::Path;

use super::entity::{Entity, is_private};
use super::modifiers::Modifiers;
use super::valuelists::ValueLists;
use crate::error::{Error, Result};

/// The pair of schema files an entity is validated against.
#[derive(Debug, Clone, Default)]
pub struct StatsSchema {
    modifiers: Modifiers,
    valuelists: ValueLists,
}

impl StatsSchema {
    #[must_use]
    pub fn new(modifiers: Modifiers, valuelists: ValueLists) -> Self {
        StatsSchema {
            modifiers,
            valuelists,
        }
    }

    /// Load both schema files.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(modifiers: P, valuelists: Q) -> Result<Self> {
        Ok(Self::new(Modifiers::load(modifiers)?, ValueLists::load(valuelists)?))
    }

    #[must_use]
    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    #[must_use]
    pub fn valuelists(&self) -> &ValueLists {
        &self.valuelists
    }

    /// Check every non-private member of `entity`.
    ///
    /// # Errors
    /// The first member not declared for the entity's kind, or the first
    /// value outside its member's valuelist. List members are checked value
    /// by value.
    pub fn validate(&self, entity: &Entity) -> Result<()> {
        let kind = entity.kind().as_str();
        let table = self
            .modifiers
            .members(kind)
            .ok_or_else(|| Error::UnknownEntityKind(kind.to_string()))?;

        for (member, value) in entity.members() {
            if is_private(member) {
                continue;
            }
            let valuelist = table.get(member).ok_or_else(|| Error::UnknownMember {
                entity: entity.name().to_string(),
                member: member.to_string(),
                kind: kind.to_string(),
            })?;

            if self.valuelists.values(valuelist).is_none() {
                tracing::debug!("Valuelist '{}' for {}.{} is not declared; accepting any value", valuelist, kind, member);
                continue;
            }
            if let Some(bad) = value.values().iter().find(|v| !self.valuelists.accepts(valuelist, v)) {
                return Err(Error::InvalidValue {
                    entity: entity.name().to_string(),
                    value: bad.clone(),
                    member: member.to_string(),
                    kind: kind.to_string(),
                });
            }
        }
        Ok(())
    }
}
