//! Validated entity collections

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

use super::entity::Entity;
use super::validation::StatsSchema;
use crate::error::{Error, Result};
use crate::formats::stats::write_stats;

/// Default text written at the top of every generated stats file.
pub const DEFAULT_PROLOGUE: &str = "// Generated by modtools. Changes will be overwritten.\n";

/// A set of uniquely named entities, each validated on the way in.
#[derive(Debug, Clone)]
pub struct GameData {
    schema: Arc<StatsSchema>,
    entities: IndexMap<String, Entity>,
}

impl GameData {
    #[must_use]
    pub fn new(schema: Arc<StatsSchema>) -> Self {
        GameData {
            schema,
            entities: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<StatsSchema> {
        &self.schema
    }

    /// Validate and add an entity.
    ///
    /// # Errors
    /// Fails if validation fails or an entity of the same name exists.
    pub fn add(&mut self, entity: Entity) -> Result<()> {
        self.schema.validate(&entity)?;
        if self.entities.contains_key(entity.name()) {
            return Err(Error::DuplicateEntity(entity.name().to_string()));
        }
        tracing::debug!("Added {} '{}'", entity.kind(), entity.name());
        self.entities.insert(entity.name().to_string(), entity);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Group entities by output file name. Files are sorted by name; entities
    /// keep insertion order within a file.
    pub fn files(&self) -> Result<BTreeMap<String, Vec<&Entity>>> {
        let mut files: BTreeMap<String, Vec<&Entity>> = BTreeMap::new();
        for entity in self.entities.values() {
            files.entry(entity.output_file()?).or_default().push(entity);
        }
        Ok(files)
    }

    /// Write one stats file per output group into `dir`, each starting with
    /// `prologue`. Returns the written paths.
    pub fn build<P: AsRef<Path>>(&self, dir: P, prologue: &str) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let files = self.files()?;
        tracing::info!("Writing {} entities to {} stats files in {}", self.len(), files.len(), dir.display());

        let mut written = Vec::with_capacity(files.len());
        for (name, entities) in files {
            let path = dir.join(&name);
            write_stats(&path, prologue, entities)?;
            tracing::debug!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
