//! Mod build context
//!
//! A [`Mod`] collects everything one generator run produces (stats entities,
//! localization, patched `.lsx` documents) and writes the output tree in one
//! pass.

use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use modtools::formats::stats::read_stats;
use modtools::gamedata::{Entity, GameData, StatsSchema};
use modtools::localization::Localization;
use modtools::model::{Document, DocumentSchema, Node};
use modtools::utils::name_uuid;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::meta::{Dependency, ModuleMeta};
use crate::project::{MANIFEST_FILE, ProjectManifest};
use crate::registry::Registry;

/// What a build wrote.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub name: String,
    pub folder: String,
    pub uuid: String,
    pub output_dir: PathBuf,
    pub entities: usize,
    pub strings: usize,
    pub documents: usize,
    pub files: Vec<PathBuf>,
}

/// One mod's generated content.
#[derive(Debug)]
pub struct Mod {
    manifest: ProjectManifest,
    root: PathBuf,
    uuid: Uuid,
    version64: i64,
    localization: Localization,
    stats: Option<GameData>,
    registry: Registry,
    documents: IndexMap<PathBuf, Document>,
    dependencies: Vec<Dependency>,
}

impl Mod {
    /// Start a build for `manifest`. Relative paths in the manifest resolve
    /// against `root`.
    ///
    /// # Errors
    /// Fails on an invalid manifest or unreadable stats schema files.
    pub fn new(manifest: ProjectManifest, root: impl Into<PathBuf>) -> Result<Self> {
        manifest.validate()?;
        let root = root.into();
        let uuid = manifest.uuid()?;
        let version64 = manifest.version64()?;

        let mut localization = Localization::new(uuid);
        for language in &manifest.languages {
            localization.add_language(language.short.clone(), language.full.clone());
        }

        let stats = match (&manifest.schema.modifiers, &manifest.schema.valuelists) {
            (Some(modifiers), Some(valuelists)) => {
                let schema = StatsSchema::load(root.join(modifiers), root.join(valuelists))?;
                Some(GameData::new(Arc::new(schema)))
            }
            _ => None,
        };

        tracing::info!("Building mod '{}' ({})", manifest.project.name, uuid);
        Ok(Mod {
            manifest,
            root,
            uuid,
            version64,
            localization,
            stats,
            registry: Registry::new(),
            documents: IndexMap::new(),
            dependencies: Vec::new(),
        })
    }

    /// Load a manifest file; its directory becomes the project root.
    pub fn load<P: AsRef<Path>>(manifest_path: P) -> Result<Self> {
        let manifest_path = manifest_path.as_ref();
        let manifest = ProjectManifest::load(manifest_path)?;
        let root = manifest_path
            .parent()
            .map_or_else(PathBuf::new, Path::to_path_buf);
        Self::new(manifest, root)
    }

    /// Load `moddb.toml` from a project directory.
    pub fn open<P: AsRef<Path>>(project_dir: P) -> Result<Self> {
        Self::load(project_dir.as_ref().join(MANIFEST_FILE))
    }

    /// Use an explicit stats schema instead of the manifest's files.
    pub fn set_stats_schema(&mut self, schema: StatsSchema) {
        self.stats = Some(GameData::new(Arc::new(schema)));
    }

    #[must_use]
    pub fn manifest(&self) -> &ProjectManifest {
        &self.manifest
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.manifest.project.name
    }

    #[must_use]
    pub fn folder(&self) -> &str {
        &self.manifest.project.folder
    }

    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// A stable GUID for generated content, derived from the mod UUID.
    #[must_use]
    pub fn make_uuid(&self, key: &str) -> Uuid {
        name_uuid(&self.uuid, key)
    }

    #[must_use]
    pub fn localization(&self) -> &Localization {
        &self.localization
    }

    pub fn localization_mut(&mut self) -> &mut Localization {
        &mut self.localization
    }

    /// Set a localized string and return its handle.
    pub fn loca<I, L, T>(&mut self, key: &str, texts: I) -> Result<String>
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: AsRef<str>,
    {
        Ok(self.localization.insert(key, texts)?)
    }

    #[must_use]
    pub fn stats(&self) -> Option<&GameData> {
        self.stats.as_ref()
    }

    /// Validate and add a stats entity.
    pub fn add_entity(&mut self, entity: Entity) -> Result<()> {
        let stats = self.stats.as_mut().ok_or(Error::NoStatsSchema)?;
        stats.add(entity)?;
        Ok(())
    }

    /// Add the entity built by `build` the first time `key` is seen and
    /// return its name. Later calls return the same name without building.
    pub fn ensure_entity<F>(&mut self, key: &str, build: F) -> Result<String>
    where
        F: FnOnce(&mut Mod) -> Result<Entity>,
    {
        if let Some(name) = self.registry.get(key) {
            return Ok(name.to_string());
        }
        let entity = build(self)?;
        let name = entity.name().to_string();
        self.add_entity(entity)?;
        self.registry.insert(key, name.clone());
        Ok(name)
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Register a document to be written at `relative` under
    /// `Public/<Folder>/`.
    pub fn add_document(&mut self, relative: impl Into<PathBuf>, document: Document) -> Result<()> {
        let relative = relative.into();
        if self.documents.contains_key(&relative) {
            return Err(Error::DuplicateDocument(relative.display().to_string()));
        }
        self.documents.insert(relative, document);
        Ok(())
    }

    pub fn document_mut(&mut self, relative: impl AsRef<Path>) -> Option<&mut Document> {
        self.documents.get_mut(relative.as_ref())
    }

    /// Root-level nodes across every registered document of one kind.
    pub fn nodes<'a>(&'a self, schema: &'a Arc<DocumentSchema>) -> impl Iterator<Item = &'a Node> + 'a {
        self.documents
            .values()
            .filter(move |doc| Arc::ptr_eq(doc.schema(), schema))
            .flat_map(|doc| doc.children().iter())
    }

    pub fn add_dependency(&mut self, dependency: Dependency) {
        self.dependencies.push(dependency);
    }

    fn base_dir(&self) -> Result<PathBuf> {
        self.manifest
            .build
            .base_data
            .as_ref()
            .map(|dir| self.root.join(dir))
            .ok_or(Error::NoBaseData)
    }

    /// Load a base game `.lsx` file from the cache, merged with its `.dev`
    /// override (`Foo.lsx` + `Foo.dev.lsx`) when one exists.
    pub fn load_base<K, F>(
        &self,
        relative: impl AsRef<Path>,
        schema: &Arc<DocumentSchema>,
        key: F,
    ) -> Result<Document>
    where
        K: Hash + Eq,
        F: FnMut(&Node) -> K,
    {
        let base = self.base_dir()?.join(relative);
        let mut paths = vec![base.clone()];
        let dev = dev_override(&base);
        if dev.is_file() {
            paths.push(dev);
        }
        Ok(Document::load_merged(schema, paths, key)?)
    }

    /// Read a base game stats file from the cache.
    pub fn load_base_stats(&self, relative: impl AsRef<Path>) -> Result<Vec<Entity>> {
        Ok(read_stats(self.base_dir()?.join(relative))?)
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.manifest.build.output_dir)
    }

    fn module_meta(&self) -> ModuleMeta {
        let project = &self.manifest.project;
        ModuleMeta {
            name: project.name.clone(),
            folder: project.folder.clone(),
            author: project.author.clone(),
            description: project.description.clone(),
            uuid: self.uuid,
            version64: self.version64,
            dependencies: self.dependencies.clone(),
        }
    }

    /// Write the complete output tree.
    ///
    /// - `Mods/<Folder>/meta.lsx`
    /// - `Mods/<Folder>/Localization/<Language>/<Language>.loca.xml`
    /// - `Public/<Folder>/Stats/Generated/Data/*.txt`
    /// - every registered document under `Public/<Folder>/`
    pub fn build(&self) -> Result<BuildReport> {
        let out = self.output_dir();
        let folder = self.folder();
        let mods_dir = out.join("Mods").join(folder);
        let public_dir = out.join("Public").join(folder);
        let mut files = Vec::new();

        let meta_path = mods_dir.join("meta.lsx");
        self.module_meta().to_document()?.save(&meta_path)?;
        files.push(meta_path);

        files.extend(self.localization.build(&mods_dir)?);

        if let Some(stats) = &self.stats {
            let data_dir = public_dir.join("Stats").join("Generated").join("Data");
            files.extend(stats.build(&data_dir, &self.manifest.build.stats_prologue)?);
        }

        for (relative, document) in &self.documents {
            let path = public_dir.join(relative);
            document.save(&path)?;
            files.push(path);
        }

        tracing::info!("Build complete: {} files in {}", files.len(), out.display());
        Ok(BuildReport {
            name: self.name().to_string(),
            folder: folder.to_string(),
            uuid: self.uuid.to_string(),
            output_dir: out,
            entities: self.stats.as_ref().map_or(0, GameData::len),
            strings: self.localization.len(),
            documents: self.documents.len(),
            files,
        })
    }
}

/// `Foo.lsx` -> `Foo.dev.lsx`
fn dev_override(path: &Path) -> PathBuf {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}.dev.{}", ext.to_string_lossy()),
        None => format!("{stem}.dev"),
    };
    path.with_file_name(name)
}
