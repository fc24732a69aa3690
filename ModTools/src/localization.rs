//! Mod-scoped localization tables
//!
//! Keys map to deterministic handles derived from the mod UUID, so the same
//! key produces the same handle on every build. Each key must carry text for
//! every registered language.
//!
//! ```
//! use modtools::localization::Localization;
//! use uuid::Uuid;
//!
//! let mut loca = Localization::new(Uuid::nil());
//! loca.add_language("en", "English");
//! let handle = loca.insert("Greeting", [("en", "Hello  there")])?;
//! assert_eq!(loca.text("Greeting", "en"), Some("Hello there"));
//! assert_eq!(loca.handle("Greeting")?, handle);
//! # Ok::<(), modtools::Error>(())
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::formats::loca::{LocaResource, LocalizedText, write_loca_xml};
use crate::utils::{loca_handle, normalize_text};

/// Version written for every generated `<content>` entry.
pub const CONTENT_VERSION: u16 = 1;

/// One key's handle and per-language text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    handle: String,
    texts: IndexMap<String, String>,
}

impl Translation {
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Normalized text for a short language name.
    #[must_use]
    pub fn text(&self, language: &str) -> Option<&str> {
        self.texts.get(language).map(String::as_str)
    }
}

/// A mod's string table.
#[derive(Debug, Clone)]
pub struct Localization {
    mod_uuid: Uuid,
    /// Short name to full name, e.g. `en` to `English`.
    languages: IndexMap<String, String>,
    entries: IndexMap<String, Translation>,
}

impl Localization {
    #[must_use]
    pub fn new(mod_uuid: Uuid) -> Self {
        Localization {
            mod_uuid,
            languages: IndexMap::new(),
            entries: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn mod_uuid(&self) -> Uuid {
        self.mod_uuid
    }

    /// Register a language. Later entries must supply text for it.
    pub fn add_language(&mut self, short: impl Into<String>, full: impl Into<String>) {
        self.languages.insert(short.into(), full.into());
    }

    /// Registered languages as `(short, full)` pairs.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.languages.iter().map(|(s, f)| (s.as_str(), f.as_str()))
    }

    /// Set the text of `key` in every registered language and return its
    /// handle. Replaces any previous text for the key.
    ///
    /// # Errors
    /// Fails if a registered language is missing or a supplied language was
    /// never registered. Nothing is stored on failure.
    pub fn insert<I, L, T>(&mut self, key: &str, texts: I) -> Result<String>
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: AsRef<str>,
    {
        let mut normalized: IndexMap<String, String> = IndexMap::new();
        for (language, text) in texts {
            let language = language.into();
            if !self.languages.contains_key(&language) {
                return Err(Error::UnregisteredLanguage {
                    key: key.to_string(),
                    language,
                });
            }
            normalized.insert(language, normalize_text(text.as_ref()));
        }
        if let Some(missing) = self.languages.keys().find(|l| !normalized.contains_key(*l)) {
            return Err(Error::MissingTranslation {
                key: key.to_string(),
                language: missing.clone(),
            });
        }

        let handle = loca_handle(&self.mod_uuid, key);
        self.entries.insert(
            key.to_string(),
            Translation {
                handle: handle.clone(),
                texts: normalized,
            },
        );
        Ok(handle)
    }

    /// Handle of an existing key.
    pub fn handle(&self, key: &str) -> Result<&str> {
        self.entries
            .get(key)
            .map(Translation::handle)
            .ok_or_else(|| Error::UnknownLocalizationKey(key.to_string()))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Translation> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn text(&self, key: &str, language: &str) -> Option<&str> {
        self.get(key).and_then(|t| t.text(language))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys and translations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Translation)> {
        self.entries.iter().map(|(k, t)| (k.as_str(), t))
    }

    /// The content list for one language.
    ///
    /// # Errors
    /// Fails if any key lacks text for `language`, which happens when the
    /// language was registered after the key was set.
    pub fn resource(&self, language: &str) -> Result<LocaResource> {
        let mut resource = LocaResource::new();
        for (key, translation) in &self.entries {
            let text = translation.text(language).ok_or_else(|| Error::MissingTranslation {
                key: key.clone(),
                language: language.to_string(),
            })?;
            resource.entries.push(LocalizedText {
                key: translation.handle.clone(),
                version: CONTENT_VERSION,
                text: text.to_string(),
            });
        }
        Ok(resource)
    }

    /// Write `Localization/<Full>/<Full>.loca.xml` under `mod_dir` for every
    /// registered language. Returns the written paths.
    pub fn build<P: AsRef<Path>>(&self, mod_dir: P) -> Result<Vec<PathBuf>> {
        let mod_dir = mod_dir.as_ref();
        let mut written = Vec::with_capacity(self.languages.len());
        for (short, full) in &self.languages {
            let resource = self.resource(short)?;
            let path = mod_dir
                .join("Localization")
                .join(full)
                .join(format!("{full}.loca.xml"));
            tracing::info!("Writing {} {} strings to {}", resource.entries.len(), full, path.display());
            write_loca_xml(&resource, &path)?;
            written.push(path);
        }
        Ok(written)
    }
}
