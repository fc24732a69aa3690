//! Command execution implementations

use super::Commands;
use super::{build, handle, merge, new, validate};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::New {
                dir,
                name,
                author,
                description,
            } => new::execute(dir, name, author, description),
            Commands::Validate {
                paths,
                modifiers,
                valuelists,
            } => validate::execute(paths, modifiers, valuelists),
            Commands::Handle {
                key,
                uuid,
                manifest,
            } => handle::execute(key, uuid.as_deref(), manifest.as_deref()),
            Commands::Merge {
                kind,
                base,
                override_file,
                output,
            } => merge::execute(*kind, base, override_file, output),
            Commands::Build { manifest, json } => build::execute(manifest, *json),
        }
    }
}
