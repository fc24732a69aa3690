//! `moddb new`

use std::path::Path;

use anyhow::bail;

use crate::project::{MANIFEST_FILE, ProjectManifest};

pub fn execute(dir: &Path, name: &str, author: &str, description: &str) -> anyhow::Result<()> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if manifest_path.exists() {
        bail!("{} already exists", manifest_path.display());
    }

    let manifest = ProjectManifest::new(name, author, description);
    manifest.save(&manifest_path)?;

    println!("Created {}", manifest_path.display());
    println!("  Folder: {}", manifest.project.folder);
    println!("  UUID:   {}", manifest.project.uuid);
    Ok(())
}
