//! `moddb validate`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use modtools::formats::stats::read_stats;
use modtools::gamedata::{GameData, StatsSchema};
use walkdir::WalkDir;

/// Expand directories to the `.txt` files beneath them.
fn stats_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(walkdir::DirEntry::into_path)
                .filter(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt")))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    files
}

pub fn execute(paths: &[PathBuf], modifiers: &Path, valuelists: &Path) -> anyhow::Result<()> {
    let schema = Arc::new(StatsSchema::load(modifiers, valuelists)?);
    let mut data = GameData::new(schema);

    let files = stats_files(paths);
    for file in &files {
        for entity in read_stats(file)? {
            data.add(entity)?;
        }
    }

    println!("Validation: PASSED ({} entries in {} files)", data.len(), files.len());
    Ok(())
}
