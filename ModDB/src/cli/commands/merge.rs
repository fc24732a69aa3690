//! `moddb merge`

use std::path::Path;

use modtools::model::{Document, by_key};

use crate::schemas::PatchKind;

pub fn execute(kind: PatchKind, base: &Path, override_file: &Path, output: &Path) -> anyhow::Result<()> {
    let merged = Document::load_merged(kind.document_schema(), [base, override_file], by_key)?;
    merged.save(output)?;

    println!("Merged {} {} entries into {}", merged.children().len(), kind, output.display());
    Ok(())
}
