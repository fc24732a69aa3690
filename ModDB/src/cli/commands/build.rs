//! `moddb build`

use std::path::Path;

use crate::Mod;

pub fn execute(manifest: &Path, json: bool) -> anyhow::Result<()> {
    let report = Mod::load(manifest)?.build()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Built {} ({})", report.name, report.uuid);
        for file in &report.files {
            println!("  {}", file.display());
        }
    }
    Ok(())
}
