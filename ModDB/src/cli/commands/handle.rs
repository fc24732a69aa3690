//! `moddb handle`

use std::path::Path;

use anyhow::Context;
use uuid::Uuid;

use crate::project::ProjectManifest;

pub fn execute(key: &str, uuid: Option<&str>, manifest: Option<&Path>) -> anyhow::Result<()> {
    let mod_uuid = match (uuid, manifest) {
        (Some(uuid), _) => Uuid::parse_str(uuid).with_context(|| format!("invalid UUID '{uuid}'"))?,
        (None, Some(path)) => ProjectManifest::load(path)?.uuid()?,
        (None, None) => anyhow::bail!("either --uuid or --manifest is required"),
    };

    println!("{}", modtools::utils::loca_handle(&mod_uuid, key));
    Ok(())
}
