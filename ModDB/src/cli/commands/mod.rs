use clap::Subcommand;
use std::path::PathBuf;

use crate::schemas::PatchKind;

pub mod build;
pub mod execute;
pub mod handle;
pub mod merge;
pub mod new;
pub mod validate;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new mod project with a fresh moddb.toml
    New {
        /// Project directory (created if missing)
        dir: PathBuf,

        /// Display name of the mod
        #[arg(long)]
        name: String,

        /// Author name
        #[arg(long)]
        author: String,

        /// Mod description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Validate stats files against Modifiers.txt and ValueLists.txt
    Validate {
        /// Stats .txt files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to Modifiers.txt
        #[arg(long)]
        modifiers: PathBuf,

        /// Path to ValueLists.txt
        #[arg(long)]
        valuelists: PathBuf,
    },

    /// Print the localization handle for a key
    Handle {
        /// Localization key
        key: String,

        /// Mod UUID
        #[arg(long, conflicts_with = "manifest", required_unless_present = "manifest")]
        uuid: Option<String>,

        /// Read the mod UUID from a moddb.toml
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// Merge an override .lsx file into a base file by UUID
    Merge {
        /// Document kind (progressions, spell-lists)
        kind: PatchKind,

        /// Base file
        base: PathBuf,

        /// Override file; its entries win
        #[arg(value_name = "OVERRIDE")]
        override_file: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build meta.lsx and localization for a project
    Build {
        /// Path to moddb.toml
        #[arg(short, long, default_value = crate::project::MANIFEST_FILE)]
        manifest: PathBuf,

        /// Print the build report as JSON
        #[arg(long)]
        json: bool,
    },
}
