//! `moddb` command-line entry point

fn main() -> anyhow::Result<()> {
    moddb::cli::run_cli()
}
