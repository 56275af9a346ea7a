//! `srl` - StringReload command-line tool

fn main() -> anyhow::Result<()> {
    stringreload::cli::run_cli()
}
