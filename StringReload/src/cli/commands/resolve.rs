//! CLI command for translating text

use std::io::BufRead;

use super::load_or_exit;
use crate::cli::Workspace;
use crate::engine::Reloader;

pub fn execute(workspace: &Workspace, text: &[String], no_dialog_check: bool) -> anyhow::Result<()> {
    let (mut snapshot, _) = load_or_exit(workspace)?;
    if no_dialog_check {
        snapshot.options.dialog_check = false;
    }
    let reloader = Reloader::from_snapshot(snapshot);

    if !text.is_empty() {
        for line in text {
            println!("{}", reloader.resolve(line));
        }
        return Ok(());
    }

    for line in std::io::stdin().lock().lines() {
        println!("{}", reloader.resolve(&line?));
    }
    Ok(())
}
