//! CLI command for migrating legacy databases

use crate::cli::Workspace;
use crate::migrate::migrate_file;

pub fn execute(workspace: &Workspace, compile: bool) -> anyhow::Result<()> {
    let layout = &workspace.layout;
    let Some(generation) = migrate_file(layout)? else {
        println!("Nothing to migrate: {} is missing or already SRL3", layout.database_path().display());
        return Ok(());
    };
    println!("Migrated {generation} database into Dumps");

    if compile {
        let report = crate::compiler::compile(layout)?;
        println!(
            "Compiled {} databases ({} entries) into {}",
            report.databases.len(),
            report.entry_count(),
            report.path.display()
        );
    }
    Ok(())
}
