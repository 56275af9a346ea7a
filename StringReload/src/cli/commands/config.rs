//! CLI command for printing the effective settings

use crate::cli::Workspace;

pub fn execute(workspace: &Workspace) -> anyhow::Result<()> {
    println!("# workspace: {}", workspace.layout.root().display());
    print!("{}", toml::to_string_pretty(&workspace.settings)?);
    Ok(())
}
