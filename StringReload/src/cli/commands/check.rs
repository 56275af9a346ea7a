//! CLI command for validating a workspace

use serde::Serialize;

use super::load_or_exit;
use crate::cli::Workspace;
use crate::cli::progress::{GEAR, LOOKING_GLASS, print_step, print_warning};
use crate::compiler::assemble;
use crate::loader::LoadReport;

#[derive(Serialize)]
struct CheckReport {
    load: LoadReport,
    violations: Vec<String>,
}

pub fn execute(workspace: &Workspace, json: bool) -> anyhow::Result<()> {
    if !json {
        print_step(1, 2, LOOKING_GLASS, "Scanning Dumps...");
    }
    let (_, violations) = assemble(&workspace.layout)?;

    if !json {
        print_step(2, 2, GEAR, "Loading database...");
    }
    let (_, load) = load_or_exit(workspace)?;
    let report = CheckReport { load, violations };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let load = &report.load;
    println!(
        "  {} databases, {} exact entries, {} masks",
        load.databases, load.exact_entries, load.mask_entries
    );
    println!(
        "  {} chars, {} unknown chars, {} replaces",
        load.chars, load.unknown, load.replaces
    );
    for violation in &report.violations {
        print_warning(&format!("Remap violation: {violation}"));
    }
    if report.violations.is_empty() {
        println!("  no remap violations");
    }
    Ok(())
}
