//! CLI command for compiling Dumps

use std::time::Instant;

use crate::cli::Workspace;
use crate::cli::progress::{DISK, LOOKING_GLASS, print_done, print_step, print_warning, simple_spinner};
use crate::compiler::compile;

pub fn execute(workspace: &Workspace, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();
    let layout = &workspace.layout;

    if !quiet {
        print_step(1, 2, LOOKING_GLASS, &format!("Reading Dumps in {}...", layout.root().display()));
    }
    let spinner = (!quiet).then(|| simple_spinner("Compiling..."));
    let result = compile(layout);
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let report = result?;

    if quiet {
        return Ok(());
    }

    print_step(2, 2, DISK, &format!("Wrote {}", report.path.display()));
    for (name, count) in &report.databases {
        println!("  {name}: {count} entries");
    }
    println!(
        "  {} chars, {} unknown chars, {} replaces",
        report.chars, report.unknown, report.replaces
    );
    for violation in &report.violations {
        print_warning(&format!("Remap violation: {violation}"));
    }
    print_done(start.elapsed());
    Ok(())
}
