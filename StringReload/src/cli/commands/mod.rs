use clap::Subcommand;
use std::path::PathBuf;

use super::{Workspace, fatal};
use crate::engine::Snapshot;
use crate::loader::LoadReport;

pub mod check;
pub mod compile;
pub mod config;
pub mod inspect;
pub mod migrate;
pub mod resolve;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile the workspace's Dumps into its database
    Compile {
        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Convert a legacy database (TLBot cache, SRL1, SRL2) back into Dumps
    Migrate {
        /// Compile the Dumps into an SRL3 database afterwards
        #[arg(long)]
        compile: bool,
    },

    /// Show the contents of a database file
    Inspect {
        /// Database file (defaults to the workspace's database)
        source: Option<PathBuf>,

        /// List every entry, not just totals
        #[arg(short, long)]
        entries: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Translate text through the workspace's database
    Resolve {
        /// Text to translate (reads stdin lines when omitted)
        text: Vec<String>,

        /// Translate even text the dialog filter rejects
        #[arg(long)]
        no_dialog_check: bool,
    },

    /// Bring the database up to date, load it and report problems
    Check {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the effective settings as TOML
    Config,
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, workspace: &Workspace) -> anyhow::Result<()> {
        match self {
            Commands::Compile { quiet } => compile::execute(workspace, *quiet),
            Commands::Migrate { compile } => migrate::execute(workspace, *compile),
            Commands::Inspect {
                source,
                entries,
                json,
            } => inspect::execute(workspace, source.as_deref(), *entries, *json),
            Commands::Resolve {
                text,
                no_dialog_check,
            } => resolve::execute(workspace, text, *no_dialog_check),
            Commands::Check { json } => check::execute(workspace, *json),
            Commands::Config => config::execute(workspace),
        }
    }
}

/// Run the initialization pipeline. An unusable database ends the process.
pub(crate) fn load_or_exit(workspace: &Workspace) -> anyhow::Result<(Snapshot, LoadReport)> {
    match crate::pipeline::initialize(&workspace.layout, &workspace.settings) {
        Ok(loaded) => Ok(loaded),
        Err(e) if e.is_corruption() => fatal(&e, workspace.settings.fatal_pause_ms),
        Err(e) => Err(e.into()),
    }
}
