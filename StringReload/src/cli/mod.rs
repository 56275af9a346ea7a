//! `StringReload` CLI - build, migrate and test translation databases

pub mod commands;
pub mod progress;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use commands::Commands;

use crate::config::Settings;
use crate::dump::WorkspaceLayout;
use crate::error::Error;

/// Config files looked up in the workspace directory when none is given
const DEFAULT_CONFIG_FILES: [&str; 2] = ["SRL.ini", "srl.toml"];

#[derive(Parser)]
#[command(name = "srl")]
#[command(about = "StringReload: translation database tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Workspace directory holding the database and Dumps
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Settings file (INI, or TOML by extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Settings and file layout every command works against
pub struct Workspace {
    pub settings: Settings,
    pub layout: WorkspaceLayout,
}

impl Workspace {
    /// Load settings from `config`, or from a default config file in `dir`
    ///
    /// # Errors
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn open(dir: &Path, config: Option<&Path>) -> anyhow::Result<Self> {
        let found = config.map(Path::to_path_buf).or_else(|| {
            DEFAULT_CONFIG_FILES
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
        });

        let settings = match found {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                Settings::load(&path)?
            }
            None => Settings::default(),
        };
        let layout = settings.layout(dir);
        Ok(Self { settings, layout })
    }
}

/// Report an unusable database, pause so the message can be read, and exit
pub fn fatal(err: &Error, pause_ms: u64) -> ! {
    tracing::error!("{}", err);
    if pause_ms > 0 {
        std::thread::sleep(Duration::from_millis(pause_ms));
    }
    std::process::exit(2)
}

/// Run the `StringReload` CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let workspace = Workspace::open(&cli.dir, cli.config.as_deref())?;
    cli.command.execute(&workspace)?;

    Ok(())
}
