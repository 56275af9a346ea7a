//! # StringReload
//!
//! A pure-Rust engine for substituting translations into the strings a running
//! application produces, for fan localization of software without native
//! localization hooks.
//!
//! ## What it covers
//!
//! - **Dumps** - human-editable translation, character-remap and replace lists
//! - **SRL3 databases** - the current versioned binary format, compiled from Dumps
//! - **Legacy migration** - TLBot caches, SRL1 and SRL2 databases are turned back
//!   into Dumps and recompiled
//! - **Runtime engine** - normalization, exact and wildcard lookup across named
//!   databases, character remapping, affix-preserving trimming and the dialog
//!   heuristic
//!
//! ## Quick Start
//!
//! ```no_run
//! use stringreload::prelude::*;
//!
//! let settings = Settings::default();
//! let layout = WorkspaceLayout::new("data/");
//!
//! // Migrates legacy databases and compiles Dumps as needed
//! let reloader = Reloader::initialize(layout, settings)?;
//! let translated = reloader.resolve("  Hello, world!  ");
//! println!("{translated}");
//! # Ok::<(), stringreload::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `srl` command-line binary

pub mod compiler;
pub mod config;
pub mod dump;
pub mod engine;
pub mod error;
pub mod formats;
pub mod host;
pub mod loader;
pub mod migrate;
pub mod pipeline;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::compiler::{CompileReport, compile};
    pub use crate::config::{ConfigSource, IniConfig, Settings};
    pub use crate::dump::{
        CharPair, DumpSet, ReplacePair, TranslationEntry, UnknownChar, WorkspaceLayout,
    };
    pub use crate::engine::{Reloader, Snapshot, is_dialog};
    pub use crate::error::{Error, Result};
    pub use crate::formats::FormatGeneration;
    pub use crate::formats::srl3::{SrlData, SrlDatabase, parse_srl3_bytes, read_srl3};
    pub use crate::host::HostStrings;
    pub use crate::loader::{LoadReport, load};
    pub use crate::migrate::migrate_file;
    pub use crate::pipeline::initialize;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
