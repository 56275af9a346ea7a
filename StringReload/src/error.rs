//! Error types for `StringReload`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `StringReload` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Unexpected end of file.
    #[error("unexpected end of file")]
    UnexpectedEof,

    // ==================== Database Format Errors ====================
    /// The leading signature matches none of the known generations.
    #[error("failed to initialize - corrupted data (signature {signature:#010X})")]
    CorruptedData {
        /// The signature read from the file, little-endian.
        signature: u32,
    },

    /// The SRL3 version field is not supported.
    #[error("unexpected SRL database format version: {version}")]
    UnsupportedVersion {
        /// The version number found in the file.
        version: u16,
    },

    /// A string does not fit its length prefix.
    #[error("string of {len} bytes exceeds the {max} byte limit")]
    StringTooLong {
        /// Length of the encoded string.
        len: usize,
        /// Largest length the prefix can hold.
        max: usize,
    },

    /// A NUL-terminated string contains a NUL.
    #[error("string contains an embedded NUL: {0:?}")]
    EmbeddedNul(String),

    /// A char table entry cannot be stored as a single UTF-16 unit.
    #[error("character {0:?} is outside the Basic Multilingual Plane")]
    CharOutOfRange(char),

    /// A char table unit is not a valid scalar value (unpaired surrogate).
    #[error("invalid character code {0:#06X}")]
    InvalidChar(u16),

    // ==================== Load Errors ====================
    /// Building the runtime tables failed.
    #[error("failed to load database {database} entry {entry}: {message}")]
    Load {
        /// Index of the database being processed.
        database: usize,
        /// Index of the entry being processed.
        entry: usize,
        /// What went wrong.
        message: String,
    },

    /// A table outside the databases could not be read.
    #[error("failed to load {table} table: {message}")]
    LoadTable {
        /// Which table was being read.
        table: &'static str,
        /// What went wrong.
        message: String,
    },

    /// The reload pipeline kept producing non-current databases.
    #[error("database reload did not converge after {attempts} attempts")]
    ReloadDidNotConverge {
        /// Number of pipeline passes performed.
        attempts: usize,
    },

    // ==================== Configuration Errors ====================
    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),

    /// The configuration file could not be found.
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // ==================== File System Errors ====================
    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDir(String),

    /// Atomic replacement of the database file failed.
    #[error("failed to replace {path}: {message}")]
    Persist {
        /// Target path.
        path: PathBuf,
        /// The error message.
        message: String,
    },

    // ==================== Host Errors ====================
    /// The host string boundary failed.
    #[error("host string error: {0}")]
    Host(String),
}

impl Error {
    /// Whether this error means the database file itself is unusable.
    ///
    /// The host treats these as fatal: report, pause, exit.
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::CorruptedData { .. }
                | Error::UnsupportedVersion { .. }
                | Error::UnexpectedEof
                | Error::InvalidChar(_)
                | Error::Load { .. }
                | Error::LoadTable { .. }
        )
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err.to_string())
    }
}

/// A specialized Result type for `StringReload` operations.
pub type Result<T> = std::result::Result<T, Error>;
