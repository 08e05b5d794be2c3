//! Error types for scanning, configuration and output

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while walking a directory tree.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot access '{}': No such file or directory", .path.display())]
    NotFound { path: PathBuf },

    #[error("cannot open directory '{}': Permission denied", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("'{}' is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Map an I/O failure on `path` to the matching scan error.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound { path },
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied { path },
            _ => ScanError::Io { path, source: err },
        }
    }

    /// Whether the skip-unreadable mode may drop the offending directory.
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            ScanError::PermissionDenied { .. } | ScanError::Io { .. }
        )
    }
}

/// Errors raised while loading a `dirgraph.toml` file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level error for a dirgraph run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("error writing output: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
