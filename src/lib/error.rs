//! Failures of the inventory store

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type used by the store and the loader
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A category with this name is already registered
    #[error("category '{0}' already exists")]
    DuplicateCategory(String),

    /// Reading or writing a data file failed
    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV layer rejected a file
    #[error("invalid CSV in '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The first line of a data file is not the expected header
    #[error("unexpected header in '{}': expected '{expected}', found '{found}'", path.display())]
    Header {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// A row was read but one of its fields makes no sense
    #[error("'{}' line {line}: invalid {field} '{value}': {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl Error {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        // the csv crate wraps io errors, surface them as such
        if let csv::ErrorKind::Io(e) = source.kind() {
            return Self::io(path, io::Error::new(e.kind(), e.to_string()));
        }
        Self::Csv { path: path.to_path_buf(), source }
    }

    pub fn malformed(
        path: &Path,
        line: u64,
        field: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            line,
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
