//! Error types for the transformer harness
//!
//! Only conditions the harness cannot express as a test outcome become errors.
//! A runner that cannot be launched or that prints garbage still yields a
//! (failed) outcome, and a missing query fragment only shortens the script.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for harness operations
#[derive(Debug, Error)]
pub enum HarnessError {
    /// No test case in the catalog carries this name
    #[error("Test case '{name}' not found in test-case catalog")]
    UnknownTestCase { name: String },

    /// IO error (fixture writes, catalog and config reads)
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to parse a catalog source
    #[error("Catalog parse error in {file}: {message}")]
    CatalogParse { file: String, message: String },

    /// Failed to parse the harness configuration
    #[error("Config parse error in {file}: {message}")]
    ConfigParse { file: String, message: String },

    /// Catalog failed an explicit consistency check
    #[error("Invalid catalog: {}", problems.join("; "))]
    InvalidCatalog { problems: Vec<String> },
}

impl HarnessError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HarnessError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;
