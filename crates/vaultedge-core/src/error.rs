//! Error types for vaultedge-core

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for vaultedge-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vaultedge-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O failure on a specific file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File that was being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV read/write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration could not be resolved, parsed or written
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// Template could not be rendered
    #[error("Template error: {message}")]
    Template {
        /// What went wrong
        message: String,
    },

    /// Password hashing or verification failed
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Input failed validation
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// A requested record does not exist
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing record
        what: String,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a new template error.
    pub fn template<S: Into<String>>(message: S) -> Self {
        Error::Template {
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new not-found error.
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Error::NotFound { what: what.into() }
    }
}
