//! Error types for vaultedge-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for vaultedge-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vaultedge-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from vaultedge-core
    #[error(transparent)]
    Core(#[from] vaultedge_core::Error),

    /// Error from vaultedge-server
    #[error(transparent)]
    Server(#[from] vaultedge_server::Error),

    /// Writing command output failed
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Refused to overwrite an existing file
    #[error("{} already exists. Use --force to overwrite.", path.display())]
    AlreadyExists { path: PathBuf },

    /// Invalid command arguments or config edits
    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub fn usage(message: impl Into<String>) -> Self {
        Error::Usage(message.into())
    }
}
