//! Error types for vaultedge-server

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias for vaultedge-server operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vaultedge-server
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from vaultedge-core
    #[error("Core error: {0}")]
    Core(#[from] vaultedge_core::Error),

    /// Socket bind or serve failure
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
