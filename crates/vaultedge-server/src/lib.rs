//! # vaultedge-server
//!
//! HTTP front end for the VaultEdge dashboard:
//! - Landing, login and dashboard pages rendered from HTML views
//! - Cookie sessions guarding `/dashboard` and `/api/dashboard`
//! - Contact form submissions appended to CSV
//! - Static assets, request tracing and graceful shutdown

pub mod error;
pub mod extract;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{Error, Result};
pub use server::{Server, build_router};
pub use state::AppState;
