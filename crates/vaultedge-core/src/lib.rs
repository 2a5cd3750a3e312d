//! VaultEdge Core: shared types, configuration and flat-file stores.
//!
//! This crate has no internal VaultEdge dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`config`]: TOML configuration and the [`ConfigManager`] trait
//! - [`users`]: CSV credential store with bcrypt hashes
//! - [`contacts`]: Append-only CSV log of contact submissions
//! - [`template`]: `{{KEY}}` substitution for HTML views
//! - [`dashboard`]: Demo portfolio data and its HTML/JSON renderings
//! - [`charts`]: Line and donut chart geometry

pub mod charts;
pub mod config;
pub mod contacts;
pub mod dashboard;
pub mod error;
pub mod template;
pub mod users;

// Re-export key types at crate root for convenience
pub use config::{ConfigManager, VaultConfig};
pub use contacts::{ContactLog, ContactMessage};
pub use dashboard::{Dashboard, DashboardPayload};
pub use error::{Error, Result};
pub use template::{Context, Template};
pub use users::{UserRecord, UserStore};
