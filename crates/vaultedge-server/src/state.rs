//! Shared application state handed to every handler.

use std::sync::Arc;
use std::time::Duration;

use vaultedge_auth::{AuthConfig, SessionStore};
use vaultedge_core::{ContactLog, Dashboard, UserStore, VaultConfig};

/// Cheap-to-clone handle on everything the handlers need.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<VaultConfig>,
    /// Credential file.
    pub users: UserStore,
    /// Contact submission log.
    pub contacts: ContactLog,
    /// Live login sessions.
    pub sessions: SessionStore,
    /// Cookie and redirect settings derived from `config.session`.
    pub auth: AuthConfig,
    /// Demo portfolio data.
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    /// Build state from configuration.
    pub fn new(config: VaultConfig) -> Self {
        let ttl = Duration::from_secs(config.session.ttl_secs);
        let auth = AuthConfig {
            cookie_name: config.session.cookie_name.clone(),
            login_path: "/login".to_string(),
            ttl,
            secure: config.session.secure,
        };

        Self {
            users: UserStore::new(&config.data.users_file),
            contacts: ContactLog::new(&config.data.contacts_file),
            sessions: SessionStore::new(ttl),
            auth,
            dashboard: Arc::new(Dashboard::demo()),
            config: Arc::new(config),
        }
    }
}
