//! Router assembly and the serve loop.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use vaultedge_auth::AuthLayer;
use vaultedge_core::VaultConfig;

use crate::Result;
use crate::routes;
use crate::state::AppState;

/// How often expired sessions are swept out of memory.
pub const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Build the full application router over `state`.
pub fn build_router(state: AppState) -> Router {
    let guard = AuthLayer::new(Arc::new(state.sessions.clone()), state.auth.clone());

    let protected = Router::new()
        .route("/dashboard", get(routes::dashboard))
        .route("/api/dashboard", get(routes::dashboard_data))
        .route_layer(guard);

    Router::new()
        .route("/", get(routes::landing))
        .route("/login", get(routes::login_page).post(routes::login_submit))
        .route("/contact", post(routes::contact))
        .route("/logout", get(routes::logout))
        .route("/health", get(routes::health))
        .merge(protected)
        .nest_service("/static", ServeDir::new(&state.config.web.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// VaultEdge HTTP server
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a server from validated configuration.
    pub fn new(config: VaultConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: AppState::new(config),
        })
    }

    /// Shared state, e.g. for seeding sessions in tests.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The router this server would serve.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.server.bind_address();
        let listener = TcpListener::bind(&addr).await?;
        self.run_on(listener).await
    }

    /// Serve on an already bound listener until shutdown.
    pub async fn run_on(self, listener: TcpListener) -> Result<()> {
        self.log_startup(&listener);

        let purger = tokio::spawn(purge_sessions(self.state.clone()));
        let app = self.router();

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        purger.abort();
        tracing::info!("Server stopped");
        Ok(served?)
    }

    fn log_startup(&self, listener: &TcpListener) {
        let config = &self.state.config;
        match listener.local_addr() {
            Ok(addr) => tracing::info!("{} listening on http://{addr}", config.site_name),
            Err(e) => tracing::warn!("Listening on unknown address: {e}"),
        }

        let users = config.data.users_file.as_path();
        if !users.exists() {
            tracing::warn!(
                "Users file {} not found; nobody can log in until it is seeded",
                users.display()
            );
        }
        match self.state.contacts.ensure_exists() {
            Ok(true) => tracing::info!("Created {}", self.state.contacts.path().display()),
            Ok(false) => {}
            Err(e) => tracing::warn!("Contacts file unavailable: {e}"),
        }
    }
}

async fn purge_sessions(state: AppState) {
    let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
    loop {
        ticker.tick().await;
        let purged = state.sessions.purge_expired();
        if purged > 0 {
            tracing::debug!("Purged {purged} expired sessions");
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
