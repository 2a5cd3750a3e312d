//! # vaultedge-cli
//!
//! Command-line entry point for VaultEdge:
//! - `serve` runs the web server
//! - `seed`, `user` and `contacts` manage the flat-file data
//! - `config` inspects and edits the TOML configuration

pub mod cli;
pub mod commands;
pub mod config_handlers;
pub mod error;
pub mod seed;

use std::io;

use tracing_subscriber::EnvFilter;
use vaultedge_core::users::DEFAULT_COST;
use vaultedge_core::{ConfigManager, ContactLog, UserStore, VaultConfig};

pub use cli::{Cli, Command, ConfigAction, UserAction};
pub use error::{Error, Result};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins; otherwise `-v` selects `debug`, else `fallback`.
pub fn init_logging(verbose: bool, fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(fallback)
        }
    });
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Execute a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        verbose,
        command,
    } = cli;
    let mut stdout = io::stdout();

    if let Command::Config { action } = command {
        init_logging(verbose, "warn");
        return config_handlers::handle_config_command(&mut stdout, config_path.as_deref(), action);
    }

    let config = VaultConfig::load(config_path.as_deref())?;
    init_logging(verbose, &config.logging.filter);

    match command {
        Command::Serve { host, port } => commands::serve(config, host, port).await,
        Command::Seed { force } => seed::seed(&mut stdout, &config.data, force, DEFAULT_COST),
        Command::User { action } => {
            let store = UserStore::new(&config.data.users_file);
            match action {
                UserAction::Add {
                    username,
                    password,
                    display_name,
                    role,
                } => commands::user_add(
                    &mut stdout,
                    &store,
                    &username,
                    &password,
                    &display_name,
                    &role,
                    DEFAULT_COST,
                ),
                UserAction::List => commands::user_list(&mut stdout, &store),
            }
        }
        Command::Contacts { limit } => {
            let log = ContactLog::new(&config.data.contacts_file);
            commands::contacts(&mut stdout, &log, limit)
        }
        // Dispatched before the config was loaded.
        Command::Config { .. } => Ok(()),
    }
}
