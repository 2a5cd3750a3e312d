//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// VaultEdge - personal finance dashboard server
#[derive(Parser, Debug)]
#[command(name = "vaultedge", version)]
#[command(about = "Run and administer the VaultEdge dashboard", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VAULTEDGE_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write the demo users and an empty contacts file
    Seed {
        /// Overwrite an existing users file
        #[arg(short, long)]
        force: bool,
    },

    /// Manage login accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show stored contact form submissions
    Contacts {
        /// Only show the most recent N submissions
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Inspect or edit the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// Add a user, or replace an existing one with the same username
    Add {
        /// Login name
        username: String,

        /// Plain-text password; stored as a bcrypt hash
        #[arg(long)]
        password: String,

        /// Name shown on the dashboard
        #[arg(long)]
        display_name: String,

        /// Membership tier, e.g. "Premium"
        #[arg(long, default_value = "Standard")]
        role: String,
    },

    /// List users (hashes are not shown)
    List,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print a value by dotted key, e.g. `server.port`
    Get { key: String },

    /// Set a value by dotted key in the config file
    Set { key: String, value: String },

    /// Write a default config file
    Init {
        /// Destination (defaults to the platform config dir)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for `docker run`
        #[arg(long)]
        docker_env: bool,
    },
}
