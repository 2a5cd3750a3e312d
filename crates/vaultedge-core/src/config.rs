//! Configuration loading and the [`ConfigManager`] trait.
//!
//! Configuration is a TOML file with one table per concern. Every field has a
//! default, so a missing file (or a partial one) still yields a usable
//! [`VaultConfig`]. Environment variables are applied on top of the file.
//!
//! File resolution order:
//! 1. Explicit path (`--config`)
//! 2. `VAULTEDGE_CONFIG` environment variable
//! 3. `<platform config dir>/vaultedge/config.toml`

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ============================================================================
// ConfigManager
// ============================================================================

/// Shared behavior for loadable, exportable configuration types.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Project name, used for the config directory and env var prefix.
    fn project_name() -> &'static str;

    /// Environment variable prefix derived from the project name.
    ///
    /// `"vault-edge"` becomes `"VAULT_EDGE"`.
    fn env_prefix() -> String {
        Self::project_name().to_uppercase().replace(['-', ' '], "_")
    }

    /// Default config file location for this platform.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve which config file to use.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(format!("{}_CONFIG", Self::env_prefix())) {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Load configuration from the resolved path, falling back to defaults
    /// when no file exists, then apply environment overrides.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse a config file.
    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Apply environment variable overrides. Default: none.
    fn apply_env_overrides(&mut self) -> Result<()> {
        Ok(())
    }

    /// Serialize to pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten into `PREFIX_SECTION_KEY=value` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_env(&Self::env_prefix(), &value, &mut vars);
        Ok(vars)
    }
}

fn flatten_env(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let name = format!("{prefix}_{}", key.to_uppercase().replace('-', "_"));
                flatten_env(&name, child, out);
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Array(items) => {
            let joined = items
                .iter()
                .map(|v| match v {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(",");
            out.push((prefix.to_string(), joined));
        }
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

// ============================================================================
// VaultConfig
// ============================================================================

/// Longest accepted session lifetime: 400 days, the cap browsers put on
/// cookie expiry.
pub const MAX_SESSION_TTL_SECS: u64 = 400 * 24 * 60 * 60;

/// Top-level VaultEdge configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Name shown in logs and the health endpoint.
    pub site_name: String,
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Flat-file locations.
    pub data: DataConfig,
    /// Template and static asset directories.
    pub web: WebConfig,
    /// Session cookie settings.
    pub session: SessionConfig,
    /// Log filter.
    pub logging: LoggingConfig,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            site_name: "VaultEdge".to_string(),
            server: ServerConfig::default(),
            data: DataConfig::default(),
            web: WebConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// HTTP listener settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Locations of the credential and contact CSV files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub users_file: PathBuf,
    pub contacts_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::in_dir("data")
    }
}

impl DataConfig {
    /// Both files inside `dir`, with their standard names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            users_file: dir.join("users.csv"),
            contacts_file: dir.join("contacts.csv"),
        }
    }
}

/// Template and static asset directories.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub views_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            views_dir: PathBuf::from("web/views"),
            static_dir: PathBuf::from("web/static"),
        }
    }
}

impl WebConfig {
    pub fn landing_template(&self) -> PathBuf {
        self.views_dir.join("landing.html")
    }

    pub fn login_template(&self) -> PathBuf {
        self.views_dir.join("login.html")
    }

    pub fn dashboard_template(&self) -> PathBuf {
        self.views_dir.join("index.html")
    }
}

/// Session cookie settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id.
    pub cookie_name: String,
    /// Session lifetime in seconds.
    pub ttl_secs: u64,
    /// Mark the cookie `Secure` (HTTPS only).
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "vaultedge.sid".to_string(),
            ttl_secs: 2 * 60 * 60,
            secure: false,
        }
    }
}

/// Log filter used when `RUST_LOG` is unset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,vaultedge=debug".to_string(),
        }
    }
}

impl ConfigManager for VaultConfig {
    fn project_name() -> &'static str {
        "vaultedge"
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }
}

impl VaultConfig {
    /// Apply overrides from an arbitrary lookup (the process environment in
    /// production).
    ///
    /// Recognized keys: `PORT`, `VAULTEDGE_PORT`, `VAULTEDGE_HOST`,
    /// `VAULTEDGE_DATA_DIR`, `VAULTEDGE_WEB_DIR`, `VAULTEDGE_LOG`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // VAULTEDGE_PORT wins over the bare PORT.
        for key in ["PORT", "VAULTEDGE_PORT"] {
            if let Some(raw) = lookup(key) {
                self.server.port = raw
                    .trim()
                    .parse()
                    .map_err(|e| Error::config(format!("Invalid {key} value '{raw}': {e}")))?;
            }
        }
        if let Some(host) = lookup("VAULTEDGE_HOST") {
            self.server.host = host;
        }
        if let Some(dir) = lookup("VAULTEDGE_DATA_DIR") {
            self.data = DataConfig::in_dir(dir);
        }
        if let Some(dir) = lookup("VAULTEDGE_WEB_DIR") {
            let dir = PathBuf::from(dir);
            self.web = WebConfig {
                views_dir: dir.join("views"),
                static_dir: dir.join("static"),
            };
        }
        if let Some(filter) = lookup("VAULTEDGE_LOG") {
            self.logging.filter = filter;
        }
        Ok(())
    }

    /// Check invariants the server relies on.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::validation_field("server.port", "must be non-zero"));
        }
        if self.session.ttl_secs == 0 {
            return Err(Error::validation_field(
                "session.ttl_secs",
                "must be non-zero",
            ));
        }
        if self.session.ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(Error::validation_field(
                "session.ttl_secs",
                format!("must be at most {MAX_SESSION_TTL_SECS} (400 days)"),
            ));
        }
        let name = &self.session.cookie_name;
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "._-".contains(c))
        {
            return Err(Error::validation_field(
                "session.cookie_name",
                format!("'{name}' is not a valid cookie name"),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
