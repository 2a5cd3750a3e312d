//! Handlers for the `config` subcommands.
//!
//! The `cmd_config_*` functions are generic over [`ConfigManager`] and write
//! to any `io::Write`, so they can be tested without touching stdout.

use std::io::Write;
use std::path::PathBuf;

use vaultedge_core::{ConfigManager, VaultConfig};

use crate::cli::ConfigAction;
use crate::{Error, Result};

/// Dispatch a `config` subcommand against [`VaultConfig`].
pub fn handle_config_command<W: Write>(
    out: &mut W,
    config_path: Option<&str>,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path::<VaultConfig, _>(out, config_path),
        ConfigAction::Get { key } => cmd_config_get::<VaultConfig, _>(out, config_path, &key),
        ConfigAction::Set { key, value } => {
            cmd_config_set::<VaultConfig, _>(out, config_path, &key, &value)
        }
        ConfigAction::Init { file, force } => {
            cmd_config_init::<VaultConfig, _>(out, file.as_deref(), force)
        }
        ConfigAction::Export { docker_env } => {
            let config = VaultConfig::load(config_path)?;
            cmd_config_export(out, &config, docker_env)
        }
    }
}

/// Print the resolved config file path.
pub fn cmd_config_path<C: ConfigManager, W: Write>(
    out: &mut W,
    config_path: Option<&str>,
) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::usage("Could not determine config directory for this platform"))?;

    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        writeln!(
            out,
            "(not created yet; run `{} config init`)",
            C::project_name()
        )?;
    }
    Ok(())
}

/// Print one value by dotted key.
pub fn cmd_config_get<C: ConfigManager, W: Write>(
    out: &mut W,
    config_path: Option<&str>,
    key: &str,
) -> Result<()> {
    let config = C::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::usage(e.to_string()))?;
    let found = get_nested_value(&value, key)
        .ok_or_else(|| Error::usage(format!("Key '{key}' not found in configuration")))?;
    writeln!(out, "{}", format_toml_value(found))?;
    Ok(())
}

/// Set one value by dotted key, rejecting edits that no longer parse as `C`.
pub fn cmd_config_set<C: ConfigManager, W: Write>(
    out: &mut W,
    config_path: Option<&str>,
    key: &str,
    value: &str,
) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::usage("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::usage(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            C::project_name()
        )));
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| vaultedge_core::Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::usage(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;
    doc.clone()
        .try_into::<C>()
        .map_err(|e| Error::usage(format!("Invalid value for {key}: {e}")))?;

    let rendered = toml::to_string_pretty(&doc).map_err(|e| Error::usage(e.to_string()))?;
    std::fs::write(&path, rendered).map_err(|e| vaultedge_core::Error::io_with_path(e, &path))?;

    writeln!(out, "Set {key} = {value} in {}", path.display())?;
    Ok(())
}

/// Write a config file holding the defaults.
pub fn cmd_config_init<C: ConfigManager, W: Write>(
    out: &mut W,
    file: Option<&str>,
    force: bool,
) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
            .ok_or_else(|| Error::usage("Could not determine config directory"))?,
    };
    if path.exists() && !force {
        return Err(Error::AlreadyExists { path });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| vaultedge_core::Error::io_with_path(e, parent))?;
    }
    let rendered = C::default().to_toml_string()?;
    std::fs::write(&path, rendered).map_err(|e| vaultedge_core::Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

/// Print the configuration as `KEY=value` lines.
pub fn cmd_config_export<C: ConfigManager, W: Write>(
    out: &mut W,
    config: &C,
    docker_env: bool,
) -> Result<()> {
    for (key, value) in config.to_env_vars()? {
        if docker_env {
            writeln!(out, "--env {key}={value}")?;
        } else {
            writeln!(out, "{key}={value}")?;
        }
    }
    Ok(())
}

// ============================================================================
// Dotted-key helpers
// ============================================================================

/// Walk `a.b.c` through nested tables.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set `a.b.c`, creating intermediate tables.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::usage("Empty key path"));
    }

    let mut current = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::usage(format!("Cannot descend into non-table at '{part}'")))?;
        current = table
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| Error::usage(format!("Cannot set '{key}' on a non-table value")))?;
    table.insert(leaf.to_string(), value);
    Ok(())
}

/// Interpret a command-line string as bool, integer, float, then string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => s
            .parse::<i64>()
            .map(toml::Value::Integer)
            .or_else(|_| s.parse::<f64>().map(toml::Value::Float))
            .unwrap_or_else(|_| toml::Value::String(s.to_string())),
    }
}

/// Render a value for stdout; strings without quotes.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}
