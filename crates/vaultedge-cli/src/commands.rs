//! Handlers for `serve`, `user` and `contacts`.

use std::io::Write;

use vaultedge_core::{ContactLog, UserRecord, UserStore, VaultConfig};
use vaultedge_server::Server;

use crate::{Error, Result};

/// Apply command-line overrides and run the server until shutdown.
pub async fn serve(mut config: VaultConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let server = Server::new(config)?;
    server.run().await?;
    Ok(())
}

/// Add or replace a login account.
pub fn user_add<W: Write>(
    out: &mut W,
    store: &UserStore,
    username: &str,
    password: &str,
    display_name: &str,
    role: &str,
    cost: u32,
) -> Result<()> {
    if password.is_empty() {
        return Err(Error::usage("Password must not be empty"));
    }

    let record = UserRecord::new(username, password, display_name, role, cost)?;
    let verb = if store.upsert(record)? {
        "Updated"
    } else {
        "Added"
    };
    tracing::info!("{verb} user '{username}' in {}", store.path().display());
    writeln!(out, "{verb} user {username} ({display_name}, {role})")?;
    Ok(())
}

/// Print every account as an aligned table.
pub fn user_list<W: Write>(out: &mut W, store: &UserStore) -> Result<()> {
    let users = store.load_all()?;
    if users.is_empty() {
        writeln!(
            out,
            "No users in {}. Run `vaultedge seed` to create the demo accounts.",
            store.path().display()
        )?;
        return Ok(());
    }

    let name_width = column_width(users.iter().map(|u| u.username.as_str()), "USERNAME");
    let display_width = column_width(users.iter().map(|u| u.display_name.as_str()), "NAME");

    writeln!(out, "{:<name_width$}  {:<display_width$}  ROLE", "USERNAME", "NAME")?;
    for user in &users {
        writeln!(
            out,
            "{:<name_width$}  {:<display_width$}  {}",
            user.username, user.display_name, user.role
        )?;
    }
    Ok(())
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

/// Print stored contact submissions, newest last. `limit` keeps the tail.
pub fn contacts<W: Write>(out: &mut W, log: &ContactLog, limit: Option<usize>) -> Result<()> {
    let messages = log.read_all()?;
    if messages.is_empty() {
        writeln!(out, "No contact submissions yet.")?;
        return Ok(());
    }

    let skip = limit.map_or(0, |n| messages.len().saturating_sub(n));
    for msg in &messages[skip..] {
        writeln!(out, "[{}] {} <{}>", msg.timestamp, msg.name, msg.email)?;
        if !msg.subject.is_empty() {
            writeln!(out, "  Subject: {}", msg.subject)?;
        }
        for line in msg.message.lines() {
            writeln!(out, "  {line}")?;
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "{} of {} submissions shown",
        messages.len() - skip,
        messages.len()
    )?;
    Ok(())
}
