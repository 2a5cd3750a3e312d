//! `vaultedge seed`: demo accounts and an empty contacts log.

use std::io::Write;

use vaultedge_core::config::DataConfig;
use vaultedge_core::{ContactLog, Result as CoreResult, UserRecord, UserStore};

use crate::{Error, Result};

/// A demo account before hashing.
#[derive(Debug, Clone, Copy)]
pub struct DemoUser {
    pub username: &'static str,
    pub password: &'static str,
    pub display_name: &'static str,
    pub role: &'static str,
}

/// Accounts written by `seed`.
pub const DEMO_USERS: [DemoUser; 3] = [
    DemoUser {
        username: "test",
        password: "test",
        display_name: "Test User",
        role: "Premium",
    },
    DemoUser {
        username: "krishna",
        password: "welcome1",
        display_name: "Krishna Gupta",
        role: "Premium",
    },
    DemoUser {
        username: "jane",
        password: "finance2",
        display_name: "Jane Mitchell",
        role: "Standard",
    },
];

/// Write the demo users (hashed at `cost`) and create the contacts file.
///
/// An existing users file is only replaced when `force` is set. The
/// contacts file is never truncated.
pub fn seed<W: Write>(out: &mut W, data: &DataConfig, force: bool, cost: u32) -> Result<()> {
    let store = UserStore::new(&data.users_file);
    if store.path().exists() && !force {
        return Err(Error::AlreadyExists {
            path: store.path().to_path_buf(),
        });
    }

    let users = DEMO_USERS
        .iter()
        .map(|u| UserRecord::new(u.username, u.password, u.display_name, u.role, cost))
        .collect::<CoreResult<Vec<_>>>()?;
    store.write_all(&users)?;
    tracing::info!("Seeded {} users into {}", users.len(), store.path().display());

    writeln!(
        out,
        "Created {} with {} users:",
        store.path().display(),
        users.len()
    )?;
    for u in &DEMO_USERS {
        writeln!(out, "    {} / {}", u.username, u.password)?;
    }

    let contacts = ContactLog::new(&data.contacts_file);
    if contacts.ensure_exists()? {
        writeln!(out, "Created {}", contacts.path().display())?;
    }
    Ok(())
}
