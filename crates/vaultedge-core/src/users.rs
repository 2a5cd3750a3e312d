//! Flat-file credential store.
//!
//! Users live in a CSV file with the header
//! `username,password_hash,display_name,role`. Password hashes are bcrypt.
//! The file is re-read on every lookup, so edits take effect without a
//! restart.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// bcrypt cost used when seeding and adding users.
pub const DEFAULT_COST: u32 = 10;

/// One row of the credential file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
}

impl UserRecord {
    /// Build a record, hashing `password` with the given bcrypt cost.
    pub fn new(
        username: impl Into<String>,
        password: &str,
        display_name: impl Into<String>,
        role: impl Into<String>,
        cost: u32,
    ) -> Result<Self> {
        let record = Self {
            username: username.into(),
            password_hash: hash_password(password, cost)?,
            display_name: display_name.into(),
            role: role.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Uppercased first letter of every word in the display name.
    ///
    /// `"Krishna Gupta"` becomes `"KG"`.
    pub fn initials(&self) -> String {
        initials(&self.display_name)
    }

    pub fn first_name(&self) -> &str {
        first_name(&self.display_name)
    }

    pub fn role_label(&self) -> String {
        role_label(&self.role)
    }

    fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(Error::validation_field("username", "must not be empty"));
        }
        if self.username.chars().any(char::is_whitespace) {
            return Err(Error::validation_field(
                "username",
                "must not contain whitespace",
            ));
        }
        if self.display_name.trim().is_empty() {
            return Err(Error::validation_field("display_name", "must not be empty"));
        }
        Ok(())
    }
}

/// Uppercased first letter of every whitespace-separated word.
pub fn initials(display_name: &str) -> String {
    display_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// First word of a display name, or `""`.
pub fn first_name(display_name: &str) -> &str {
    display_name.split_whitespace().next().unwrap_or("")
}

/// Role as shown in the sidebar, e.g. `"Premium Member"`.
pub fn role_label(role: &str) -> String {
    format!("{role} Member")
}

/// Hash a password with bcrypt.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Read/write access to the credential CSV file.
#[derive(Clone, Debug)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All users in file order. A missing file means no users.
    ///
    /// Malformed rows are logged and skipped so one bad line does not lock
    /// every user out.
    pub fn load_all(&self) -> Result<Vec<UserRecord>> {
        if !self.path.exists() {
            tracing::warn!("User file {} does not exist", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)?;

        let mut users = Vec::new();
        for row in reader.deserialize::<UserRecord>() {
            match row {
                Ok(user) => users.push(user),
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => tracing::warn!(
                    "Skipping malformed row in {}: {e}",
                    self.path.display()
                ),
            }
        }
        Ok(users)
    }

    /// Look up a user by exact username.
    pub fn find(&self, username: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|u| u.username == username))
    }

    /// Check credentials. Unknown users and wrong passwords both yield `None`.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<UserRecord>> {
        let Some(user) = self.find(username)? else {
            tracing::debug!(username, "Login attempt for unknown user");
            return Ok(None);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(Some(user)),
            Ok(false) => {
                tracing::debug!(username, "Password mismatch");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(username, "Stored password hash is unusable: {e}");
                Ok(None)
            }
        }
    }

    /// Replace the whole file with `users`.
    pub fn write_all(&self, users: &[UserRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        if users.is_empty() {
            writer.write_record(["username", "password_hash", "display_name", "role"])?;
        }
        for user in users {
            writer.serialize(user)?;
        }
        writer
            .flush()
            .map_err(|e| Error::io_with_path(e, &self.path))?;
        Ok(())
    }

    /// Insert a user, replacing any existing one with the same username.
    ///
    /// Returns `true` when an existing user was replaced.
    pub fn upsert(&self, user: UserRecord) -> Result<bool> {
        user.validate()?;
        let mut users = self.load_all()?;
        let replaced = match users.iter_mut().find(|u| u.username == user.username) {
            Some(existing) => {
                *existing = user;
                true
            }
            None => {
                users.push(user);
                false
            }
        };
        self.write_all(&users)?;
        Ok(replaced)
    }
}

// ============================================================================
// Tests
// ============================================================================
