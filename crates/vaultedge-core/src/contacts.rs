//! Append-only contact submission log.
//!
//! Submissions are appended to a CSV file with the header
//! `timestamp,name,email,subject,message`. Every data field is
//! double-quoted with embedded quotes doubled.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const HEADER: &str = "timestamp,name,email,subject,message\n";

/// One contact-form submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// A submission stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp_now(),
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Current UTC time as `2026-02-11T09:30:00.123Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Handle to the contacts CSV file. Clones share the append lock.
#[derive(Clone, Debug)]
pub struct ContactLog {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl ContactLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with just the header if it does not exist yet.
    ///
    /// Returns `true` if the file was created.
    pub fn ensure_exists(&self) -> Result<bool> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        if self.path.exists() {
            return Ok(false);
        }
        self.create_parent()?;
        std::fs::write(&self.path, HEADER).map_err(|e| Error::io_with_path(e, &self.path))?;
        Ok(true)
    }

    /// Append one submission, writing the header first if the file is new.
    pub fn append(&self, msg: &ContactMessage) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        self.create_parent()?;

        let needs_header = std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io_with_path(e, &self.path))?;

        if needs_header {
            file.write_all(HEADER.as_bytes())
                .map_err(|e| Error::io_with_path(e, &self.path))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(file);
        writer.serialize(msg)?;
        writer
            .flush()
            .map_err(|e| Error::io_with_path(e, &self.path))?;
        Ok(())
    }

    /// Every stored submission, oldest first. A missing file means none.
    pub fn read_all(&self) -> Result<Vec<ContactMessage>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut messages = Vec::new();
        for row in reader.deserialize() {
            messages.push(row?);
        }
        Ok(messages)
    }

    fn create_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn log_in(dir: &tempfile::TempDir) -> ContactLog {
        ContactLog::new(dir.path().join("data").join("contacts.csv"))
    }

    fn message(name: &str, text: &str) -> ContactMessage {
        ContactMessage {
            timestamp: "2026-02-11T09:30:00.000Z".to_string(),
            name: name.to_string(),
            email: "a@example.com".to_string(),
            subject: "Hello".to_string(),
            message: text.to_string(),
        }
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        // 2026-02-11T09:30:00.123Z
        assert_eq!(ts.len(), 24);
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);

        log.append(&message("Ann", "first")).unwrap();
        log.append(&message("Ben", "second")).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("timestamp,name").count(), 1);
        assert!(content.starts_with(HEADER));
        assert_eq!(log.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_every_field_quoted() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);
        log.append(&message("Ann", "plain")).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(
            row,
            r#""2026-02-11T09:30:00.000Z","Ann","a@example.com","Hello","plain""#
        );
    }

    #[test]
    fn test_quotes_commas_and_newlines_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);
        let tricky = message("O'Neil, \"Jr\"", "line one\nline two, with \"quotes\"");
        log.append(&tricky).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.contains(r#""O'Neil, ""Jr""""#));
        assert_eq!(log.read_all().unwrap(), vec![tricky]);
    }

    #[test]
    fn test_ensure_exists_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);

        assert!(log.ensure_exists().unwrap());
        assert!(!log.ensure_exists().unwrap());
        assert_eq!(std::fs::read_to_string(log.path()).unwrap(), HEADER);

        log.append(&message("Ann", "after header")).unwrap();
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("timestamp,name").count(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(log_in(&dir).read_all().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let dir = tempfile::TempDir::new().unwrap();
        let log = log_in(&dir);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for j in 0..10 {
                        log.append(&message(&format!("t{i}"), &format!("m{j}")))
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(log.read_all().unwrap().len(), 80);
    }
}
