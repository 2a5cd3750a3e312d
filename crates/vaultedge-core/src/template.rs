//! `{{KEY}}` placeholder substitution for HTML views.
//!
//! Every occurrence of a placeholder whose key has a value is replaced.
//! Placeholders without a value are left in place untouched. Values are
//! inserted verbatim; use [`Context::insert_escaped`] for anything that came
//! from user data.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::{Error, Result};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("placeholder pattern is valid")
});

/// Values for template placeholders.
#[derive(Clone, Debug, Default)]
pub struct Context {
    values: HashMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw (already safe) value.
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Set a value after HTML-escaping it.
    pub fn insert_escaped(self, key: impl Into<String>, value: &str) -> Self {
        self.insert(key, escape_html(value))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// A template loaded into memory.
#[derive(Clone, Debug)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Ok(Self::new(source))
    }

    /// Distinct placeholder keys, in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for caps in PLACEHOLDER.captures_iter(&self.source) {
            if let Some(key) = caps.get(1).map(|m| m.as_str()) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    pub fn render(&self, ctx: &Context) -> String {
        render(&self.source, ctx)
    }
}

/// Substitute placeholders in `source`.
pub fn render(source: &str, ctx: &Context) -> String {
    PLACEHOLDER
        .replace_all(source, |caps: &Captures<'_>| match ctx.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Read `path` and substitute placeholders.
pub fn render_file(path: impl AsRef<Path>, ctx: &Context) -> Result<String> {
    Ok(Template::from_file(path)?.render(ctx))
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
