//! `.env` file parsing.
//!
//! The format is line oriented: `KEY=VALUE` assignments, `#` comments and
//! blank lines. Anything else is skipped rather than rejected.

use std::{collections::HashMap, path::Path};

use tracing::debug;

use crate::{configs::loaders::file, error::SyncError};

/// Ordered `KEY=VALUE` pairs. Iteration follows the first appearance of each
/// key; a repeated key keeps its original slot but takes the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMapping {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl EnvMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = EnvMapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

/// Reads and parses the file at `path`.
pub fn load(path: &Path) -> Result<EnvMapping, SyncError> {
    let content = file::load(path)?;
    let mapping = parse(&content);
    debug!(
        path = %path.display(),
        entries = mapping.len(),
        "Parsed environment file"
    );
    Ok(mapping)
}

pub fn parse(content: &str) -> EnvMapping {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = strip_export(key.trim());
    if key.is_empty() {
        return None;
    }

    Some((key, parse_value(value.trim())))
}

/// `export KEY=VALUE` assigns `KEY`. A key named `export` is left alone.
fn strip_export(key: &str) -> &str {
    key.strip_prefix("export")
        .filter(|rest| rest.starts_with(char::is_whitespace))
        .map(str::trim_start)
        .unwrap_or(key)
}

/// A quoted value ends at its closing quote; an unquoted one at a `#`
/// preceded by whitespace.
fn parse_value(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.find(quote).map(|end| &rest[..end]))
        {
            return inner;
        }
    }

    let end = value
        .char_indices()
        .find(|&(i, c)| c == '#' && value[..i].ends_with(char::is_whitespace))
        .map_or(value.len(), |(i, _)| i);
    value[..end].trim_end()
}
