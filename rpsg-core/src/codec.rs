//! The `<TAG>value` line protocol.
//!
//! A configuration is a sequence of lines, each a bracketed uppercase tag
//! followed by its raw value. Parsing produces a [`RawConfig`]: a mapping from
//! tag to the untyped value string. Fields decode their own tags from it.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag to raw value mapping parsed from line-protocol text.
///
/// Tags are stored uppercase. Tags that no field claims are kept but ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConfig {
    entries: BTreeMap<String, String>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses line-protocol text.
    ///
    /// Blank lines are skipped. Lines that are not of the form `<TAG>value`
    /// are skipped with a warning. A repeated tag keeps its last value.
    ///
    /// ```
    /// use rpsg_core::codec::RawConfig;
    ///
    /// let raw = RawConfig::parse("<OBJECT>Planet\n<OBJECT-DIAMETER>12742");
    /// assert_eq!(raw.get("OBJECT"), Some("Planet"));
    /// assert_eq!(raw.get("object-diameter"), Some("12742"));
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut raw = Self::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match split_line(line) {
                Some((tag, value)) => {
                    if let Some(previous) = raw.insert(tag, value) {
                        warn!("Duplicate tag <{tag}> on line {}: replacing {previous:?}", lineno + 1);
                    }
                }
                None => warn!("Skipping malformed line {}: {line:?}", lineno + 1),
            }
        }
        raw
    }

    /// Inserts a raw value, returning the value it replaced.
    pub fn insert(&mut self, tag: &str, value: impl Into<String>) -> Option<String> {
        self.entries.insert(tag.to_ascii_uppercase(), value.into())
    }

    /// Looks up a tag, case-insensitively.
    pub fn get(&self, tag: &str) -> Option<&str> {
        match self.entries.get(tag) {
            Some(v) => Some(v.as_str()),
            None => self
                .entries
                .get(&tag.to_ascii_uppercase())
                .map(String::as_str),
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// True if any tag starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.to_ascii_uppercase();
        self.entries.keys().any(|k| k.starts_with(&prefix))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the mapping back into line-protocol text, sorted by tag.
    pub fn to_text(&self) -> String {
        join(self.iter().map(|(tag, value)| render_line(tag, value)))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = Self::new();
        for (k, v) in iter {
            raw.insert(k.as_ref(), v);
        }
        raw
    }
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('<')?;
    let (tag, value) = rest.split_once('>')?;
    let tag = tag.trim();
    if tag.is_empty() {
        return None;
    }
    Some((tag, value.trim()))
}

/// Formats a single `<TAG>value` line.
pub fn render_line(tag: &str, value: &str) -> String {
    format!("<{tag}>{value}")
}

/// Joins rendered lines with newlines.
pub fn join<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|l| l.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
