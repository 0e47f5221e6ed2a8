//! Theme names and the document templates they select.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a pre-built document template, e.g. `Summer_Template`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name the template is stored under.
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.0)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Themes offered by the stock templates, in display order.
const STANDARD_THEMES: &[(&str, &str)] = &[
    ("Spring", "Spring_Template"),
    ("Summer", "Summer_Template"),
    ("Fall", "Fall_Template"),
    ("Winter", "Winter_Template"),
];

/// Ordered theme → template lookup, matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTable {
    entries: Vec<(String, TemplateId)>,
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ThemeTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Spring, Summer, Fall and Winter.
    pub fn standard() -> Self {
        STANDARD_THEMES
            .iter()
            .fold(Self::empty(), |table, (name, id)| {
                table.with_theme(*name, TemplateId::new(*id))
            })
    }

    /// Add a theme, or repoint an existing one (matched case-insensitively).
    pub fn with_theme(mut self, name: impl Into<String>, template: TemplateId) -> Self {
        let name = name.into();
        match self.position(&name) {
            Some(index) => self.entries[index].1 = template,
            None => self.entries.push((name, template)),
        }
        self
    }

    fn position(&self, theme: &str) -> Option<usize> {
        let theme = theme.trim();
        self.entries
            .iter()
            .position(|(name, _)| name.eq_ignore_ascii_case(theme))
    }

    pub fn resolve(&self, theme: &str) -> Option<&TemplateId> {
        self.position(theme).map(|index| &self.entries[index].1)
    }

    pub fn contains(&self, theme: &str) -> bool {
        self.position(theme).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// "Spring, Summer, Fall, or Winter" style list for error messages.
    pub fn describe(&self) -> String {
        let names: Vec<&str> = self.names().collect();
        match names.as_slice() {
            [] => "no themes".to_string(),
            [only] => only.to_string(),
            [init @ .., last] => format!("{}, or {}", init.join(", "), last),
        }
    }
}
