//! Ordered, capacity-bounded collections of distinct entries.
//!
//! Entries are trimmed before they are stored, so duplicate detection always
//! compares trimmed text against trimmed text.

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Identifies which of the two recipe lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Ingredients,
    Instructions,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Ingredients => "ingredients",
            ListKind::Instructions => "instructions",
        }
    }

    /// Singular, capitalised name used in status messages.
    pub fn title(&self) -> &'static str {
        match self {
            ListKind::Ingredients => "Ingredient",
            ListKind::Instructions => "Instruction",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            ListKind::Ingredients => "ingredients",
            ListKind::Instructions => "instruction steps",
        }
    }

    pub fn with_article(&self) -> &'static str {
        match self {
            ListKind::Ingredients => "an ingredient",
            ListKind::Instructions => "an instruction",
        }
    }

    /// Prefix of the numbered template fields this list is exported to.
    pub fn field_prefix(&self) -> &'static str {
        match self {
            ListKind::Ingredients => "Ingredient",
            ListKind::Instructions => "Direction",
        }
    }
}

/// Length in characters, which is what the form counters display.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedList {
    kind: ListKind,
    capacity: usize,
    item_cap: usize,
    items: Vec<String>,
}

impl BoundedList {
    pub fn new(kind: ListKind, capacity: usize, item_cap: usize) -> Self {
        Self {
            kind,
            capacity,
            item_cap,
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maximum length of a single entry, in characters.
    pub fn item_cap(&self) -> usize {
        self.item_cap
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Free slots left before the list is full.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn contains(&self, text: &str) -> bool {
        let needle = text.trim();
        self.items.iter().any(|item| item == needle)
    }

    /// Append an entry and return the new length.
    ///
    /// The capacity check runs before anything else, so a full list reports
    /// `CapacityExceeded` even for blank or duplicate input.
    pub fn push(&mut self, text: &str) -> Result<usize, FormError> {
        if self.is_full() {
            return Err(FormError::CapacityExceeded {
                list: self.kind,
                capacity: self.capacity,
            });
        }

        let item = text.trim();
        if item.is_empty() || self.contains(item) {
            return Err(FormError::DuplicateOrEmpty { list: self.kind });
        }

        if char_len(item) > self.item_cap {
            return Err(FormError::ItemTooLong {
                list: self.kind,
                cap: self.item_cap,
            });
        }

        self.items.push(item.to_string());
        Ok(self.items.len())
    }

    /// Remove an entry by value, keeping the order of the rest.
    pub fn remove(&mut self, item: &str) -> Result<usize, FormError> {
        let target = item.trim();
        let index = self
            .items
            .iter()
            .position(|existing| existing == target)
            .ok_or(FormError::NotFound { list: self.kind })?;

        self.items.remove(index);
        Ok(self.items.len())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
