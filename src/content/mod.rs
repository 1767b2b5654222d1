//! Documentation content store
//!
//! This module owns the ordered set of documentation sections shown in the
//! sidebar. Sections are fixed once the store is built:
//! - built-in sections compiled into the binary (`builtin`)
//! - or sections loaded once from a directory of markdown files (`loader`)
//!
//! The store is read-only; lookups, listing and search never mutate it.

mod builtin;
mod front_matter;
mod loader;

use crate::error::{Error, Result};
use log::{info, warn};
use std::collections::HashSet;
use std::path::Path;

use loader::load_sections;

// ─────────────────────────────────────────────────────────────────────────────
// Section
// ─────────────────────────────────────────────────────────────────────────────

/// One named unit of documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Unique key
    pub id: String,
    /// Sidebar title
    pub title: String,
    /// Markdown-subset body
    pub raw_text: String,
    /// Lowercased title and body, built once for search
    title_folded: String,
    text_folded: String,
}

impl Section {
    /// Create a new section.
    pub fn new(id: impl Into<String>, title: impl Into<String>, raw_text: impl Into<String>) -> Self {
        let title = title.into();
        let raw_text = raw_text.into();
        Self {
            id: id.into(),
            title_folded: title.to_lowercase(),
            text_folded: raw_text.to_lowercase(),
            title,
            raw_text,
        }
    }

    /// Case-insensitive substring match on title or body.
    ///
    /// An empty query matches every section.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title_folded.contains(&needle) || self.text_folded.contains(&needle)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Content Store
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered, read-only collection of sections.
#[derive(Debug, Clone)]
pub struct ContentStore {
    sections: Vec<Section>,
}

impl ContentStore {
    /// Build a store from sections in display order.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateSection` if two sections share an id.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        let mut seen = HashSet::new();
        for section in &sections {
            if !seen.insert(section.id.as_str()) {
                return Err(Error::DuplicateSection(section.id.clone()));
            }
        }
        Ok(Self { sections })
    }

    /// The sections compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            sections: builtin::sections(),
        }
    }

    /// Load sections from `dir` if given, falling back to the built-in set.
    ///
    /// Loading problems and empty directories are logged, never fatal.
    pub fn load_or_builtin(dir: Option<&Path>) -> Self {
        let Some(dir) = dir else {
            return Self::builtin();
        };

        match load_sections(dir).and_then(Self::new) {
            Ok(store) if !store.is_empty() => {
                info!(
                    "Loaded {} section(s) from {}",
                    store.len(),
                    dir.display()
                );
                store
            }
            Ok(_) => {
                warn!(
                    "No documentation files found in {}, using built-in content",
                    dir.display()
                );
                Self::builtin()
            }
            Err(e) => {
                warn!("{}. Using built-in content.", e);
                Self::builtin()
            }
        }
    }

    /// Look up a section by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::SectionNotFound` for unknown ids.
    pub fn get(&self, id: &str) -> Result<&Section> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::SectionNotFound(id.to_string()))
    }

    /// Whether a section with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    /// All sections in display order.
    pub fn list(&self) -> &[Section] {
        &self.sections
    }

    /// Sections whose title or body contains `query`, case-insensitively.
    ///
    /// Display order is preserved; an empty query returns everything.
    pub fn filter(&self, query: &str) -> Vec<&Section> {
        self.sections.iter().filter(|s| s.matches(query)).collect()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the store has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
