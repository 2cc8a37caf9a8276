//! The persisted ignore list.

use std::path::Path;

use crate::error::Result;

use super::{read_json, write_json};

/// Built-in ignore list used when no file has been written yet.
pub const DEFAULT_IGNORED_JSON: &str = include_str!("../../config/ignored-names-default.json");

/// Ordered list of ignore rules (literal names or `*`/`?` globs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreList {
    names: Vec<String>,
}

/// Result of [`IgnoreList::add`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: Vec<String>,
    pub already_present: Vec<String>,
}

/// Result of [`IgnoreList::remove`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub removed: Vec<String>,
    pub not_found: Vec<String>,
}

impl IgnoreList {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// The embedded default list.
    pub fn defaults() -> Self {
        let names = serde_json::from_str(DEFAULT_IGNORED_JSON).unwrap_or_default();
        Self { names }
    }

    /// Load from `path`, falling back to the defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(read_json::<Vec<String>>(path)?
            .map(Self::new)
            .unwrap_or_else(Self::defaults))
    }

    /// Overwrite `path` with the whole list.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, &self.names)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Append names that are not yet present, preserving request order.
    pub fn add<S: AsRef<str>>(&mut self, names: &[S]) -> AddOutcome {
        let mut outcome = AddOutcome::default();
        for name in names.iter().map(AsRef::as_ref) {
            if self.contains(name) {
                outcome.already_present.push(name.to_string());
            } else {
                self.names.push(name.to_string());
                outcome.added.push(name.to_string());
            }
        }
        outcome
    }

    /// Remove every listed name that is present.
    pub fn remove<S: AsRef<str>>(&mut self, names: &[S]) -> RemoveOutcome {
        let mut outcome = RemoveOutcome::default();
        for name in names.iter().map(AsRef::as_ref) {
            if self.contains(name) {
                self.names.retain(|n| n != name);
                outcome.removed.push(name.to_string());
            } else if !outcome.removed.iter().any(|r| r == name) {
                outcome.not_found.push(name.to_string());
            }
        }
        outcome
    }

    /// Add names and persist the list if anything changed.
    pub fn add_and_save<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<AddOutcome> {
        let mut list = Self::load(path)?;
        let outcome = list.add(names);
        if !outcome.added.is_empty() {
            list.save(path)?;
        }
        Ok(outcome)
    }

    /// Remove names and persist the list if anything changed.
    pub fn remove_and_save<S: AsRef<str>>(path: &Path, names: &[S]) -> Result<RemoveOutcome> {
        let mut list = Self::load(path)?;
        let outcome = list.remove(names);
        if !outcome.removed.is_empty() {
            list.save(path)?;
        }
        Ok(outcome)
    }
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::defaults()
    }
}
