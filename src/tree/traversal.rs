//! Traversal logic shared by the line walk and the node walk.

use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{IconKind, IconSet};

use super::access::AccessProbe;
use super::config::WalkerConfig;
use super::matcher::IgnoreMatcher;

/// A directory entry that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    /// From the entry's own file type; symlinks to directories are not directories.
    pub is_dir: bool,
}

impl Entry {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Common traversal functionality shared by both walk forms.
pub struct BaseTraversal<'a> {
    pub config: &'a WalkerConfig,
    pub matcher: &'a IgnoreMatcher,
    pub icons: &'a IconSet,
    pub probe: &'a dyn AccessProbe,
}

impl<'a> BaseTraversal<'a> {
    pub fn new(
        config: &'a WalkerConfig,
        matcher: &'a IgnoreMatcher,
        icons: &'a IconSet,
        probe: &'a dyn AccessProbe,
    ) -> Self {
        Self {
            config,
            matcher,
            icons,
            probe,
        }
    }

    /// Display name of the root: the last component of the resolved path.
    pub fn root_name(&self, path: &Path) -> String {
        let resolved = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let resolved = normalize(&resolved);
        resolved
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| resolved.display().to_string())
    }

    /// Read, filter, and sort directory entries
    pub fn read_and_filter_entries(&self, path: &Path) -> io::Result<Vec<Entry>> {
        let mut entries: Vec<Entry> = std::fs::read_dir(path)?
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name().to_string_lossy().to_string();
                if self.matcher.is_ignored(&name) {
                    return None;
                }
                let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if self.config.folders_only && !is_dir {
                    return None;
                }
                Some(Entry {
                    name,
                    path: e.path(),
                    is_dir,
                })
            })
            .collect();
        entries.sort_by(compare_entries);
        Ok(entries)
    }

    pub fn icon(&self, kind: IconKind) -> &str {
        self.icons.get(kind)
    }

    pub fn entry_icon(&self, entry: &Entry) -> &str {
        if entry.is_dir {
            self.icon(IconKind::Folder)
        } else {
            self.icon(IconKind::File)
        }
    }

    pub fn is_locked(&self, path: &Path) -> bool {
        !self.probe.can_write(path)
    }

    /// Markers for the root line.
    pub fn root_details(&self, path: &Path) -> Vec<String> {
        if self.config.show_details && self.is_locked(path) {
            vec![self.icon(IconKind::Locked).to_string()]
        } else {
            Vec::new()
        }
    }

    /// Markers for an entry line.
    pub fn entry_details(&self, entry: &Entry) -> Vec<String> {
        let mut details = Vec::new();
        if !self.config.show_details {
            return details;
        }
        if self.is_locked(&entry.path) {
            details.push(self.icon(IconKind::Locked).to_string());
        }
        if entry.is_hidden() {
            details.push(self.icon(IconKind::Hidden).to_string());
        }
        details
    }

    /// Whether the walk descends into this entry.
    pub fn should_recurse(&self, entry: &Entry) -> bool {
        entry.is_dir && !self.config.collapsed
    }

    pub fn can_descend(&self, path: &Path) -> bool {
        self.probe.can_read(path)
    }

    /// Calculate the prefix for child entries
    pub fn calculate_child_prefix(&self, current_prefix: &str, is_last: bool) -> String {
        if is_last {
            format!("{}    ", current_prefix)
        } else {
            format!("{}│   ", current_prefix)
        }
    }
}

/// Directories first, then names in collation order.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Case-insensitive comparison; among names equal ignoring case, lowercase sorts first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Drop `.` components and resolve `..` lexically so `.` and `sub/..` name the directory.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool) -> Entry {
        Entry {
            name: name.to_string(),
            path: PathBuf::from(name),
            is_dir,
        }
    }

    #[test]
    fn directories_sort_before_files() {
        let mut entries = vec![entry("b.txt", false), entry("A", true), entry("a.txt", false)];
        entries.sort_by(compare_entries);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "a.txt", "b.txt"]);
    }

    #[test]
    fn names_compare_ignoring_case() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zebra", "apple"), Ordering::Greater);
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn normalize_resolves_dot_components() {
        assert_eq!(normalize(Path::new("/a/b/./c/..")), PathBuf::from("/a/b"));
    }
}
