//! TreeWalker - produces ordered tree lines or a nested node tree

use std::io;
use std::path::Path;

use crate::config::{IconKind, IconSet};

use super::access::{AccessProbe, FsAccess};
use super::config::WalkerConfig;
use super::line::TreeLine;
use super::matcher::IgnoreMatcher;
use super::node::TreeNode;
use super::traversal::{BaseTraversal, Entry};

/// Receives tree lines in walk order.
pub trait TreeOutput {
    fn line(&mut self, line: &TreeLine) -> io::Result<()>;

    fn finish(&mut self, _summary: &WalkSummary) -> io::Result<()> {
        Ok(())
    }
}

impl TreeOutput for Vec<TreeLine> {
    fn line(&mut self, line: &TreeLine) -> io::Result<()> {
        self.push(line.clone());
        Ok(())
    }
}

/// Counts gathered during a walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    pub directories: usize,
    pub files: usize,
    /// Subtrees replaced by a permission-denied line.
    pub denied: usize,
}

/// Depth-first, single-threaded directory walker.
///
/// Unreadable subtrees never abort the walk: each one is replaced by a
/// single permission-denied line and traversal continues with its siblings.
pub struct TreeWalker {
    config: WalkerConfig,
    matcher: IgnoreMatcher,
    icons: IconSet,
    probe: Box<dyn AccessProbe>,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig, matcher: IgnoreMatcher, icons: IconSet) -> Self {
        Self {
            config,
            matcher,
            icons,
            probe: Box::new(FsAccess),
        }
    }

    /// Replace the OS access probe.
    pub fn with_probe(mut self, probe: impl AccessProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    fn traversal(&self) -> BaseTraversal<'_> {
        BaseTraversal::new(&self.config, &self.matcher, &self.icons, self.probe.as_ref())
    }

    /// Walk and stream lines to `output`.
    ///
    /// Only errors from `output` are returned; filesystem failures become lines.
    pub fn walk_streaming<O: TreeOutput>(
        &self,
        root: &Path,
        output: &mut O,
    ) -> io::Result<WalkSummary> {
        let base = self.traversal();
        let mut summary = WalkSummary::default();

        let entries = match base.read_and_filter_entries(root) {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(root = %root.display(), error = %e, "root is unreadable");
                output.line(&TreeLine::error(read_error(root, &e)))?;
                output.finish(&summary)?;
                return Ok(summary);
            }
        };

        output.line(&TreeLine::root(
            base.icon(IconKind::Folder),
            base.root_name(root),
            base.root_details(root),
        ))?;
        self.walk_entries(&base, &entries, "", output, &mut summary)?;

        tracing::debug!(
            directories = summary.directories,
            files = summary.files,
            denied = summary.denied,
            "walk finished"
        );
        output.finish(&summary)?;
        Ok(summary)
    }

    fn walk_entries<O: TreeOutput>(
        &self,
        base: &BaseTraversal<'_>,
        entries: &[Entry],
        prefix: &str,
        output: &mut O,
        summary: &mut WalkSummary,
    ) -> io::Result<()> {
        let count = entries.len();
        for (i, entry) in entries.iter().enumerate() {
            let is_last = i + 1 == count;
            output.line(&TreeLine::entry(
                prefix,
                is_last,
                entry.is_dir,
                base.entry_icon(entry),
                entry.name.as_str(),
                base.entry_details(entry),
            ))?;
            if entry.is_dir {
                summary.directories += 1;
            } else {
                summary.files += 1;
            }

            if !base.should_recurse(entry) {
                continue;
            }
            let child_prefix = base.calculate_child_prefix(prefix, is_last);
            match descend(base, &entry.path) {
                Some(children) => {
                    self.walk_entries(base, &children, &child_prefix, output, summary)?
                }
                None => {
                    summary.denied += 1;
                    output.line(&TreeLine::permission_denied(
                        &child_prefix,
                        base.icon(IconKind::PermissionDenied),
                    ))?;
                }
            }
        }
        Ok(())
    }

    /// Collect every line of the walk.
    pub fn lines(&self, root: &Path) -> Vec<TreeLine> {
        let mut lines = Vec::new();
        if let Err(e) = self.walk_streaming(root, &mut lines) {
            tracing::warn!(error = %e, "collecting tree lines failed");
        }
        lines
    }

    /// Build the nested node form of the walk.
    pub fn tree(&self, root: &Path) -> TreeNode {
        let base = self.traversal();
        let mut node = TreeNode {
            name: base.root_name(root),
            path: root.to_path_buf(),
            is_directory: true,
            is_root: true,
            is_hidden: false,
            is_locked: self.config.show_details && base.is_locked(root),
            is_permission_denied: false,
            icon: base.icon(IconKind::Folder).to_string(),
            error: None,
            children: Vec::new(),
        };
        match base.read_and_filter_entries(root) {
            Ok(entries) => node.children = self.build_children(&base, &entries),
            Err(e) => node.error = Some(read_error(root, &e)),
        }
        node
    }

    fn build_children(&self, base: &BaseTraversal<'_>, entries: &[Entry]) -> Vec<TreeNode> {
        entries
            .iter()
            .map(|entry| {
                let mut node = TreeNode {
                    name: entry.name.clone(),
                    path: entry.path.clone(),
                    is_directory: entry.is_dir,
                    is_root: false,
                    is_hidden: entry.is_hidden(),
                    is_locked: self.config.show_details && base.is_locked(&entry.path),
                    is_permission_denied: false,
                    icon: base.entry_icon(entry).to_string(),
                    error: None,
                    children: Vec::new(),
                };
                if base.should_recurse(entry) {
                    match descend(base, &entry.path) {
                        Some(children) => node.children = self.build_children(base, &children),
                        None => {
                            node.is_permission_denied = true;
                            node.icon = base.icon(IconKind::PermissionDenied).to_string();
                        }
                    }
                }
                node
            })
            .collect()
    }
}

/// Probe and list a subdirectory; `None` means it is unreadable.
fn descend(base: &BaseTraversal<'_>, path: &Path) -> Option<Vec<Entry>> {
    if !base.can_descend(path) {
        return None;
    }
    match base.read_and_filter_entries(path) {
        Ok(entries) => Some(entries),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cannot list subdirectory");
            None
        }
    }
}

fn read_error(path: &Path, err: &io::Error) -> String {
    format!("Error reading {}: {}", path.display(), err)
}
