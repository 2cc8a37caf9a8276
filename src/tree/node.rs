//! Nested node form of a walk, for structured consumers such as JSON output.

use std::path::PathBuf;

use serde::Serialize;

/// One entry of the tree with its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
    pub is_root: bool,
    pub is_hidden: bool,
    /// Only computed when details are requested.
    pub is_locked: bool,
    pub is_permission_denied: bool,
    pub icon: String,
    /// Set on the root when its listing could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        self.is_directory
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }
}
