//! Directory tree walking logic
//!
//! This module turns a directory into an ordered sequence of annotated
//! [`TreeLine`]s, or into the equivalent nested [`TreeNode`] form:
//!
//! - `matcher` decides which entry names are ignored
//! - `traversal` reads, filters and orders entries
//! - `walker` drives the depth-first walk

mod access;
mod config;
mod line;
mod matcher;
mod node;
mod traversal;
mod walker;

// Re-export public types
pub use access::{AccessProbe, FsAccess};
pub use config::WalkerConfig;
pub use line::{Connector, LineKind, TreeLine, join_lines};
pub use matcher::{IgnoreMatcher, is_glob};
pub use node::TreeNode;
pub use traversal::{Entry, compare_entries, compare_names};
pub use walker::{TreeOutput, TreeWalker, WalkSummary};
