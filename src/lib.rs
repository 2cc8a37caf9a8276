//! treex - visualize folder structures as annotated trees and export them

pub mod config;
pub mod error;
pub mod export;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigPaths, ExportSettings, IconKind, IconSet, IgnoreList, Settings};
pub use error::{EngineFailure, ExportError, Result, TreexError};
pub use export::{ExportFormat, ExportPipeline, ExportResult, FormatDescriptor, FormatRegistry};
pub use output::{ColorMode, ConsoleFormatter, print_json, should_use_color};
pub use tree::{IgnoreMatcher, TreeLine, TreeNode, TreeOutput, TreeWalker, WalkerConfig, join_lines};
