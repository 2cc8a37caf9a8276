//! Configuration types for tree walkers

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Annotate entries with locked and hidden markers.
    pub show_details: bool,
    /// Show only the entries directly under the root.
    pub collapsed: bool,
    /// Omit files at every level.
    pub folders_only: bool,
}
