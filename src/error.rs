//! Error types for treex.
//!
//! Command-level failures use [`TreexError`]. Failures of a single export
//! format use [`ExportError`]; the pipeline records those per format and never
//! lets them escape.

use std::path::PathBuf;

/// Errors surfaced to the command line.
#[derive(Debug, thiserror::Error)]
pub enum TreexError {
    /// Malformed invocation, reported before any work is done.
    #[error("{0}")]
    Usage(String),

    #[error("cannot read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Icon type outside the recognized set.
    #[error("Invalid icon type '{0}'")]
    InvalidIconType(String),

    /// Supplied symbol is empty or not pictographic.
    #[error("Invalid icon '{0}'. Please provide a valid emoji character.")]
    InvalidIcon(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias for command-level results.
pub type Result<T> = std::result::Result<T, TreexError>;

/// Why the external rendering engine could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineFailure {
    /// No browser executable was found.
    NotInstalled,
    /// A browser was found but cannot run on this CPU.
    ArchitectureMismatch { executable: PathBuf },
}

impl std::fmt::Display for EngineFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineFailure::NotInstalled => write!(
                f,
                "Chromium is required for PNG and WebP export but no installation was found.\n\
                 Install Chromium or Google Chrome, or set TREEX_BROWSER to the path of a \
                 browser executable. SVG, Markdown, text and BMP export work without it."
            ),
            EngineFailure::ArchitectureMismatch { executable } => write!(
                f,
                "Chromium is required for PNG and WebP export but {} cannot run on this \
                 machine ({}).\n\
                 Install a Chromium build that matches your CPU architecture, or set \
                 TREEX_BROWSER to one. SVG, Markdown, text and BMP export work without it.",
                executable.display(),
                std::env::consts::ARCH
            ),
        }
    }
}

/// Failure of a single export format.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unsupported export type: {0}")]
    UnknownFormat(String),

    /// The target artifact exists; treex never overwrites.
    #[error("File already exists")]
    AlreadyExists(PathBuf),

    /// The formatter refuses to run on this operating system.
    #[error("Image export not available on {platform} at this time")]
    UnsupportedPlatform { platform: String },

    #[error("{0}")]
    EngineUnavailable(EngineFailure),

    #[error("{0}")]
    Conversion(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// True when the shared rendering engine is missing or unusable.
    pub fn is_engine_unavailable(&self) -> bool {
        matches!(self, ExportError::EngineUnavailable(_))
    }
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Conversion(format!("image encoding failed: {}", err))
    }
}
