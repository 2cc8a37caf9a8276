//! Export of a rendered tree to files.
//!
//! [`FormatRegistry`] holds the available [`ExportFormat`]s and
//! [`ExportPipeline`] drives a set of them over one rendering.

pub mod engine;
pub mod format;
pub mod formats;
pub mod pipeline;
pub mod platform;
pub mod registry;

pub use engine::{BROWSER_ENV, Chromium, EngineSession, RenderEngine, Viewport};
pub use format::{Artifact, ExportFormat, FormatDescriptor};
pub use pipeline::{ENGINE_REQUIRED, ExportPipeline, ExportResult, FailedExport};
pub use platform::PlatformGate;
pub use registry::FormatRegistry;
