//! Built-in export formats.

pub mod bitmap;
pub mod browser;
pub mod markdown;
pub mod svg;
pub mod text;

use std::sync::Arc;

pub use bitmap::BitmapFormat;
pub use browser::BrowserFormat;
pub use markdown::MarkdownFormat;
pub use svg::{SvgDocument, SvgFormat};
pub use text::TextFormat;

use crate::config::ExportSettings;

use super::engine::{Chromium, RenderEngine};
use super::format::ExportFormat;
use super::platform::PlatformGate;

/// Every built-in format, configured from user settings.
pub fn builtin(settings: &ExportSettings) -> Vec<Box<dyn ExportFormat>> {
    with_engine(
        PlatformGate::current(&settings.disabled_platforms),
        Arc::new(Chromium::new(settings.browser.clone())),
    )
}

/// Every built-in format, sharing one rendering engine.
pub fn with_engine(gate: PlatformGate, engine: Arc<dyn RenderEngine>) -> Vec<Box<dyn ExportFormat>> {
    vec![
        Box::new(MarkdownFormat::new()),
        Box::new(TextFormat::new()),
        Box::new(SvgFormat::new(gate.clone())),
        Box::new(BitmapFormat::new()),
        Box::new(BrowserFormat::png(gate.clone(), Arc::clone(&engine))),
        Box::new(BrowserFormat::webp(gate, engine)),
    ]
}
