//! Registry of export formats keyed by identifier.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::ExportSettings;

use super::engine::RenderEngine;
use super::format::{ExportFormat, FormatDescriptor};
use super::formats;
use super::platform::PlatformGate;

/// Lookup table of validated export formats.
///
/// Formats are registered explicitly. A format whose descriptor is incomplete,
/// or whose identifier is already taken, is logged and skipped.
#[derive(Default)]
pub struct FormatRegistry {
    formats: BTreeMap<&'static str, Box<dyn ExportFormat>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in format.
    pub fn builtin(settings: &ExportSettings) -> Self {
        Self::from_formats(formats::builtin(settings))
    }

    /// Built-in formats with an explicit gate and rendering engine.
    pub fn with_engine(gate: PlatformGate, engine: Arc<dyn RenderEngine>) -> Self {
        Self::from_formats(formats::with_engine(gate, engine))
    }

    fn from_formats(formats: Vec<Box<dyn ExportFormat>>) -> Self {
        let mut registry = Self::new();
        for format in formats {
            registry.register(format);
        }
        registry
    }

    /// Add a format. Returns `false` when it was rejected.
    pub fn register(&mut self, format: Box<dyn ExportFormat>) -> bool {
        let descriptor = format.descriptor();
        let id = descriptor.id;
        if let Err(reason) = descriptor.validate() {
            tracing::warn!(format = id, %reason, "skipping invalid export format");
            return false;
        }
        if self.formats.contains_key(id) {
            tracing::warn!(format = id, "skipping duplicate export format");
            return false;
        }
        tracing::debug!(format = id, "registered export format");
        self.formats.insert(id, format);
        true
    }

    pub fn get(&self, id: &str) -> Option<&dyn ExportFormat> {
        self.formats.get(id).map(|f| f.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.formats.contains_key(id)
    }

    /// Registered identifiers in sorted order.
    pub fn identifiers(&self) -> Vec<&'static str> {
        self.formats.keys().copied().collect()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &FormatDescriptor> {
        self.formats.values().map(|f| f.descriptor())
    }

    /// Requested identifiers that are not registered, in request order.
    pub fn unsupported<'a, S: AsRef<str>>(&self, requested: &'a [S]) -> Vec<&'a str> {
        requested
            .iter()
            .map(AsRef::as_ref)
            .filter(|id| !self.contains(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::export::format::Artifact;

    struct Fake(FormatDescriptor);

    impl ExportFormat for Fake {
        fn descriptor(&self) -> &FormatDescriptor {
            &self.0
        }

        fn convert(&self, tree: &str) -> Result<Artifact, ExportError> {
            Ok(Artifact::Text(tree.to_string()))
        }
    }

    fn fake(id: &'static str, extension: &'static str, description: &'static str) -> Box<Fake> {
        Box::new(Fake(FormatDescriptor {
            id,
            name: id,
            extension,
            description,
            binary: false,
            content_type: None,
            requires_engine: false,
        }))
    }

    #[test]
    fn builtin_registers_every_format() {
        let registry = FormatRegistry::builtin(&ExportSettings::default());
        assert_eq!(
            registry.identifiers(),
            vec!["bmp", "md", "png", "svg", "txt", "webp"]
        );
    }

    #[test]
    fn lookup_by_identifier() {
        let registry = FormatRegistry::builtin(&ExportSettings::default());
        let md = registry.get("md").unwrap();
        assert_eq!(md.descriptor().extension, "md");
        assert!(registry.get("pdf").is_none());
    }

    #[test]
    fn only_browser_formats_need_engine() {
        let registry = FormatRegistry::builtin(&ExportSettings::default());
        let engine: Vec<_> = registry
            .descriptors()
            .filter(|d| d.requires_engine)
            .map(|d| d.id)
            .collect();
        assert_eq!(engine, vec!["png", "webp"]);
    }

    #[test]
    fn malformed_formats_are_skipped() {
        let mut registry = FormatRegistry::new();
        assert!(!registry.register(fake("", "x", "no id")));
        assert!(!registry.register(fake("noext", "", "no extension")));
        assert!(!registry.register(fake("nodesc", "nd", "")));
        assert!(registry.register(fake("ok", "ok", "fine")));
        assert_eq!(registry.identifiers(), vec!["ok"]);
    }

    #[test]
    fn duplicate_identifier_keeps_first() {
        let mut registry = FormatRegistry::new();
        assert!(registry.register(fake("md", "md", "first")));
        assert!(!registry.register(fake("md", "markdown", "second")));
        assert_eq!(registry.get("md").unwrap().descriptor().description, "first");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unsupported_lists_unknown_ids() {
        let registry = FormatRegistry::builtin(&ExportSettings::default());
        let requested = vec!["md".to_string(), "pdf".to_string(), "docx".to_string()];
        assert_eq!(registry.unsupported(&requested), vec!["pdf", "docx"]);
    }
}
