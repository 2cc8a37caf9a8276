//! Plain text export.

use crate::error::ExportError;
use crate::export::format::{Artifact, ExportFormat, FormatDescriptor};

const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    id: "txt",
    name: "Plain Text",
    extension: "txt",
    description: "Plain text, exactly as printed in the console",
    binary: false,
    content_type: Some("text/plain"),
    requires_engine: false,
};

pub struct TextFormat {
    descriptor: FormatDescriptor,
}

impl TextFormat {
    pub fn new() -> Self {
        Self {
            descriptor: DESCRIPTOR,
        }
    }
}

impl Default for TextFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportFormat for TextFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &self.descriptor
    }

    fn convert(&self, tree: &str) -> Result<Artifact, ExportError> {
        Ok(Artifact::Text(format!("{}\n", tree)))
    }
}
