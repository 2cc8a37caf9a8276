//! The export format contract.

use crate::error::ExportError;

/// Static description of an export format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// Identifier used with `--export-as`.
    pub id: &'static str,
    /// Human readable name.
    pub name: &'static str,
    /// File extension without the dot.
    pub extension: &'static str,
    pub description: &'static str,
    pub binary: bool,
    pub content_type: Option<&'static str>,
    /// Whether conversion needs the external rendering engine.
    pub requires_engine: bool,
}

impl FormatDescriptor {
    /// Check the fields every registered format must provide.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("missing identifier".to_string());
        }
        if !self
            .id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(format!("identifier '{}' must be lowercase ascii", self.id));
        }
        if self.extension.is_empty() {
            return Err("missing file extension".to_string());
        }
        if self.extension.contains(['.', '/', '\\']) {
            return Err(format!("extension '{}' must be a bare suffix", self.extension));
        }
        if self.description.trim().is_empty() {
            return Err("missing description".to_string());
        }
        Ok(())
    }
}

/// Output of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Text(String),
    Binary(Vec<u8>),
}

impl Artifact {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Artifact::Text(s) => s.as_bytes(),
            Artifact::Binary(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Converts the joined tree text into one output representation.
pub trait ExportFormat {
    fn descriptor(&self) -> &FormatDescriptor;

    fn convert(&self, tree: &str) -> Result<Artifact, ExportError>;
}
