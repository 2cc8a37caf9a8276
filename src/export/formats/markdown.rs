//! Markdown export - the tree inside a fenced code block.

use crate::error::ExportError;
use crate::export::format::{Artifact, ExportFormat, FormatDescriptor};

const DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    id: "md",
    name: "Markdown",
    extension: "md",
    description: "Markdown format with code blocks",
    binary: false,
    content_type: Some("text/markdown"),
    requires_engine: false,
};

pub struct MarkdownFormat {
    descriptor: FormatDescriptor,
}

impl MarkdownFormat {
    pub fn new() -> Self {
        Self {
            descriptor: DESCRIPTOR,
        }
    }

    /// Render the markdown document.
    pub fn render(tree: &str) -> String {
        format!("# Folder Structure\n\n```\n{}\n```\n", tree)
    }
}

impl Default for MarkdownFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportFormat for MarkdownFormat {
    fn descriptor(&self) -> &FormatDescriptor {
        &self.descriptor
    }

    fn convert(&self, tree: &str) -> Result<Artifact, ExportError> {
        Ok(Artifact::Text(Self::render(tree)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_tree_in_fenced_block() {
        let out = MarkdownFormat::new().convert("📂 root\n└── 📄 a.txt").unwrap();
        assert_eq!(
            out,
            Artifact::Text(
                "# Folder Structure\n\n```\n📂 root\n└── 📄 a.txt\n```\n".to_string()
            )
        );
    }

    #[test]
    fn empty_tree_still_produces_document() {
        let out = MarkdownFormat::render("");
        assert!(out.starts_with("# Folder Structure"));
        assert!(out.contains("```\n\n```"));
    }
}
