//! Rendered tree lines.

use std::fmt;

/// Connector glyph placed before an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// Entry has siblings after it.
    Mid,
    /// Entry is the last of its siblings.
    Last,
}

impl Connector {
    pub fn for_position(is_last: bool) -> Self {
        if is_last { Connector::Last } else { Connector::Mid }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Connector::Mid => "├──",
            Connector::Last => "└──",
        }
    }
}

/// What a line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Root,
    Entry { is_dir: bool },
    /// Synthetic line standing in for an unreadable subtree.
    PermissionDenied,
    /// Synthetic line replacing the whole tree when the root cannot be read.
    Error,
}

/// One line of tree output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub kind: LineKind,
    /// Ancestry continuation bars.
    pub prefix: String,
    pub connector: Option<Connector>,
    pub icon: String,
    pub name: String,
    /// Trailing marker symbols (locked, hidden).
    pub details: Vec<String>,
}

impl TreeLine {
    pub fn root(icon: &str, name: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            kind: LineKind::Root,
            prefix: String::new(),
            connector: None,
            icon: icon.to_string(),
            name: name.into(),
            details,
        }
    }

    pub fn entry(
        prefix: &str,
        is_last: bool,
        is_dir: bool,
        icon: &str,
        name: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self {
            kind: LineKind::Entry { is_dir },
            prefix: prefix.to_string(),
            connector: Some(Connector::for_position(is_last)),
            icon: icon.to_string(),
            name: name.into(),
            details,
        }
    }

    pub fn permission_denied(prefix: &str, icon: &str) -> Self {
        Self {
            kind: LineKind::PermissionDenied,
            prefix: prefix.to_string(),
            connector: Some(Connector::Last),
            icon: icon.to_string(),
            name: "Permission denied".to_string(),
            details: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Error,
            prefix: String::new(),
            connector: None,
            icon: String::new(),
            name: message.into(),
            details: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, LineKind::Root | LineKind::Entry { is_dir: true })
    }

    /// Text before the icon: prefix plus connector.
    pub fn lead(&self) -> String {
        match self.connector {
            Some(c) => format!("{}{} ", self.prefix, c.as_str()),
            None => self.prefix.clone(),
        }
    }
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lead())?;
        if !self.icon.is_empty() {
            write!(f, "{} ", self.icon)?;
        }
        f.write_str(&self.name)?;
        for detail in &self.details {
            write!(f, " {}", detail)?;
        }
        Ok(())
    }
}

/// Join lines into the text handed to export formatters.
pub fn join_lines(lines: &[TreeLine]) -> String {
    lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_line_has_no_connector() {
        let line = TreeLine::root("📂", "project", vec!["🔒".to_string()]);
        assert_eq!(line.to_string(), "📂 project 🔒");
    }

    #[test]
    fn entry_lines_use_position_connector() {
        let mid = TreeLine::entry("│   ", false, false, "📄", "a.txt", vec![]);
        let last = TreeLine::entry("    ", true, true, "📂", "src", vec![]);
        assert_eq!(mid.to_string(), "│   ├── 📄 a.txt");
        assert_eq!(last.to_string(), "    └── 📂 src");
    }

    #[test]
    fn details_are_space_separated() {
        let line = TreeLine::entry(
            "",
            true,
            false,
            "📄",
            ".env",
            vec!["🔒".to_string(), "🕶️".to_string()],
        );
        assert_eq!(line.to_string(), "└── 📄 .env 🔒 🕶️");
    }

    #[test]
    fn permission_denied_line() {
        let line = TreeLine::permission_denied("│   ", "🚫");
        assert_eq!(line.to_string(), "│   └── 🚫 Permission denied");
        assert_eq!(line.kind, LineKind::PermissionDenied);
    }

    #[test]
    fn error_line_is_bare_message() {
        let line = TreeLine::error("Error reading /x: denied");
        assert_eq!(line.to_string(), "Error reading /x: denied");
    }

    #[test]
    fn join_uses_newlines_without_trailing() {
        let lines = vec![
            TreeLine::root("📂", "r", vec![]),
            TreeLine::entry("", true, false, "📄", "f", vec![]),
        ];
        assert_eq!(join_lines(&lines), "📂 r\n└── 📄 f");
    }
}
