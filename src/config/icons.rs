//! Icon (emoji) configuration used to annotate tree lines.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TreexError};

use super::{read_json, write_bytes, write_json};

/// Default icon file, copied verbatim by [`IconSet::restore`].
pub const DEFAULT_ICONS_JSON: &str = include_str!("../../config/emojis-default.json");

/// The five recognized icon slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Folder,
    File,
    Hidden,
    Locked,
    PermissionDenied,
}

impl IconKind {
    pub const ALL: [IconKind; 5] = [
        IconKind::Folder,
        IconKind::File,
        IconKind::Hidden,
        IconKind::Locked,
        IconKind::PermissionDenied,
    ];

    /// Key used in `emojis.json` and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            IconKind::Folder => "folder",
            IconKind::File => "file",
            IconKind::Hidden => "hidden",
            IconKind::Locked => "locked",
            IconKind::PermissionDenied => "permissionDenied",
        }
    }

    /// Comma separated list of valid keys, for error messages.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconKind {
    type Err = TreexError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| TreexError::InvalidIconType(s.to_string()))
    }
}

/// Symbols for each [`IconKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconSet {
    pub folder: String,
    pub file: String,
    pub hidden: String,
    pub locked: String,
    pub permission_denied: String,
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            folder: "📂".to_string(),
            file: "📄".to_string(),
            hidden: "🕶️".to_string(),
            locked: "🔒".to_string(),
            permission_denied: "🚫".to_string(),
        }
    }
}

impl IconSet {
    /// Load from `path`, falling back to the defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(read_json(path)?.unwrap_or_default())
    }

    pub fn get(&self, kind: IconKind) -> &str {
        match kind {
            IconKind::Folder => &self.folder,
            IconKind::File => &self.file,
            IconKind::Hidden => &self.hidden,
            IconKind::Locked => &self.locked,
            IconKind::PermissionDenied => &self.permission_denied,
        }
    }

    fn slot_mut(&mut self, kind: IconKind) -> &mut String {
        match kind {
            IconKind::Folder => &mut self.folder,
            IconKind::File => &mut self.file,
            IconKind::Hidden => &mut self.hidden,
            IconKind::Locked => &mut self.locked,
            IconKind::PermissionDenied => &mut self.permission_denied,
        }
    }

    /// Entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = (IconKind, &str)> {
        IconKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// Replace one icon in memory, returning the previous symbol.
    pub fn set(&mut self, kind: IconKind, symbol: &str) -> Result<String> {
        if !is_pictographic(symbol) {
            return Err(TreexError::InvalidIcon(symbol.to_string()));
        }
        Ok(std::mem::replace(self.slot_mut(kind), symbol.to_string()))
    }

    /// Validate, update and persist one icon. Returns `(old, new)`.
    pub fn update(path: &Path, kind: &str, symbol: &str) -> Result<(String, String)> {
        let kind: IconKind = kind.parse()?;
        let mut icons = Self::load(path)?;
        let old = icons.set(kind, symbol)?;
        write_json(path, &icons)?;
        Ok((old, symbol.to_string()))
    }

    /// Overwrite `path` with the default icon file, byte for byte.
    pub fn restore(path: &Path) -> Result<()> {
        write_bytes(path, DEFAULT_ICONS_JSON.as_bytes())
    }
}

/// True when `symbol` is non-blank and contains a pictographic code point.
pub fn is_pictographic(symbol: &str) -> bool {
    !symbol.trim().is_empty() && symbol.chars().any(is_pictographic_char)
}

/// Emoji and symbol ranges accepted as icons.
pub fn is_pictographic_char(c: char) -> bool {
    matches!(
        c as u32,
        0x1F600..=0x1F64F
            | 0x1F300..=0x1F5FF
            | 0x1F680..=0x1F6FF
            | 0x1F1E0..=0x1F1FF
            | 0x2600..=0x26FF
            | 0x2700..=0x27BF
            | 0x1F900..=0x1F9FF
            | 0x1F018..=0x1F270
            | 0x238C..=0x2454
            | 0x20D0..=0x20FF
    )
}
