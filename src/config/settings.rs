//! Optional `settings.json` with export preferences.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::read_json;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export: ExportSettings,
}

/// Export-related settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    /// Operating systems (`std::env::consts::OS` names) on which image
    /// export is refused.
    pub disabled_platforms: Vec<String>,
    /// Browser executable for PNG/WebP rendering; discovered when unset.
    pub browser: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            disabled_platforms: vec!["linux".to_string()],
            browser: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(read_json(path)?.unwrap_or_default())
    }
}
