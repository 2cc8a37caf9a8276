//! Persisted configuration: ignore list, icon set and export settings.
//!
//! Each file is read fresh at the start of a command and passed explicitly to
//! the walker and the export registry. Missing files fall back to the
//! defaults embedded in the binary.

mod icons;
mod ignored;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, TreexError};

pub use icons::{DEFAULT_ICONS_JSON, IconKind, IconSet, is_pictographic, is_pictographic_char};
pub use ignored::{AddOutcome, DEFAULT_IGNORED_JSON, IgnoreList, RemoveOutcome};
pub use settings::{ExportSettings, Settings};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "TREEX_CONFIG_DIR";

const IGNORED_FILE: &str = "ignored-names.json";
const ICONS_FILE: &str = "emojis.json";
const SETTINGS_FILE: &str = "settings.json";

/// Locations of the configuration files.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl ConfigPaths {
    /// Use `$TREEX_CONFIG_DIR`, else the platform config directory.
    pub fn discover() -> Self {
        let dir = std::env::var_os(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join("treex")))
            .unwrap_or_else(|| PathBuf::from(".treex"));
        Self { dir }
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ignored(&self) -> PathBuf {
        self.dir.join(IGNORED_FILE)
    }

    pub fn icons(&self) -> PathBuf {
        self.dir.join(ICONS_FILE)
    }

    pub fn settings(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }
}

/// Read a JSON file, returning `None` when it does not exist.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(TreexError::ConfigRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| TreexError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
}

/// Overwrite `path` with pretty-printed JSON, creating parent directories.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| TreexError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    write_bytes(path, json.as_bytes())
}

pub(crate) fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let wrap = |source| TreexError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, bytes).map_err(wrap)?;
    tracing::debug!(path = %path.display(), "wrote configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_live_in_one_directory() {
        let paths = ConfigPaths::at("/etc/treex");
        assert_eq!(paths.ignored(), PathBuf::from("/etc/treex/ignored-names.json"));
        assert_eq!(paths.icons(), PathBuf::from("/etc/treex/emojis.json"));
        assert_eq!(paths.settings(), PathBuf::from("/etc/treex/settings.json"));
    }

    #[test]
    fn missing_json_is_none() {
        let dir = TempDir::new().unwrap();
        let value: Option<Vec<String>> = read_json(&dir.path().join("absent.json")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn malformed_json_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[not json").unwrap();
        let err = read_json::<Vec<String>>(&path).unwrap_err();
        assert!(matches!(err, TreexError::ConfigParse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn write_json_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/list.json");
        write_json(&path, &vec!["a".to_string()]).unwrap();
        let back: Option<Vec<String>> = read_json(&path).unwrap();
        assert_eq!(back, Some(vec!["a".to_string()]));
    }
}
