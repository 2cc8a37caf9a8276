//! Test utilities for building temporary directory trees and faking the
//! rendering engine.
//!
//! This module is only compiled for tests and benchmarks.

use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

use crate::error::{EngineFailure, ExportError};
use crate::export::{EngineSession, RenderEngine, Viewport};
use crate::tree::AccessProbe;

/// A temporary directory tree for testing.
///
/// The tree is automatically cleaned up when dropped.
pub struct TestTree {
    _dir: TempDir,
    root: PathBuf,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().to_path_buf();
        Self { _dir: dir, root }
    }

    /// Create a temporary tree whose root directory has a fixed name.
    pub fn named(name: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join(name);
        fs::create_dir(&root).expect("Failed to create named root");
        Self { _dir: dir, root }
    }

    /// Get the path to the root of the tree.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.root.join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Access probe that allows everything except the listed paths.
#[derive(Debug, Clone, Default)]
pub struct DenyAccess {
    read: HashSet<PathBuf>,
    write: HashSet<PathBuf>,
}

impl DenyAccess {
    pub fn deny_read(mut self, path: impl AsRef<Path>) -> Self {
        self.read.insert(path.as_ref().to_path_buf());
        self
    }

    pub fn deny_write(mut self, path: impl AsRef<Path>) -> Self {
        self.write.insert(path.as_ref().to_path_buf());
        self
    }
}

impl AccessProbe for DenyAccess {
    fn can_read(&self, path: &Path) -> bool {
        !self.read.contains(path)
    }

    fn can_write(&self, path: &Path) -> bool {
        !self.write.contains(path)
    }
}

/// Rendering engine that never starts a real browser.
///
/// A working fake returns a white screenshot slightly larger than the
/// requested viewport. Launches are counted across clones.
#[derive(Debug, Clone)]
pub struct FakeEngine {
    failure: Option<EngineFailure>,
    launches: Arc<AtomicUsize>,
}

impl FakeEngine {
    pub fn working() -> Self {
        Self {
            failure: None,
            launches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn missing() -> Self {
        Self {
            failure: Some(EngineFailure::NotInstalled),
            ..Self::working()
        }
    }

    pub fn wrong_architecture() -> Self {
        Self {
            failure: Some(EngineFailure::ArchitectureMismatch {
                executable: PathBuf::from("/opt/fake/chromium"),
            }),
            ..Self::working()
        }
    }

    /// Number of launch attempts so far.
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

impl RenderEngine for FakeEngine {
    fn launch(&self) -> Result<Box<dyn EngineSession>, ExportError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(failure) => Err(ExportError::EngineUnavailable(failure.clone())),
            None => Ok(Box::new(FakeSession)),
        }
    }
}

struct FakeSession;

impl EngineSession for FakeSession {
    fn screenshot(&mut self, _html: &str, viewport: Viewport) -> Result<Vec<u8>, ExportError> {
        let shot = RgbImage::from_pixel(viewport.width + 40, viewport.height + 40, Rgb([255; 3]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(shot).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
