//! Runs requested formats over one rendered tree and collects the outcome.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ExportError;

use super::format::ExportFormat;
use super::registry::FormatRegistry;

/// Failure entry recorded for a format that produced no artifact.
pub const ENGINE_REQUIRED: &str = "Requires Chromium (see message below)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedExport {
    pub artifact: String,
    pub error: String,
}

/// Aggregate outcome of one pipeline run.
///
/// Every requested format lands in exactly one of `completed` or `failed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub completed: Vec<String>,
    pub failed: Vec<FailedExport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_dependency_error: Option<String>,
}

impl ExportResult {
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.failed.is_empty()
    }

    fn fail(&mut self, artifact: String, error: impl Into<String>) {
        self.failed.push(FailedExport {
            artifact,
            error: error.into(),
        });
    }
}

pub struct ExportPipeline<'a> {
    registry: &'a FormatRegistry,
    out_dir: PathBuf,
}

impl<'a> ExportPipeline<'a> {
    /// Artifacts are written into `out_dir`.
    pub fn new(registry: &'a FormatRegistry, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            out_dir: out_dir.into(),
        }
    }

    /// Export `tree` once per requested format, in request order.
    pub fn export_all<S: AsRef<str>>(&self, tree: &str, base: &str, formats: &[S]) -> ExportResult {
        let mut result = ExportResult::default();
        let mut skipped = vec![false; formats.len()];

        for (i, id) in formats.iter().map(AsRef::as_ref).enumerate() {
            if skipped[i] {
                continue;
            }
            let Some(format) = self.registry.get(id) else {
                result.fail(
                    format!("{}.{}", base, id),
                    ExportError::UnknownFormat(id.to_string()).to_string(),
                );
                continue;
            };
            let artifact = format!("{}.{}", base, format.descriptor().extension);

            match self.export_one(format, tree, &artifact) {
                Ok(path) => {
                    tracing::debug!(format = id, path = %path.display(), "export completed");
                    result.completed.push(artifact);
                }
                Err(err) if err.is_engine_unavailable() && result.shared_dependency_error.is_none() => {
                    tracing::debug!(format = id, "rendering engine unavailable");
                    result.shared_dependency_error = Some(err.to_string());
                    result.fail(artifact, ENGINE_REQUIRED);
                    for (j, pending) in formats.iter().map(AsRef::as_ref).enumerate().skip(i + 1) {
                        let Some(other) = self.registry.get(pending) else {
                            continue;
                        };
                        if skipped[j] || !other.descriptor().requires_engine {
                            continue;
                        }
                        skipped[j] = true;
                        result.fail(
                            format!("{}.{}", base, other.descriptor().extension),
                            ENGINE_REQUIRED,
                        );
                    }
                }
                Err(err) => {
                    tracing::debug!(format = id, error = %err, "export failed");
                    result.fail(artifact, err.to_string());
                }
            }
        }
        result
    }

    fn export_one(
        &self,
        format: &dyn ExportFormat,
        tree: &str,
        artifact: &str,
    ) -> Result<PathBuf, ExportError> {
        let path = self.out_dir.join(artifact);
        if path.exists() {
            return Err(ExportError::AlreadyExists(path));
        }
        let output = format.convert(tree)?;
        write_new(&path, output.as_bytes())?;
        Ok(path)
    }
}

/// Write `bytes` to a file that must not exist yet.
fn write_new(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ExportError::AlreadyExists(path.to_path_buf()),
            _ => ExportError::Io(e),
        })?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}
