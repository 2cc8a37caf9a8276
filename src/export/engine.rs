//! External rendering engine (headless Chromium) used by PNG and WebP export.
//!
//! A [`RenderEngine`] launches an [`EngineSession`]; the session owns every
//! resource it creates and releases them when dropped, whichever way the
//! conversion ends.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

use tempfile::TempDir;

use crate::error::{EngineFailure, ExportError};

/// Environment variable naming a browser executable.
pub const BROWSER_ENV: &str = "TREEX_BROWSER";

/// Milliseconds of virtual time granted for asynchronous font loading.
const SETTLE_BUDGET_MS: u32 = 100;

const EXECUTABLE_NAMES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

/// Size of the page area to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Something that can start a rendering session.
pub trait RenderEngine {
    fn launch(&self) -> Result<Box<dyn EngineSession>, ExportError>;
}

/// A running engine instance. Dropping it releases the instance.
pub trait EngineSession {
    /// Load `html`, let it settle and return a PNG screenshot of `viewport`.
    fn screenshot(&mut self, html: &str, viewport: Viewport) -> Result<Vec<u8>, ExportError>;
}

/// Headless Chromium or Google Chrome.
#[derive(Debug, Clone, Default)]
pub struct Chromium {
    configured: Option<PathBuf>,
}

impl Chromium {
    /// `configured` takes precedence over discovery.
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }

    /// Find a browser executable.
    pub fn locate(&self) -> Option<PathBuf> {
        if let Some(path) = &self.configured {
            return Some(path.clone());
        }
        for var in [BROWSER_ENV, "CHROME_PATH"] {
            if let Some(value) = std::env::var_os(var).filter(|v| !v.is_empty()) {
                return Some(PathBuf::from(value));
            }
        }
        search_path(std::env::var_os("PATH"))
            .or_else(|| well_known_paths().into_iter().find(|p| p.is_file()))
    }
}

impl RenderEngine for Chromium {
    fn launch(&self) -> Result<Box<dyn EngineSession>, ExportError> {
        let executable = self
            .locate()
            .ok_or(ExportError::EngineUnavailable(EngineFailure::NotInstalled))?;
        tracing::debug!(executable = %executable.display(), "launching browser");
        probe(&executable)?;
        let profile = tempfile::Builder::new()
            .prefix("treex-chromium-")
            .tempdir()?;
        Ok(Box::new(ChromiumSession {
            executable,
            profile,
        }))
    }
}

/// Check that the executable starts at all.
fn probe(executable: &Path) -> Result<(), ExportError> {
    let output = Command::new(executable)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_error(executable, e))?;
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if looks_like_arch_mismatch(&stderr) {
        return Err(ExportError::EngineUnavailable(
            EngineFailure::ArchitectureMismatch {
                executable: executable.to_path_buf(),
            },
        ));
    }
    Err(ExportError::Conversion(format!(
        "browser at {} failed to start ({}): {}",
        executable.display(),
        output.status,
        stderr.trim()
    )))
}

/// Classify a failure to spawn the browser process.
fn spawn_error(executable: &Path, err: io::Error) -> ExportError {
    const ENOEXEC: i32 = 8;
    const EBADARCH: i32 = 86;

    if err.kind() == io::ErrorKind::NotFound {
        return ExportError::EngineUnavailable(EngineFailure::NotInstalled);
    }
    match err.raw_os_error() {
        Some(ENOEXEC) | Some(EBADARCH) => {
            ExportError::EngineUnavailable(EngineFailure::ArchitectureMismatch {
                executable: executable.to_path_buf(),
            })
        }
        _ => ExportError::Conversion(format!(
            "cannot start browser at {}: {}",
            executable.display(),
            err
        )),
    }
}

fn looks_like_arch_mismatch(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    ["exec format error", "cannot execute binary file", "bad cpu type"]
        .iter()
        .any(|needle| lower.contains(needle))
}

fn search_path(path_var: Option<OsString>) -> Option<PathBuf> {
    let path_var = path_var?;
    std::env::split_paths(&path_var).find_map(|dir| {
        EXECUTABLE_NAMES.iter().find_map(|name| {
            let candidate = dir.join(name).with_extension(std::env::consts::EXE_EXTENSION);
            candidate.is_file().then_some(candidate)
        })
    })
}

fn well_known_paths() -> Vec<PathBuf> {
    if cfg!(target_os = "macos") {
        vec![
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
            PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
        ]
    } else if cfg!(windows) {
        vec![
            PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
            PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
        ]
    } else {
        vec![
            PathBuf::from("/usr/bin/chromium"),
            PathBuf::from("/usr/bin/chromium-browser"),
            PathBuf::from("/snap/bin/chromium"),
        ]
    }
}

/// One launched browser with its scratch profile directory.
struct ChromiumSession {
    executable: PathBuf,
    profile: TempDir,
}

impl ChromiumSession {
    fn args(&self, viewport: Viewport, screenshot: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "--headless=new",
            "--disable-gpu",
            "--no-sandbox",
            "--disable-setuid-sandbox",
            "--hide-scrollbars",
            "--no-first-run",
            "--force-device-scale-factor=1",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        args.push(flag("--user-data-dir=", self.profile.path()));
        args.push(format!("--window-size={},{}", viewport.width, viewport.height).into());
        args.push(format!("--virtual-time-budget={}", SETTLE_BUDGET_MS).into());
        args.push(flag("--screenshot=", screenshot));
        args
    }
}

impl EngineSession for ChromiumSession {
    fn screenshot(&mut self, html: &str, viewport: Viewport) -> Result<Vec<u8>, ExportError> {
        let page = self.profile.path().join("page.html");
        let shot = self.profile.path().join("screenshot.png");
        fs::write(&page, html)?;

        let child = Command::new(&self.executable)
            .args(self.args(viewport, &shot))
            .arg(file_url(&page))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error(&self.executable, e))?;
        let status = ChildGuard::new(child).wait()?;
        if !status.success() {
            return Err(ExportError::Conversion(format!(
                "browser exited with {} while rendering",
                status
            )));
        }
        fs::read(&shot).map_err(|e| {
            ExportError::Conversion(format!("browser produced no screenshot: {}", e))
        })
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        tracing::debug!(profile = %self.profile.path().display(), "releasing browser session");
    }
}

/// Kills the child process unless it has been waited for.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn wait(mut self) -> io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
            tracing::debug!(pid = self.child.id(), "killed browser process");
        }
    }
}

fn flag(name: &str, path: &Path) -> OsString {
    let mut s = OsString::from(name);
    s.push(path.as_os_str());
    s
}

fn file_url(path: &Path) -> String {
    let mut s = path.to_string_lossy().replace('\\', "/");
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    let mut url = String::from("file://");
    for c in s.chars() {
        match c {
            ' ' => url.push_str("%20"),
            '#' => url.push_str("%23"),
            '%' => url.push_str("%25"),
            '?' => url.push_str("%3F"),
            other => url.push(other),
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_is_not_installed() {
        let engine = Chromium::new(Some(PathBuf::from("/nonexistent/treex/chromium")));
        let err = match engine.launch() {
            Err(e) => e,
            Ok(_) => panic!("launch should fail"),
        };
        assert!(matches!(
            err,
            ExportError::EngineUnavailable(EngineFailure::NotInstalled)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn foreign_binary_is_architecture_mismatch() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let exe = dir.path().join("chromium");
        fs::write(&exe, [0x7f, b'E', b'L', b'F', 0xff, 0xff, 0xff, 0xff]).unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

        let err = match Chromium::new(Some(exe.clone())).launch() {
            Err(e) => e,
            Ok(_) => panic!("launch should fail"),
        };
        assert!(
            matches!(
                &err,
                ExportError::EngineUnavailable(EngineFailure::ArchitectureMismatch { executable })
                    if executable == &exe
            ),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn arch_mismatch_messages_are_recognized() {
        assert!(looks_like_arch_mismatch("bash: ./chrome: cannot execute binary file"));
        assert!(looks_like_arch_mismatch("Bad CPU type in executable"));
        assert!(!looks_like_arch_mismatch("segmentation fault"));
    }

    #[test]
    fn search_path_finds_known_names() {
        let dir = TempDir::new().unwrap();
        let exe = dir
            .path()
            .join("chromium")
            .with_extension(std::env::consts::EXE_EXTENSION);
        fs::write(&exe, "").unwrap();
        let found = search_path(Some(dir.path().as_os_str().to_owned()));
        assert_eq!(found, Some(exe));
        assert_eq!(search_path(None), None);
    }

    #[test]
    fn file_urls_are_escaped() {
        assert_eq!(
            file_url(Path::new("/tmp/my dir/page.html")),
            "file:///tmp/my%20dir/page.html"
        );
    }

    #[cfg(unix)]
    #[test]
    fn guard_kills_unwaited_child() {
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id();
        drop(ChildGuard::new(child));
        // SAFETY: signal 0 only checks for existence of the reaped pid.
        let alive = unsafe { libc::kill(pid as libc::pid_t, 0) } == 0;
        assert!(!alive);
    }
}
