//! Read and write access probes used for entry annotations.

use std::path::Path;

/// Answers whether the current process may read or write a path.
///
/// The walker consults this instead of calling the OS directly so tests can
/// simulate locked and unreadable entries regardless of the effective user.
pub trait AccessProbe {
    fn can_read(&self, path: &Path) -> bool;
    fn can_write(&self, path: &Path) -> bool;
}

/// Probe backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAccess;

#[cfg(unix)]
impl AccessProbe for FsAccess {
    fn can_read(&self, path: &Path) -> bool {
        access(path, libc::R_OK)
    }

    fn can_write(&self, path: &Path) -> bool {
        access(path, libc::W_OK)
    }
}

#[cfg(unix)]
fn access(path: &Path, mode: libc::c_int) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string that outlives the call.
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}

#[cfg(not(unix))]
impl AccessProbe for FsAccess {
    fn can_read(&self, path: &Path) -> bool {
        if path.is_dir() {
            std::fs::read_dir(path).is_ok()
        } else {
            std::fs::File::open(path).is_ok()
        }
    }

    fn can_write(&self, path: &Path) -> bool {
        std::fs::metadata(path)
            .map(|m| !m.permissions().readonly())
            .unwrap_or(false)
    }
}
