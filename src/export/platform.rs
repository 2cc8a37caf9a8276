//! Operating-system gate for image formats.

use crate::error::ExportError;

/// Refuses image conversion on configured operating systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformGate {
    platform: String,
    disabled: Vec<String>,
}

impl PlatformGate {
    /// Gate for the running OS.
    pub fn current(disabled: &[String]) -> Self {
        Self::for_platform(std::env::consts::OS, disabled)
    }

    pub fn for_platform(platform: &str, disabled: &[String]) -> Self {
        Self {
            platform: platform.to_string(),
            disabled: disabled.to_vec(),
        }
    }

    /// Gate that never refuses.
    pub fn open() -> Self {
        Self::for_platform(std::env::consts::OS, &[])
    }

    pub fn is_supported(&self) -> bool {
        !self.disabled.iter().any(|p| p.eq_ignore_ascii_case(&self.platform))
    }

    pub fn check(&self) -> Result<(), ExportError> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(ExportError::UnsupportedPlatform {
                platform: self.platform.clone(),
            })
        }
    }
}
