//! Platform model: default tool locations and archiver syntax as data.

use std::path::{Path, PathBuf};

/// The platforms the build wrapper runs on, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// The platform this process is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
        }
    }

    /// Default SCons install directory, used when `SCONS_LOCATION` is unset.
    pub fn scons_default_dir(&self) -> &'static str {
        match self {
            Platform::Windows => r"C:\Python27\Scripts",
            Platform::MacOs => "/usr/local/bin",
            Platform::Linux => "/usr/bin",
        }
    }

    /// Full path to the SCons executable under an install directory.
    pub fn scons_program(&self, dir: &Path) -> PathBuf {
        match self {
            Platform::Windows => dir.join("scons.bat"),
            Platform::MacOs | Platform::Linux => dir.join("scons"),
        }
    }

    /// File name of the addon's shared library artifact.
    pub fn shared_library(&self) -> &'static str {
        match self {
            Platform::Windows => "libsessioncontrol.dll",
            Platform::MacOs => "libsessioncontrol.dylib",
            Platform::Linux => "libsessioncontrol.so",
        }
    }

    /// Whether packaging on this platform needs an externally located
    /// archiver (7-Zip via `ZIP_LOCATION`). Elsewhere `zip` is on PATH.
    pub fn requires_archiver_location(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}
