//! Platform strategy
//!
//! This module handles:
//! - Operating-system families the distribution ships installers for
//! - The per-family way of running the installer, activating the environment
//!   and invoking `pip`/`conda` (via [`PlatformStrategy`])
//!
//! The family is resolved once from the host; everything downstream asks the
//! strategy instead of branching on OS names.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::process::CommandSpec;

pub mod unix;
pub mod windows;


pub use unix::UnixPlatform;
pub use windows::WindowsPlatform;

/// Operating-system family with a published installer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OsFamily {
    #[serde(rename = "MacOSX")]
    MacOsx,
    Linux,
    Windows,
}

impl OsFamily {
    /// All supported families, in display order
    #[allow(dead_code)]
    pub const ALL: [OsFamily; 3] = [OsFamily::MacOsx, OsFamily::Linux, OsFamily::Windows];

    /// Name used in installer file names (`MacOSX`, `Linux`, `Windows`)
    pub fn as_str(self) -> &'static str {
        match self {
            OsFamily::MacOsx => "MacOSX",
            OsFamily::Linux => "Linux",
            OsFamily::Windows => "Windows",
        }
    }

    /// Normalize a host OS name (`uname -s` or Rust's `std::env::consts::OS`)
    pub fn from_system(system: &str) -> Option<Self> {
        match system.to_ascii_lowercase().as_str() {
            "darwin" | "macos" | "macosx" => Some(OsFamily::MacOsx),
            "linux" => Some(OsFamily::Linux),
            "windows" => Some(OsFamily::Windows),
            _ => None,
        }
    }

    /// The strategy implementing this family's capabilities
    pub fn strategy(self) -> &'static dyn PlatformStrategy {
        static UNIX: UnixPlatform = UnixPlatform;
        static WINDOWS: WindowsPlatform = WindowsPlatform;

        match self {
            OsFamily::MacOsx | OsFamily::Linux => &UNIX,
            OsFamily::Windows => &WINDOWS,
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A script the installer needs written to disk before it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperScript {
    pub path: PathBuf,
    pub contents: String,
}

/// How to run the downloaded installer unattended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerInvocation {
    pub command: CommandSpec,
    /// Written before `command` runs and removed afterwards
    pub helper_script: Option<HelperScript>,
}

/// Capabilities that differ between operating-system families
pub trait PlatformStrategy: Send + Sync {
    /// Installer file extension without the dot
    fn installer_extension(&self) -> &'static str;

    /// Files whose presence means a working installation exists at `dest`
    fn installed_markers(&self, dest: &Path) -> Vec<PathBuf>;

    /// Silent installation of `blob` into `dest`; helper files go to `script_dir`
    fn installer_invocation(&self, blob: &Path, dest: &Path, script_dir: &Path)
    -> InstallerInvocation;

    /// Shell command a user runs to start using the environment
    fn activation_command(&self, dest: &Path) -> String;

    /// `pip` of the environment at `dest` with the given arguments
    fn pip_command(&self, dest: &Path, args: &[String]) -> CommandSpec;

    /// `conda` of the environment at `dest` with the given arguments
    fn conda_command(&self, dest: &Path, args: &[String]) -> CommandSpec;

    /// Whether a working installation exists at `dest`
    fn is_installed(&self, dest: &Path) -> bool {
        self.installed_markers(dest).iter().any(|p| p.exists())
    }
}
