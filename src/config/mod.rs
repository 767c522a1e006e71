//! Resolved provisioning configuration
//!
//! This module contains:
//! - [`HostInfo`] - raw operating-system and machine names of the host
//! - [`ConfigOverrides`] - user-supplied replacements for the defaults
//! - [`Config`] - the immutable record every other component reads
//!
//! The configuration is computed once at startup and passed by reference.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::platform::{OsFamily, PlatformStrategy};

pub mod host;
pub mod paths;

pub use host::HostInfo;

/// Where Miniconda installers are published
pub const DEFAULT_BASE_URL: &str = "https://repo.continuum.io/miniconda/";

/// Distribution installed by default
pub const DEFAULT_DISTRIBUTION: &str = "Miniconda3";

/// Version token used in installer file names
pub const DEFAULT_VERSION: &str = "latest";

/// Shared cache for downloaded installers
pub const DEFAULT_DOWNLOADS_DIR: &str = "~/Downloads";

/// Audit log of executed commands
pub const DEFAULT_LOG_PATH: &str = "./mcinstall.log";

/// Release hosting the 32-bit ARM build (Berryconda)
const ARM_BASE_URL: &str = "https://github.com/jjhelmus/berryconda/releases/download/v2.0.0/";
const ARM_DISTRIBUTION: &str = "Berryconda3";
const ARM_VERSION: &str = "2.0.0";

/// The host runs an operating system without a published installer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedPlatform {
    pub system: String,
}

impl fmt::Display for UnsupportedPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Don't know how to handle operating system '{}'. Want to provide a patch?",
            self.system
        )
    }
}

impl std::error::Error for UnsupportedPlatform {}

impl UnsupportedPlatform {
    /// Family of `host`, or the error when no installer is published for it
    pub fn check(host: &HostInfo) -> Result<OsFamily, Self> {
        OsFamily::from_system(&host.system).ok_or_else(|| Self {
            system: host.system.clone(),
        })
    }
}

/// User-supplied replacements for the built-in defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub version: Option<String>,
    pub downloads_dir: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

/// Immutable provisioning configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Base URL the installer file name is appended to
    pub base_url: String,
    /// Distribution name, e.g. `Miniconda3`
    pub distribution: String,
    /// Version token, e.g. `latest`
    pub version: String,
    /// Machine architecture used in the installer name
    pub machine: String,
    /// Operating-system family used in the installer name
    pub system: OsFamily,
    /// Shared cache for downloaded installers (absolute)
    pub downloads_dir: PathBuf,
    /// Audit log path (absolute)
    pub log_path: PathBuf,
    /// Installer file name, `<distribution>-<version>-<os>-<machine>.<ext>`
    pub blob_name: String,
}

impl Config {
    /// Resolve the configuration for `host`
    ///
    /// Fails only when the operating system has no installer; nothing is
    /// touched on disk either way.
    pub fn resolve(host: &HostInfo, overrides: &ConfigOverrides) -> Result<Self, UnsupportedPlatform> {
        let system = UnsupportedPlatform::check(host)?;

        // Only 64-bit installers are published for Windows
        let machine = if system == OsFamily::Windows {
            "x86_64".to_string()
        } else {
            host.machine.clone()
        };

        let (base_url, distribution, version) = if is_arm32(&machine) {
            (ARM_BASE_URL, ARM_DISTRIBUTION, ARM_VERSION)
        } else {
            (DEFAULT_BASE_URL, DEFAULT_DISTRIBUTION, DEFAULT_VERSION)
        };
        let base_url = overrides
            .base_url
            .clone()
            .unwrap_or_else(|| base_url.to_string());
        let version = overrides
            .version
            .clone()
            .unwrap_or_else(|| version.to_string());
        let distribution = distribution.to_string();

        let downloads_dir = paths::resolve_path(
            overrides
                .downloads_dir
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_DOWNLOADS_DIR)),
        );
        let log_path = paths::resolve_path(
            overrides
                .log_path
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_LOG_PATH)),
        );

        let blob_name = format!(
            "{distribution}-{version}-{system}-{machine}.{ext}",
            ext = system.strategy().installer_extension()
        );

        Ok(Self {
            base_url,
            distribution,
            version,
            machine,
            system,
            downloads_dir,
            log_path,
            blob_name,
        })
    }

    /// Full download URL of the installer
    pub fn installer_url(&self) -> String {
        format!("{}{}", self.base_url, self.blob_name)
    }

    /// Local path of the cached installer
    pub fn blob_path(&self) -> PathBuf {
        self.downloads_dir.join(&self.blob_name)
    }

    /// Strategy for the resolved operating-system family
    pub fn platform(&self) -> &'static dyn PlatformStrategy {
        self.system.strategy()
    }
}

/// `armv6l` and `armv7l` hosts get the Berryconda distribution
fn is_arm32(machine: &str) -> bool {
    machine.starts_with("armv6l") || machine.starts_with("armv7l")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(system: &str, machine: &str) -> Config {
        Config::resolve(&HostInfo::new(system, machine), &ConfigOverrides::default()).unwrap()
    }

    #[test]
    fn test_blob_name_linux() {
        let config = resolve("Linux", "x86_64");
        assert_eq!(config.blob_name, "Miniconda3-latest-Linux-x86_64.sh");
        assert_eq!(
            config.installer_url(),
            "https://repo.continuum.io/miniconda/Miniconda3-latest-Linux-x86_64.sh"
        );
    }

    #[test]
    fn test_blob_name_darwin_is_macosx() {
        let config = resolve("Darwin", "arm64");
        assert_eq!(config.system, OsFamily::MacOsx);
        assert_eq!(config.blob_name, "Miniconda3-latest-MacOSX-arm64.sh");
    }

    #[test]
    fn test_blob_name_windows_forces_x86_64() {
        let config = resolve("Windows", "AMD64");
        assert_eq!(config.machine, "x86_64");
        assert_eq!(config.blob_name, "Miniconda3-latest-Windows-x86_64.exe");
    }

    #[test]
    fn test_blob_name_template_for_every_family() {
        for family in OsFamily::ALL {
            let config = resolve(family.as_str(), "x86_64");
            let ext = if family == OsFamily::Windows { "exe" } else { "sh" };
            assert_eq!(
                config.blob_name,
                format!("Miniconda3-latest-{}-x86_64.{ext}", family.as_str())
            );
        }
    }

    #[test]
    fn test_arm32_switches_distribution() {
        let config = resolve("Linux", "armv7l");
        assert_eq!(config.distribution, "Berryconda3");
        assert_eq!(config.version, "2.0.0");
        assert_eq!(config.blob_name, "Berryconda3-2.0.0-Linux-armv7l.sh");
        assert!(config.installer_url().starts_with("https://github.com/jjhelmus/berryconda/"));
    }

    #[test]
    fn test_arm64_keeps_miniconda() {
        let config = resolve("Linux", "aarch64");
        assert_eq!(config.distribution, "Miniconda3");
    }

    #[test]
    fn test_unsupported_system() {
        let err = Config::resolve(&HostInfo::new("Plan9", "x86_64"), &ConfigOverrides::default())
            .unwrap_err();
        assert_eq!(err.system, "Plan9");
        assert!(err.to_string().contains("Don't know how to handle operating system 'Plan9'"));
    }

    #[test]
    fn test_check_accepts_known_systems() {
        assert_eq!(
            UnsupportedPlatform::check(&HostInfo::new("darwin", "arm64")),
            Ok(OsFamily::MacOsx)
        );
        assert_eq!(
            UnsupportedPlatform::check(&HostInfo::new("Plan9", "x86_64")),
            Err(UnsupportedPlatform {
                system: "Plan9".to_string()
            })
        );
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = ConfigOverrides {
            base_url: Some("http://mirror.local/".to_string()),
            version: Some("4.7.12".to_string()),
            downloads_dir: Some(PathBuf::from("/var/cache/mc")),
            log_path: Some(PathBuf::from("/var/log/mc.log")),
        };
        let config = Config::resolve(&HostInfo::new("Linux", "x86_64"), &overrides).unwrap();
        assert_eq!(
            config.installer_url(),
            "http://mirror.local/Miniconda3-4.7.12-Linux-x86_64.sh"
        );
        assert_eq!(
            config.blob_path(),
            PathBuf::from("/var/cache/mc/Miniconda3-4.7.12-Linux-x86_64.sh")
        );
        assert_eq!(config.log_path, PathBuf::from("/var/log/mc.log"));
    }

    #[test]
    fn test_default_paths_are_absolute() {
        let config = resolve("Linux", "x86_64");
        assert!(config.downloads_dir.is_absolute());
        assert!(config.log_path.is_absolute());
        assert!(config.log_path.ends_with("mcinstall.log"));
    }

    #[test]
    fn test_config_serializes_system_name() {
        let config = resolve("Darwin", "x86_64");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["system"], "MacOSX");
        assert_eq!(json["blob_name"], "Miniconda3-latest-MacOSX-x86_64.sh");
    }
}
