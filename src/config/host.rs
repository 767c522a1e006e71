//! Host identification
//!
//! Produces the operating-system and machine names the installer archives are
//! published under, which differ from Rust's `std::env::consts` spelling.

use std::env;

/// Environment variable replacing the detected operating-system name
pub const SYSTEM_ENV: &str = "MCINSTALL_SYSTEM";

/// Environment variable replacing the detected machine architecture
pub const MACHINE_ENV: &str = "MCINSTALL_MACHINE";

/// Raw host identifiers, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// Operating-system name as `uname -s` reports it (e.g. `Darwin`, `Linux`)
    pub system: String,
    /// Machine architecture as `uname -m` reports it (e.g. `x86_64`, `arm64`)
    pub machine: String,
}

impl HostInfo {
    pub fn new(system: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            machine: machine.into(),
        }
    }

    /// Detect the running host, honoring `MCINSTALL_SYSTEM` and `MCINSTALL_MACHINE`
    pub fn current() -> Self {
        let detected = Self::from_consts(env::consts::OS, env::consts::ARCH);

        let system = env::var(SYSTEM_ENV).unwrap_or(detected.system);
        let machine = env::var(MACHINE_ENV).unwrap_or(detected.machine);

        Self { system, machine }
    }

    /// Translate Rust target names into `uname` names
    pub fn from_consts(os: &str, arch: &str) -> Self {
        let system = match os {
            "macos" => "Darwin",
            "linux" => "Linux",
            "windows" => "Windows",
            other => other,
        };

        let machine = match (os, arch) {
            ("macos", "aarch64") => "arm64",
            (_, "arm") => "armv7l",
            (_, "powerpc64") => "ppc64le",
            (_, arch) => arch,
        };

        Self::new(system, machine)
    }
}
