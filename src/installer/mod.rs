//! Installer session for one provisioning run
//!
//! This module handles:
//! - Preparing the destination and the shared download cache (via `fetch`)
//! - Downloading the installer blob once per file name (via `fetch`)
//! - Running the unattended installer and tracking its outcome (via `runner`)
//!
//! A session moves through [`InstallState`]:
//! `NotInstalled -> Installing -> Installed | Failed`, or straight to
//! `Installed` when a previous run already left a working installation.
//! Neither terminal state is left again within the session.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use console::Style;

use crate::audit::AuditLog;
use crate::config::{Config, paths};
use crate::error::{ProvisionError, Result};
use crate::platform::PlatformStrategy;
use crate::process::CommandOutput;

pub mod fetch;
pub mod runner;


pub use fetch::{Downloader, HttpDownloader, HttpResponse};

/// Lifecycle of the installation within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    NotInstalled,
    Installing,
    Installed,
    Failed,
}

/// One provisioning run against a destination directory
pub struct InstallerSession<'a> {
    config: &'a Config,
    platform: &'static dyn PlatformStrategy,
    /// Absolute, `~`-expanded destination
    dest_path: PathBuf,
    /// Where transient helper scripts are written (the current directory)
    script_dir: PathBuf,
    verbose: bool,
    state: InstallState,
    log: AuditLog,
}

impl<'a> InstallerSession<'a> {
    /// Create a session installing into `dest`
    ///
    /// Nothing is created on disk until [`ensure_directories`](Self::ensure_directories).
    pub fn new(dest: impl AsRef<Path>, config: &'a Config, verbose: bool) -> Result<Self> {
        let dest_path = paths::resolve_path(dest.as_ref());

        if dest_path == config.downloads_dir {
            return Err(ProvisionError::DestinationIsCache {
                path: dest_path.display().to_string(),
            });
        }

        let script_dir = std::env::current_dir()?;

        Ok(Self {
            config,
            platform: config.platform(),
            dest_path,
            script_dir,
            verbose,
            state: InstallState::NotInstalled,
            log: AuditLog::new(&config.log_path),
        })
    }

    /// Write helper scripts somewhere other than the current directory
    #[allow(dead_code)]
    pub fn with_script_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.script_dir = dir.into();
        self
    }

    pub fn dest_path(&self) -> &Path {
        &self.dest_path
    }

    pub(crate) fn platform(&self) -> &'static dyn PlatformStrategy {
        self.platform
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.config.downloads_dir
    }

    #[allow(dead_code)]
    pub fn state(&self) -> InstallState {
        self.state
    }

    /// True only once the install step completed (or found a prior installation)
    pub fn installed_ok(&self) -> bool {
        self.state == InstallState::Installed
    }

    /// Shell command that activates the installed environment
    pub fn activation_command(&self) -> String {
        self.platform.activation_command(&self.dest_path)
    }

    /// Hint for the user, present only for verbose sessions that installed successfully
    pub fn activation_hint(&self) -> Option<String> {
        (self.verbose && self.installed_ok()).then(|| {
            format!(
                "Run this to start using your fresh Miniconda: \"{}\".",
                self.activation_command()
            )
        })
    }

    /// Print a progress message when running verbosely
    fn note(&self, message: impl Display) {
        if self.verbose {
            println!("{} {message}", Style::new().green().bold().apply_to("==>"));
        }
    }

    /// Echo captured process output to the console, each stream to its own
    fn echo(output: &CommandOutput) {
        let stdout = output.stdout.trim_end();
        if !stdout.is_empty() {
            println!("{stdout}");
        }
        let stderr = output.stderr.trim_end();
        if !stderr.is_empty() {
            eprintln!("{stderr}");
        }
    }

    /// Fail unless the install step has succeeded
    pub(crate) fn require_installed(&self) -> Result<()> {
        if self.installed_ok() {
            Ok(())
        } else {
            Err(ProvisionError::NotInstalled {
                path: self.dest_path.display().to_string(),
            })
        }
    }
}
