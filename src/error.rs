//! Error types and handling for mcinstall
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for provisioning operations
#[derive(Error, Diagnostic, Debug)]
pub enum ProvisionError {
    // Configuration errors
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(mcinstall::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Destination {path} must not be the downloads directory")]
    #[diagnostic(
        code(mcinstall::config::destination_is_cache),
        help("Choose a destination outside the shared downloads directory")
    )]
    DestinationIsCache { path: String },

    // Download errors
    #[error("Cannot download {url} ({reason}). Verify URL components!")]
    #[diagnostic(
        code(mcinstall::fetch::download_failed),
        help("Check the base URL, distribution version and your network connection")
    )]
    DownloadFailed { url: String, reason: String },

    // Installer errors
    #[error("Installation failed: `{command}` exited with {code}")]
    #[diagnostic(
        code(mcinstall::install::failed),
        help("The installer output was appended to the log file")
    )]
    InstallationFailed { command: String, code: String },

    #[error("No working installation at {path}")]
    #[diagnostic(
        code(mcinstall::install::not_installed),
        help("Run the installer step before provisioning packages")
    )]
    NotInstalled { path: String },

    #[error("Installation at {path} already failed in this session")]
    #[diagnostic(code(mcinstall::install::session_failed))]
    SessionFailed { path: String },

    // External process errors
    #[error("Command `{command}` exited with {code}{}", stderr_suffix(.stderr))]
    #[diagnostic(code(mcinstall::process::command_failed))]
    CommandFailed {
        command: String,
        code: String,
        stderr: String,
    },

    #[error("Failed to spawn `{command}`: {reason}")]
    #[diagnostic(code(mcinstall::process::spawn_failed))]
    SpawnFailed { command: String, reason: String },

    // File system errors
    #[error("Failed to create directory: {path}")]
    #[diagnostic(code(mcinstall::fs::create_dir_failed))]
    CreateDirFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(mcinstall::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to write log file: {path}")]
    #[diagnostic(code(mcinstall::audit::write_failed))]
    LogWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(mcinstall::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for ProvisionError {
    fn from(err: std::io::Error) -> Self {
        ProvisionError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ProvisionError {
    fn from(err: serde_json::Error) -> Self {
        ProvisionError::ConfigInvalid {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ProvisionError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        ProvisionError::DownloadFailed {
            url,
            reason: err.to_string(),
        }
    }
}

/// Last stderr line of a failed command, for the one-line error message
fn stderr_suffix(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or_else(String::new, |line| format!(": {line}"))
}

/// Render an exit code the way a shell would report it
pub fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ProvisionError>;
