//! Plain-text audit log of every shell-level command the workflow performs
//!
//! One command per line, appended, so a run can be replayed or diagnosed by hand.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ProvisionError, Result};

#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `command` as one line
    pub fn record(&self, command: &str) -> Result<()> {
        let write_failed = |e: std::io::Error| ProvisionError::LogWriteFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(write_failed)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_failed)?;
        writeln!(file, "{command}").map_err(write_failed)?;

        tracing::debug!(log = %self.path.display(), %command, "recorded command");
        Ok(())
    }

    /// Append captured process output, skipping empty streams
    pub fn record_output(&self, output: &str) -> Result<()> {
        let trimmed = output.trim_end();
        if trimmed.is_empty() {
            return Ok(());
        }
        self.record(trimmed)
    }
}
