//! Unattended installer execution

use std::fs;
use std::path::PathBuf;

use crate::error::{ProvisionError, Result, describe_exit};
use crate::platform::HelperScript;
use crate::process::{CommandOutput, CommandRunner, CommandSpec};

use super::{InstallState, InstallerSession};

/// Helper script on disk for as long as the guard lives
struct ScriptGuard {
    path: PathBuf,
}

impl ScriptGuard {
    fn write(script: &HelperScript) -> Result<Self> {
        fs::write(&script.path, &script.contents).map_err(|e| ProvisionError::FileWriteFailed {
            path: script.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path: script.path.clone(),
        })
    }
}

impl Drop for ScriptGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not remove helper script");
        }
    }
}

fn spawn_failed(command: &CommandSpec, e: &std::io::Error) -> ProvisionError {
    ProvisionError::SpawnFailed {
        command: command.display.clone(),
        reason: e.to_string(),
    }
}

impl InstallerSession<'_> {
    /// Install the distribution into the destination unless it is already there
    ///
    /// A non-zero installer exit leaves the session `Failed`; later calls
    /// return an error without running anything.
    pub fn install(&mut self, runner: &dyn CommandRunner) -> Result<()> {
        match self.state {
            InstallState::Installed => return Ok(()),
            InstallState::Failed => {
                return Err(ProvisionError::SessionFailed {
                    path: self.dest_path.display().to_string(),
                });
            }
            InstallState::NotInstalled | InstallState::Installing => {}
        }

        if self.platform.is_installed(&self.dest_path) {
            tracing::debug!(dest = %self.dest_path.display(), "existing installation found");
        } else {
            self.state = InstallState::Installing;
            if let Err(e) = self.run_installer(runner) {
                self.state = InstallState::Failed;
                return Err(e);
            }
        }

        self.log.record(&self.activation_command())?;
        self.state = InstallState::Installed;
        Ok(())
    }

    fn run_installer(&self, runner: &dyn CommandRunner) -> Result<()> {
        let blob = self.config.blob_path();
        let invocation =
            self.platform
                .installer_invocation(&blob, &self.dest_path, &self.script_dir);
        let command = &invocation.command;

        let _script = invocation
            .helper_script
            .as_ref()
            .map(ScriptGuard::write)
            .transpose()?;

        self.note(format!("Running command: {command}"));
        let output = runner.run(command).map_err(|e| spawn_failed(command, &e))?;
        self.log.record(&command.display)?;
        Self::echo(&output);

        if !output.success() {
            self.log.record_output(&output.stdout)?;
            self.log.record_output(&output.stderr)?;
            return Err(ProvisionError::InstallationFailed {
                command: command.display.clone(),
                code: describe_exit(output.code),
            });
        }

        Ok(())
    }

    /// Update `conda` in the base environment of the fresh installation
    pub fn update_base(&self, runner: &dyn CommandRunner) -> Result<()> {
        self.require_installed()?;
        let args = ["update", "-y", "-n", "base", "conda"].map(String::from);
        let command = self.platform.conda_command(&self.dest_path, &args);
        self.run_step(runner, &command).map(|_| ())
    }

    /// Run one package-manager step: log it, run it, echo its output
    ///
    /// A non-zero exit appends stderr to the log and is reported with the
    /// process's own exit code and stderr.
    pub(crate) fn run_step(
        &self,
        runner: &dyn CommandRunner,
        command: &CommandSpec,
    ) -> Result<CommandOutput> {
        self.log.record(&command.display)?;
        self.note(format!("Running command: {command}"));

        let output = runner.run(command).map_err(|e| spawn_failed(command, &e))?;
        Self::echo(&output);

        if !output.success() {
            self.log.record_output(&output.stderr)?;
            return Err(ProvisionError::CommandFailed {
                command: command.display.clone(),
                code: describe_exit(output.code),
                stderr: output.stderr,
            });
        }

        Ok(output)
    }
}
