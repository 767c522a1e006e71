//! `conda` installs and environment creation

use crate::error::Result;
use crate::installer::InstallerSession;
use crate::process::CommandRunner;

use super::CondaRequest;

impl InstallerSession<'_> {
    /// Conda-install named packages, then the manifest, then create the environment
    pub fn install_conda(&self, runner: &dyn CommandRunner, request: &CondaRequest) -> Result<()> {
        self.require_installed()?;
        let conda = |args: &[&str]| {
            let args: Vec<String> = args.iter().map(ToString::to_string).collect();
            self.platform().conda_command(self.dest_path(), &args)
        };

        for package in &request.dependencies.packages {
            let command = conda(&["install", "-y", "-c", request.channel.as_str(), package.as_str()]);
            self.run_step(runner, &command)?;
        }

        if let Some(manifest) = &request.dependencies.manifest {
            let manifest = manifest.display().to_string();
            self.run_step(runner, &conda(&["install", "-y", "--file", &manifest]))?;
        }

        if let Some(environment) = &request.environment {
            let environment = environment.display().to_string();
            self.run_step(runner, &conda(&["env", "create", "--file", &environment]))?;
        }

        Ok(())
    }
}
