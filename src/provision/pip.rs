//! `pip` installs into the destination environment

use crate::error::Result;
use crate::installer::InstallerSession;
use crate::process::CommandRunner;

use super::{DependencyRequest, PipOptions};

impl InstallerSession<'_> {
    /// Pip-install named packages one by one, then the manifest if given
    pub fn install_pip(
        &self,
        runner: &dyn CommandRunner,
        request: &DependencyRequest,
        options: &PipOptions,
    ) -> Result<()> {
        self.require_installed()?;
        let index_args = options.index_args();

        for package in &request.packages {
            let mut args = vec!["install".to_string()];
            args.extend(index_args.iter().cloned());
            args.push(package.clone());

            let command = self.platform().pip_command(self.dest_path(), &args);
            self.run_step(runner, &command)?;
        }

        if let Some(manifest) = &request.manifest {
            let mut args = vec!["install".to_string()];
            args.extend(index_args.iter().cloned());
            args.push("-r".to_string());
            args.push(manifest.display().to_string());

            let command = self.platform().pip_command(self.dest_path(), &args);
            self.run_step(runner, &command)?;
        }

        Ok(())
    }
}
