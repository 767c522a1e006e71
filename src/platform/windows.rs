//! Windows: GUI installer run silently through a batch file, `condabin\` layout
//!
//! Paths are rendered with backslashes by hand so the commands read the same
//! no matter which host builds them.

use std::path::{Path, PathBuf};

use crate::process::CommandSpec;

use super::{HelperScript, InstallerInvocation, PlatformStrategy};

/// Name of the transient batch file wrapping `start /wait`
pub const HELPER_SCRIPT_NAME: &str = "mcinstall_setup.bat";

#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsPlatform;

fn condabin(dest: &Path, entry: &str) -> String {
    format!("{}\\condabin\\{entry}", dest.display())
}

impl PlatformStrategy for WindowsPlatform {
    fn installer_extension(&self) -> &'static str {
        "exe"
    }

    fn installed_markers(&self, dest: &Path) -> Vec<PathBuf> {
        vec![dest.join("condabin").join("conda.bat")]
    }

    fn installer_invocation(
        &self,
        blob: &Path,
        dest: &Path,
        script_dir: &Path,
    ) -> InstallerInvocation {
        let line = format!(
            "start /wait \"\" {} /InstallationType=JustMe /RegisterPython=0 /S /D={}",
            blob.display(),
            dest.display()
        );
        let script_path = script_dir.join(HELPER_SCRIPT_NAME);

        let mut command = CommandSpec::cmd_shell([script_path.as_os_str()]);
        command.display.clone_from(&line);

        InstallerInvocation {
            command,
            helper_script: Some(HelperScript {
                path: script_path,
                contents: line,
            }),
        }
    }

    fn activation_command(&self, dest: &Path) -> String {
        condabin(dest, "activate")
    }

    fn pip_command(&self, dest: &Path, args: &[String]) -> CommandSpec {
        let mut parts = vec![condabin(dest, "activate"), "&&".to_string(), "pip".to_string()];
        parts.extend(args.iter().cloned());
        CommandSpec::cmd_shell(parts)
    }

    fn conda_command(&self, dest: &Path, args: &[String]) -> CommandSpec {
        let mut parts = vec![condabin(dest, "conda.bat")];
        parts.extend(args.iter().cloned());
        CommandSpec::cmd_shell(parts)
    }
}
