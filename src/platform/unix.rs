//! macOS and Linux: shell-script installer, `bin/` layout

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::process::CommandSpec;

use super::{InstallerInvocation, PlatformStrategy};

#[derive(Debug, Default, Clone, Copy)]
pub struct UnixPlatform;

impl PlatformStrategy for UnixPlatform {
    fn installer_extension(&self) -> &'static str {
        "sh"
    }

    fn installed_markers(&self, dest: &Path) -> Vec<PathBuf> {
        vec![dest.join("bin").join("conda")]
    }

    fn installer_invocation(
        &self,
        blob: &Path,
        dest: &Path,
        _script_dir: &Path,
    ) -> InstallerInvocation {
        // -b batch mode, -f allow an existing (empty) prefix, -p prefix
        let command = CommandSpec::new(
            "bash",
            [
                blob.as_os_str(),
                OsStr::new("-b"),
                OsStr::new("-f"),
                OsStr::new("-p"),
                dest.as_os_str(),
            ],
        );

        InstallerInvocation {
            command,
            helper_script: None,
        }
    }

    fn activation_command(&self, dest: &Path) -> String {
        format!("source {}", dest.join("bin").join("activate").display())
    }

    fn pip_command(&self, dest: &Path, args: &[String]) -> CommandSpec {
        CommandSpec::new(dest.join("bin").join("pip"), args)
    }

    fn conda_command(&self, dest: &Path, args: &[String]) -> CommandSpec {
        CommandSpec::new(dest.join("bin").join("conda"), args)
    }
}
