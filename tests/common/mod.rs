//! Common test utilities for mcinstall integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Installer name for the host every test pretends to be
pub const BLOB_NAME: &str = "Miniconda3-latest-Linux-x86_64.sh";

/// Nothing listens on the discard port, so downloads fail fast instead of
/// reaching the real mirror
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:9/";

/// A scratch area holding destination, download cache and log
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    pub fn dest(&self) -> PathBuf {
        self.path.join("miniconda")
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.path.join("downloads")
    }

    pub fn log_path(&self) -> PathBuf {
        self.path.join("mcinstall.log")
    }

    pub fn read_log(&self) -> String {
        std::fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    /// Put an installer into the download cache
    pub fn seed_installer(&self) -> PathBuf {
        let downloads = self.downloads_dir();
        std::fs::create_dir_all(&downloads).expect("Failed to create downloads directory");
        let blob = downloads.join(BLOB_NAME);
        std::fs::write(&blob, "#!/bin/bash\nexit 0\n").expect("Failed to write installer");
        blob
    }

    /// Make the destination look like a finished installation
    pub fn fake_installation(&self) {
        let bin = self.dest().join("bin");
        std::fs::create_dir_all(&bin).expect("Failed to create bin directory");
        std::fs::write(bin.join("conda"), "").expect("Failed to write conda marker");
    }

    /// Install an executable shell script as `bin/<name>` in the destination
    #[cfg(unix)]
    pub fn write_tool(&self, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.dest().join("bin");
        std::fs::create_dir_all(&bin).expect("Failed to create bin directory");
        let tool = bin.join(name);
        std::fs::write(&tool, script).expect("Failed to write tool");
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make tool executable");
        tool
    }

    /// `mcinstall` pinned to a Linux x86_64 host and to this workspace's paths
    pub fn mcinstall_cmd(&self) -> Command {
        let mut cmd = mcinstall_cmd();
        cmd.current_dir(&self.path)
            .env("MCINSTALL_SYSTEM", "Linux")
            .env("MCINSTALL_MACHINE", "x86_64")
            .env("MCINSTALL_DOWNLOADS_DIR", self.downloads_dir())
            .env("MCINSTALL_LOG_PATH", self.log_path())
            .env("MCINSTALL_BASE_URL", UNREACHABLE_BASE_URL)
            .env_remove("MCINSTALL_VERSION")
            .env_remove("MCINSTALL_LOG");
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn mcinstall_cmd() -> Command {
    Command::cargo_bin("mcinstall").expect("mcinstall binary should be built")
}
