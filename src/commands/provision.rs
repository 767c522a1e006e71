//! Provision command implementation
//!
//! The provisioning run:
//! 1. Create the destination and download directories
//! 2. Download the installer unless it is cached
//! 3. Install unattended unless an installation already exists
//! 4. Optionally update conda in the base environment
//! 5. Install pip packages, then conda packages
//! 6. Print the activation hint (verbose runs that installed successfully)

use console::Style;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{ProvisionError, Result};
use crate::installer::{Downloader, HttpDownloader, InstallerSession};
use crate::process::{CommandRunner, SystemRunner};

/// Run the full workflow for the parsed command line
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let dest = cli
        .path
        .as_ref()
        .ok_or_else(|| ProvisionError::ConfigInvalid {
            message: "missing destination directory".to_string(),
        })?;

    let downloader = HttpDownloader::new(true)?;
    let mut session = InstallerSession::new(dest, config, cli.verbose)?;

    let result = provision(&mut session, cli, &downloader, &SystemRunner);

    // Printed after every stage has had its turn, even when a package step failed
    if let Some(hint) = session.activation_hint() {
        println!("{}", Style::new().bold().apply_to(hint));
    }

    result
}

fn provision(
    session: &mut InstallerSession<'_>,
    cli: &Cli,
    downloader: &dyn Downloader,
    runner: &dyn CommandRunner,
) -> Result<()> {
    session.ensure_directories()?;
    session.fetch_installer(downloader)?;
    session.install(runner)?;

    if cli.update_base {
        session.update_base(runner)?;
    }

    let pip = cli.pip_request();
    if !pip.is_empty() {
        session.install_pip(runner, &pip, &cli.pip_options())?;
    }

    let conda = cli.conda_request();
    if !conda.is_empty() {
        session.install_conda(runner, &conda)?;
    }

    tracing::debug!(dest = %session.dest_path().display(), "provisioning finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;
    use crate::config::{ConfigOverrides, HostInfo};
    use crate::installer::HttpResponse;
    use crate::process::testing::RecordingRunner;

    struct FixedDownloader;

    impl Downloader for FixedDownloader {
        fn get(&self, _url: &str) -> Result<HttpResponse> {
            Ok(HttpResponse {
                status: 200,
                body: b"installer".to_vec(),
            })
        }
    }

    fn config(temp: &TempDir) -> Config {
        let overrides = ConfigOverrides {
            downloads_dir: Some(temp.path().join("downloads")),
            log_path: Some(temp.path().join("mcinstall.log")),
            ..ConfigOverrides::default()
        };
        Config::resolve(&HostInfo::new("Linux", "x86_64"), &overrides).unwrap()
    }

    #[test]
    fn test_provision_runs_stages_in_order() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp);
        let dest = temp.path().join("mc");
        let cli = Cli::try_parse_from([
            "mcinstall",
            dest.to_str().unwrap(),
            "--update-base",
            "--pip-dependencies",
            "pkgA,pkgB",
            "--pip-dependencies-path",
            "requirements.txt",
            "--conda-dependencies",
            "pyyaml",
        ])
        .unwrap();
        let mut session = InstallerSession::new(&dest, &config, false).unwrap();
        let runner = RecordingRunner::default();

        provision(&mut session, &cli, &FixedDownloader, &runner).unwrap();

        let calls = runner.displays();
        let d = dest.display();
        assert_eq!(
            calls,
            vec![
                format!("bash {} -b -f -p {d}", config.blob_path().display()),
                format!("{d}/bin/conda update -y -n base conda"),
                format!("{d}/bin/pip install pkgA"),
                format!("{d}/bin/pip install pkgB"),
                format!("{d}/bin/pip install -r requirements.txt"),
                format!("{d}/bin/conda install -y -c conda-forge pyyaml"),
            ]
        );
        assert!(session.installed_ok());
        assert!(config.blob_path().exists());
    }

    #[test]
    fn test_provision_stops_after_failed_install() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp);
        let dest = temp.path().join("mc");
        let cli = Cli::try_parse_from([
            "mcinstall",
            dest.to_str().unwrap(),
            "--pip-dependencies",
            "pkgA",
        ])
        .unwrap();
        let mut session = InstallerSession::new(&dest, &config, true).unwrap();
        let runner = RecordingRunner::with_exit_codes(&[1]);

        let result = provision(&mut session, &cli, &FixedDownloader, &runner);

        assert!(matches!(
            result,
            Err(ProvisionError::InstallationFailed { .. })
        ));
        assert_eq!(runner.calls.borrow().len(), 1);
        assert_eq!(session.activation_hint(), None);
        assert!(dest.is_dir());
        let log = fs::read_to_string(&config.log_path).unwrap();
        assert!(log.starts_with("wget "));
    }
}
