//! CLI definitions using clap derive API

use std::path::PathBuf;

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use clap_complete::Shell;

use crate::config::ConfigOverrides;
use crate::provision::{CondaRequest, DEFAULT_CHANNEL, DependencyRequest, PipOptions};

/// mcinstall - quick-install/provision a fresh Miniconda
///
/// Downloads the Miniconda installer for this host, installs it unattended and
/// optionally adds packages with pip and conda.
#[derive(Parser, Debug)]
#[command(
    name = "mcinstall",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Quick-install/provision a fresh Miniconda for MacOSX, Linux, Windows.",
    after_help = "EXAMPLES:\n  \
                  Install into a new directory:\n    mcinstall ~/mc\n\n\
                  Install and add pip packages:\n    mcinstall ~/mc --pip-dependencies geopy,requests\n\n\
                  Install from a private index:\n    mcinstall ~/mc --pip-dependencies pkg --pip-index-url https://pypi.example.com/simple/\n\n\
                  Create a conda environment:\n    mcinstall ~/mc --conda-environment-path environment.yml"
)]
pub struct Cli {
    /// The destination directory (will be created if needed)
    #[arg(
        value_name = "DEST_DIR",
        required_unless_present_any = ["show_config", "completions"]
    )]
    pub path: Option<PathBuf>,

    /// Output additional information
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Comma-separated list of pip requirements
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub pip_dependencies: Vec<String>,

    /// Path of a pip requirements file, usually named requirements.txt
    #[arg(long, value_name = "PATH")]
    pub pip_dependencies_path: Option<PathBuf>,

    /// Base URL of the Python package index pip installs from
    #[arg(long, value_name = "URL")]
    pub pip_index_url: Option<String>,

    /// Extra package index URLs (repeat the flag or separate with commas)
    #[arg(long, value_name = "URL", value_delimiter = ',')]
    pub pip_extra_index_url: Vec<String>,

    /// Channel for packages given with --conda-dependencies
    #[arg(long, value_name = "CHANNEL", default_value = DEFAULT_CHANNEL)]
    pub conda_channel: String,

    /// Comma-separated list of conda requirements
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub conda_dependencies: Vec<String>,

    /// Path of a conda dependencies file, usually named requirements.txt
    /// (this is not for creating a conda environment from environment.yml)
    #[arg(long, value_name = "PATH")]
    pub conda_dependencies_path: Option<PathBuf>,

    /// Path of a conda environment file, usually named environment.yml
    #[arg(long, value_name = "PATH")]
    pub conda_environment_path: Option<PathBuf>,

    /// Update conda in the base environment after installing
    #[arg(long)]
    pub update_base: bool,

    /// Base URL the installer is downloaded from
    #[arg(long, value_name = "URL", env = "MCINSTALL_BASE_URL")]
    pub base_url: Option<String>,

    /// Distribution version token used in the installer name
    #[arg(long, value_name = "VERSION", env = "MCINSTALL_VERSION")]
    pub version_token: Option<String>,

    /// Directory caching downloaded installers [default: ~/Downloads]
    #[arg(long, value_name = "DIR", env = "MCINSTALL_DOWNLOADS_DIR")]
    pub downloads_dir: Option<PathBuf>,

    /// File every executed command is appended to [default: ./mcinstall.log]
    #[arg(long, value_name = "PATH", env = "MCINSTALL_LOG_PATH")]
    pub log_path: Option<PathBuf>,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    pub show_config: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}

/// Trim list entries and drop empty ones (`"a, b,"` -> `["a", "b"]`)
fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            version: self.version_token.clone(),
            downloads_dir: self.downloads_dir.clone(),
            log_path: self.log_path.clone(),
        }
    }

    pub fn pip_request(&self) -> DependencyRequest {
        DependencyRequest::new(
            clean_list(&self.pip_dependencies),
            self.pip_dependencies_path.clone(),
        )
    }

    pub fn pip_options(&self) -> PipOptions {
        PipOptions {
            index_url: self.pip_index_url.clone(),
            extra_index_urls: clean_list(&self.pip_extra_index_url),
        }
    }

    pub fn conda_request(&self) -> CondaRequest {
        CondaRequest {
            channel: self.conda_channel.clone(),
            dependencies: DependencyRequest::new(
                clean_list(&self.conda_dependencies),
                self.conda_dependencies_path.clone(),
            ),
            environment: self.conda_environment_path.clone(),
        }
    }
}
