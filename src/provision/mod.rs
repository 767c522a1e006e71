//! Dependency provisioning on top of a fresh installation
//!
//! Packages are installed one invocation per name, in the order given, so
//! progress shows before the whole batch finishes. A manifest file is
//! installed in one extra invocation after the named packages.

use std::path::PathBuf;

pub mod conda;
pub mod pip;


/// Default `conda` channel for named packages
pub const DEFAULT_CHANNEL: &str = "conda-forge";

/// Packages to install by name and/or from a manifest file
///
/// Names are neither deduplicated nor reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyRequest {
    pub packages: Vec<String>,
    pub manifest: Option<PathBuf>,
}

impl DependencyRequest {
    pub fn new(packages: Vec<String>, manifest: Option<PathBuf>) -> Self {
        Self { packages, manifest }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.manifest.is_none()
    }
}

/// Index URLs passed to every `pip install`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipOptions {
    pub index_url: Option<String>,
    pub extra_index_urls: Vec<String>,
}

impl PipOptions {
    /// `--index-url` and one `--extra-index-url` per supplementary index
    pub fn index_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(url) = &self.index_url {
            args.push("--index-url".to_string());
            args.push(url.clone());
        }
        for url in &self.extra_index_urls {
            args.push("--extra-index-url".to_string());
            args.push(url.clone());
        }
        args
    }
}

/// What to install with `conda`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondaRequest {
    /// Channel for named packages
    pub channel: String,
    pub dependencies: DependencyRequest,
    /// Environment file creating a new named environment
    pub environment: Option<PathBuf>,
}

impl Default for CondaRequest {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            dependencies: DependencyRequest::default(),
            environment: None,
        }
    }
}

impl CondaRequest {
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.environment.is_none()
    }
}
