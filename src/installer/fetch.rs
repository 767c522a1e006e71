//! Directory preparation and installer download

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ProvisionError, Result};
use crate::progress::DownloadProgress;

use super::InstallerSession;

/// Status and body of a finished HTTP GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Status codes of 400 and above are failures
    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }
}

/// Fetches a URL into memory
pub trait Downloader {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Blocking HTTP client without timeouts
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
    show_progress: bool,
}

impl HttpDownloader {
    pub fn new(show_progress: bool) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            client,
            show_progress,
        })
    }
}

impl Downloader for HttpDownloader {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        tracing::debug!(%url, status, "received response");

        if status >= 400 {
            return Ok(HttpResponse {
                status,
                body: Vec::new(),
            });
        }

        let progress = if self.show_progress {
            let label = url.rsplit('/').next().unwrap_or(url);
            DownloadProgress::new(response.content_length(), label)
        } else {
            DownloadProgress::hidden()
        };

        let mut body = Vec::new();
        if let Err(e) = progress.wrap_read(response).read_to_end(&mut body) {
            progress.abandon();
            return Err(ProvisionError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            });
        }
        progress.finish();

        Ok(HttpResponse { status, body })
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| ProvisionError::CreateDirFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

impl InstallerSession<'_> {
    /// Create the destination and the shared download directory if missing
    pub fn ensure_directories(&self) -> Result<()> {
        if !self.dest_path.exists() {
            self.note(format!("Making directory {}.", self.dest_path.display()));
            create_dir(&self.dest_path)?;
        }

        let downloads = self.downloads_dir();
        if !downloads.exists() {
            self.note(format!("Making directory {}.", downloads.display()));
            create_dir(downloads)?;
        }

        Ok(())
    }

    /// Download the installer into the cache unless it is already there
    ///
    /// Returns the local path of the installer.
    pub fn fetch_installer(&self, downloader: &dyn Downloader) -> Result<PathBuf> {
        let blob_path = self.config.blob_path();
        if blob_path.exists() {
            tracing::debug!(path = %blob_path.display(), "installer already cached");
            return Ok(blob_path);
        }

        let url = self.config.installer_url();
        self.note(format!("Downloading {url} ..."));

        let response = downloader.get(&url)?;
        self.log.record(&format!("wget {url}"))?;

        if response.is_failure() {
            return Err(ProvisionError::DownloadFailed {
                url,
                reason: format!("HTTP {}", response.status),
            });
        }

        self.note(format!("Copying to {} ...", blob_path.display()));
        fs::write(&blob_path, &response.body).map_err(|e| ProvisionError::FileWriteFailed {
            path: blob_path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.log.record(&format!(
            "mv {} {}",
            self.config.blob_name,
            blob_path.display()
        ))?;

        Ok(blob_path)
    }
}
