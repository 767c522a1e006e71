//! Progress bar display for installer downloads

use std::io::Read;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a single download
pub struct DownloadProgress {
    pb: ProgressBar,
}

impl DownloadProgress {
    /// Create a byte progress bar, or a spinner when the size is unknown
    pub fn new(total_bytes: Option<u64>, label: &str) -> Self {
        let pb = match total_bytes {
            Some(total) => {
                let style = ProgressStyle::default_bar()
                    .template("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-");
                let pb = ProgressBar::new(total);
                pb.set_style(style);
                pb
            }
            None => {
                let style = ProgressStyle::default_spinner()
                    .template("{spinner} {bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                let pb = ProgressBar::new_spinner();
                pb.set_style(style);
                pb
            }
        };

        pb.set_message(truncate_label(label));

        Self { pb }
    }

    /// A display that draws nothing
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Wrap a reader so bytes read advance the bar
    pub fn wrap_read<R: Read>(&self, reader: R) -> impl Read {
        self.pb.wrap_read(reader)
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}

/// Keep the last characters of long names, which carry the platform and extension
fn truncate_label(label: &str) -> String {
    const MAX_CHARS: usize = 50;
    const KEEP_CHARS: usize = 47;

    let count = label.chars().count();
    if count <= MAX_CHARS {
        return label.to_string();
    }
    let tail: String = label.chars().skip(count - KEEP_CHARS).collect();
    format!("...{tail}")
}
