use crate::libs::error::{LbiError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

const MIB: u64 = 1024 * 1024;

/// Progress is logged each time another this many bytes have been written.
pub const PROGRESS_CHUNK: u64 = 50 * MIB;

/// Streams remote files to disk without holding the payload in memory.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
    show_progress: bool,
    report_every: u64,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            show_progress: true,
            report_every: PROGRESS_CHUNK,
        }
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn report_every(mut self, bytes: u64) -> Self {
        self.report_every = bytes.max(1);
        self
    }

    fn progress_bar(&self, total: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        match total {
            Some(total) => {
                let bar = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {bytes}/{total_bytes} {percent:>3}% {bytes_per_sec}") {
                    bar.set_style(style.progress_chars("=> "));
                }
                bar
            }
            None => ProgressBar::new_spinner(),
        }
    }

    /// Downloads `url` into `target`, replacing any existing file, and returns the byte count.
    ///
    /// The parent directory is created once the server has answered successfully.
    ///
    /// # Errors
    ///
    /// `TransferError` on a non-success status or when the body ends before the
    /// advertised `Content-Length`. The partial file is left on disk.
    pub async fn download(&self, url: &str, target: &Path) -> Result<u64> {
        if target.exists() {
            info!("Previous installer found, removing {}", target.display());
            fs::remove_file(target)?;
        }

        info!("Beginning download of {} to {}", url, target.display());
        let mut res = self.client.get(url).send().await?;
        if !res.status().is_success() {
            return Err(LbiError::transfer(url, format!("server responded with {}", res.status())));
        }

        let total = res.content_length();
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let bar = self.progress_bar(total);
        let mut file = File::create(target)?;
        let mut downloaded: u64 = 0;
        let mut reported: u64 = 0;

        while let Some(chunk) = res.chunk().await.map_err(|e| {
            LbiError::transfer(url, format!("connection closed after {} bytes: {}", downloaded, e))
        })? {
            file.write_all(&chunk)?;
            downloaded += chunk.len() as u64;
            bar.set_position(downloaded);

            if downloaded / self.report_every > reported {
                reported = downloaded / self.report_every;
                log_progress(downloaded, total);
            }
        }
        file.flush()?;
        bar.finish_and_clear();

        if let Some(total) = total {
            if downloaded < total {
                return Err(LbiError::transfer(
                    url,
                    format!("connection closed after {} of {} bytes", downloaded, total),
                ));
            }
        }

        log_progress(downloaded, total);
        info!("Download complete");
        Ok(downloaded)
    }
}

fn log_progress(downloaded: u64, total: Option<u64>) {
    let downloaded_mb = downloaded as f64 / MIB as f64;
    match total {
        Some(total) if total > 0 => {
            let total_mb = total as f64 / MIB as f64;
            let percent = (downloaded as f64 / total as f64 * 100.0).min(100.0);
            info!("{:8.1}/{:.1} MB {:>6.2}%", downloaded_mb, total_mb, percent);
        }
        _ => info!("{:8.1} MB", downloaded_mb),
    }
}
