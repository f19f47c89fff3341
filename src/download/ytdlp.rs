use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

use crate::config::DownloadSettings;
use crate::error::{Error, Result};

use super::Downloader;
use super::ffmpeg::{self, FfmpegLocation};

/// Runs `yt-dlp` (or a compatible program) to fetch and transcode a playlist.
pub struct YtDlp {
    settings: DownloadSettings,
    ffmpeg: Option<FfmpegLocation>,
}

impl YtDlp {
    pub fn new(settings: DownloadSettings) -> Self {
        let ffmpeg = ffmpeg::locate(settings.ffmpeg_location.as_deref());
        if ffmpeg.is_none() {
            warn!("ffmpeg not found, audio conversion may fail");
        }
        Self::with_ffmpeg(settings, ffmpeg)
    }

    pub fn with_ffmpeg(settings: DownloadSettings, ffmpeg: Option<FfmpegLocation>) -> Self {
        Self { settings, ffmpeg }
    }

    /// Command-line arguments for downloading `url` into `dir`.
    pub fn args(&self, url: &str, dir: &Path) -> Vec<OsString> {
        let s = &self.settings;
        let mut args: Vec<OsString> = vec![
            "-f".into(),
            s.format.clone().into(),
            "-x".into(),
            "--audio-format".into(),
            s.audio_format.clone().into(),
            "--audio-quality".into(),
            s.audio_quality.clone().into(),
        ];

        if s.embed_thumbnail {
            args.push("--embed-thumbnail".into());
        }
        if s.add_metadata {
            args.push("--add-metadata".into());
        }
        if s.ignore_errors {
            args.push("--ignore-errors".into());
        }
        args.push("--no-warnings".into());

        if let Some(browser) = s.cookies_from_browser {
            args.push("--cookies-from-browser".into());
            args.push(browser.as_str().into());
        }
        if let Some(location) = self.ffmpeg.as_ref().and_then(FfmpegLocation::hint) {
            args.push("--ffmpeg-location".into());
            args.push(location.into());
        }

        args.push("-o".into());
        args.push(dir.join(&s.output_template).into());
        args.push(url.into());
        args
    }

    /// Ask the downloader to update itself. Failure only produces a warning.
    pub fn self_update(&self) {
        info!(program = %self.settings.program, "checking for downloader updates");
        match Command::new(&self.settings.program).arg("-U").status() {
            Ok(status) if status.success() => info!("downloader is up to date"),
            Ok(status) => warn!("downloader update exited with {status}, continuing"),
            Err(e) => warn!("could not update downloader: {e}, continuing"),
        }
    }
}

impl Downloader for YtDlp {
    fn fetch(&self, url: &str, dir: &Path) -> Result<()> {
        if let Some(browser) = self.settings.cookies_from_browser {
            info!("using cookies from {}", browser.as_str());
        }

        let status = Command::new(&self.settings.program)
            .args(self.args(url, dir))
            .status()
            .map_err(|source| Error::Downloader {
                program: self.settings.program.clone(),
                source,
            })?;

        // Per-item errors are ignored by the downloader; whatever arrived still gets processed.
        if !status.success() {
            warn!(url, "downloader exited with {status}, continuing with downloaded files");
        }
        Ok(())
    }
}
