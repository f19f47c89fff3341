//! The external download step.
//!
//! Fetching and transcoding is delegated to an external tool that writes
//! `{index} - {title}.{ext}` files into the album directory.

use std::path::Path;

use crate::error::Result;

mod ffmpeg;
mod ytdlp;

pub use ytdlp::YtDlp;

pub trait Downloader {
    /// Download `url` into `dir`, which already exists.
    fn fetch(&self, url: &str, dir: &Path) -> Result<()>;
}
