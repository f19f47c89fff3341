use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// Where the downloader can find ffmpeg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FfmpegLocation {
    /// Found on `PATH`; the downloader needs no hint.
    OnPath,
    /// Found elsewhere; pass this path to the downloader.
    At(PathBuf),
}

impl FfmpegLocation {
    pub fn hint(&self) -> Option<&Path> {
        match self {
            FfmpegLocation::OnPath => None,
            FfmpegLocation::At(path) => Some(path),
        }
    }
}

fn binary_name() -> &'static str {
    if cfg!(windows) { "ffmpeg.exe" } else { "ffmpeg" }
}

/// Search each directory of a `PATH`-style list for `name`.
pub fn find_on_path(name: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    env::split_paths(path_var?)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn bundled_dir() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    Some(exe.parent()?.join("bin"))
}

/// Find ffmpeg without touching the process environment.
///
/// Order: the configured location, then `PATH`, then a `bin/` directory next
/// to the executable.
pub fn locate(configured: Option<&Path>) -> Option<FfmpegLocation> {
    if let Some(path) = configured {
        if path.exists() {
            debug!(path = %path.display(), "using configured ffmpeg");
            return Some(FfmpegLocation::At(path.to_path_buf()));
        }
        warn!(path = %path.display(), "configured ffmpeg location does not exist");
    }

    let path_var = env::var_os("PATH");
    if find_on_path(binary_name(), path_var.as_deref()).is_some() {
        return Some(FfmpegLocation::OnPath);
    }

    let bundled = bundled_dir()?;
    if bundled.join(binary_name()).is_file() {
        info!(dir = %bundled.display(), "using bundled ffmpeg");
        return Some(FfmpegLocation::At(bundled));
    }

    None
}
