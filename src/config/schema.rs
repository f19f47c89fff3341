use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/downtune/config.toml` or `~/.config/downtune/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DOWNTUNE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub download: DownloadSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Root of the library; albums land in `root/Artist/Album`.
    pub root: PathBuf,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Directory name used when no artist was given.
    pub unknown_artist: String,
    /// Directory name used when no album was given.
    pub unknown_album: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("Downloads"),
            extensions: vec!["mp3".into()],
            unknown_artist: "Unknown Artist".to_string(),
            unknown_album: "Unknown Album".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    /// Downloader executable, looked up on `PATH` unless absolute.
    pub program: String,
    /// Stream selection passed as `-f`.
    pub format: String,
    /// Target audio codec after extraction.
    pub audio_format: String,
    pub audio_quality: String,
    /// Naming template relative to the album directory.
    ///
    /// The leading `%(playlist_index)s` is what renumbering reads back.
    pub output_template: String,
    pub embed_thumbnail: bool,
    pub add_metadata: bool,
    /// Keep going when single playlist items fail.
    pub ignore_errors: bool,
    /// Explicit ffmpeg binary or directory. Probed when unset.
    pub ffmpeg_location: Option<PathBuf>,
    /// Browser to borrow cookies from for private or age-restricted videos.
    pub cookies_from_browser: Option<Browser>,
    /// Ask the downloader to update itself before running.
    pub self_update: bool,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
            format: "bestaudio/best".to_string(),
            audio_format: "mp3".to_string(),
            audio_quality: "320K".to_string(),
            output_template: "%(playlist_index)s - %(title)s.%(ext)s".to_string(),
            embed_thumbnail: true,
            add_metadata: true,
            ignore_errors: true,
            ffmpeg_location: None,
            cookies_from_browser: None,
            self_update: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Edge,
    Firefox,
    Opera,
    Brave,
    Chromium,
    Safari,
    Vivaldi,
}

impl Browser {
    pub fn as_str(self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Edge => "edge",
            Browser::Firefox => "firefox",
            Browser::Opera => "opera",
            Browser::Brave => "brave",
            Browser::Chromium => "chromium",
            Browser::Safari => "safari",
            Browser::Vivaldi => "vivaldi",
        }
    }
}
