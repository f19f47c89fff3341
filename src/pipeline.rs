//! Download, renumber, tag: one album at a time.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::batch::BatchEntry;
use crate::download::Downloader;
use crate::error::{Error, Result};
use crate::library::{self, RenumberReport, TagReport};

/// One unit of work: a playlist URL and the album directory it fills.
#[derive(Debug, Clone)]
pub struct Job {
    pub url: String,
    pub output_dir: PathBuf,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Turn an artist or album name into a single directory name under the root.
///
/// Path separators become `_`, and names that would leave the directory
/// (`..`, `.`, empty) fall back to `fallback`.
fn path_component(name: &str, fallback: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => fallback.to_string(),
        _ => cleaned,
    }
}

impl Job {
    /// A batch job always carries both names and lands in `root/Artist/Album`.
    pub fn from_entry(root: &Path, entry: &BatchEntry) -> Self {
        Self {
            url: entry.url.clone(),
            output_dir: root
                .join(path_component(&entry.artist, "_"))
                .join(path_component(&entry.album, "_")),
            artist: Some(entry.artist.clone()),
            album: Some(entry.album.clone()),
        }
    }

    /// A job from the command line. Missing names fall back to placeholder
    /// directories, and tagging is skipped unless both were given.
    pub fn single(
        root: &Path,
        url: String,
        artist: Option<String>,
        album: Option<String>,
        unknown_artist: &str,
        unknown_album: &str,
    ) -> Self {
        let output_dir = root
            .join(path_component(
                artist.as_deref().unwrap_or(unknown_artist),
                unknown_artist,
            ))
            .join(path_component(
                album.as_deref().unwrap_or(unknown_album),
                unknown_album,
            ));
        Self {
            url,
            output_dir,
            artist,
            album,
        }
    }

    /// Artist and album to tag with, when both are present and non-empty.
    pub fn tag_names(&self) -> Option<(&str, &str)> {
        let artist = self.artist.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let album = self.album.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((artist, album))
    }
}

#[derive(Debug)]
pub struct JobReport {
    pub numbering: RenumberReport,
    /// `None` when tagging was skipped.
    pub tagging: Option<TagReport>,
}

impl JobReport {
    pub fn has_failures(&self) -> bool {
        !self.numbering.failures.is_empty()
            || self
                .tagging
                .as_ref()
                .is_some_and(|t| !t.failures.is_empty())
    }
}

/// Run one job: fetch into the album directory, renumber, then tag.
///
/// Only an unusable directory or a downloader that cannot start is fatal.
/// Per-file problems end up in the report.
pub fn run_job(job: &Job, downloader: &dyn Downloader, extensions: &[String]) -> Result<JobReport> {
    info!("starting download");
    info!("  > URL: {}", job.url);
    info!("  > To: {}", job.output_dir.display());

    fs::create_dir_all(&job.output_dir).map_err(|source| Error::Directory {
        path: job.output_dir.clone(),
        source,
    })?;

    downloader.fetch(&job.url, &job.output_dir)?;

    let numbering = library::renumber(&job.output_dir, extensions)?;

    let tagging = match job.tag_names() {
        Some((artist, album)) => Some(library::tag_directory(
            &job.output_dir,
            extensions,
            artist,
            album,
        )?),
        None => {
            info!("artist or album missing, skipping tagging");
            None
        }
    };

    Ok(JobReport { numbering, tagging })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub jobs: usize,
    /// Jobs that failed outright or finished with per-file failures.
    pub failed: usize,
}

/// Run every batch entry in order. A failing job never stops the batch.
pub fn run_batch(
    entries: &[BatchEntry],
    root: &Path,
    downloader: &dyn Downloader,
    extensions: &[String],
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    let mut current_artist: Option<&str> = None;

    for entry in entries {
        if current_artist != Some(entry.artist.as_str()) {
            info!("processing artist: {}", entry.artist);
            current_artist = Some(entry.artist.as_str());
        }

        summary.jobs += 1;
        let job = Job::from_entry(root, entry);
        match run_job(&job, downloader, extensions) {
            Ok(report) if report.has_failures() => {
                warn!(album = %entry.album, "finished with failures");
                summary.failed += 1;
            }
            Ok(_) => {}
            Err(e) => {
                error!(album = %entry.album, "{e}");
                summary.failed += 1;
            }
        }
    }

    summary
}
