use std::path::Path;

use lofty::config::WriteOptions;
use lofty::error::{ErrorKind, LoftyError};
use lofty::prelude::{Accessor, TagExt, TaggedFileExt};
use lofty::tag::Tag;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

use super::naming;
use super::scan::list_audio_files;

#[derive(Debug, Default)]
pub struct TagReport {
    /// Files whose tags were written successfully.
    pub tagged: usize,
    pub failures: Vec<Error>,
}

/// Write artist, album and track number into every audio file in `dir`.
///
/// The track number comes from the current file name, so this must run after
/// renumbering. A file that fails is logged and skipped.
pub fn tag_directory(
    dir: &Path,
    extensions: &[String],
    artist: &str,
    album: &str,
) -> Result<TagReport> {
    info!("updating metadata: artist='{artist}', album='{album}'");

    let mut report = TagReport::default();
    for file in list_audio_files(dir, extensions)? {
        let track = naming::track_number(&file.display_name);
        debug!(file = %file.display_name, title = %file.title, ?track, "tagging");
        match tag_file(&file.path, artist, album, track) {
            Ok(()) => report.tagged += 1,
            Err(e) => {
                warn!(file = %file.display_name, "failed to tag: {e}");
                report.failures.push(e);
            }
        }
    }

    info!("tagged {} files", report.tagged);
    Ok(report)
}

/// Set artist and album on a single file, and the track number when given.
///
/// Files without a tag get an empty one of the format's primary type first.
pub fn tag_file(path: &Path, artist: &str, album: &str, track: Option<u32>) -> Result<()> {
    write_tags(path, artist, album, track).map_err(|source| Error::Tag {
        path: path.to_path_buf(),
        source,
    })
}

fn write_tags(
    path: &Path,
    artist: &str,
    album: &str,
    track: Option<u32>,
) -> Result<(), LoftyError> {
    let mut tagged_file = lofty::read_from_path(path)?;
    let tag_type = tagged_file.primary_tag_type();

    if tagged_file.tag(tag_type).is_none() {
        let empty = Tag::new(tag_type);
        empty.save_to_path(path, WriteOptions::default())?;
        tagged_file.insert_tag(empty);
    }

    let tag = tagged_file
        .tag_mut(tag_type)
        .ok_or_else(|| LoftyError::new(ErrorKind::UnsupportedTag))?;

    tag.set_artist(artist.to_string());
    tag.set_album(album.to_string());
    if let Some(n) = track {
        tag.set_track(n);
    }

    tag.save_to_path(path, WriteOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{read_tag, write_corrupt_mp3, write_silent_mp3};
    use tempfile::tempdir;

    fn mp3() -> Vec<String> {
        vec!["mp3".to_string()]
    }

    #[test]
    fn tags_file_without_existing_tag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("01 - Fresh.mp3");
        write_silent_mp3(&path);

        let report = tag_directory(dir.path(), &mp3(), "Artist", "Album").unwrap();
        assert_eq!(report.tagged, 1);
        assert!(report.failures.is_empty());

        let tag = read_tag(&path).expect("tag written");
        assert_eq!(tag.artist.as_deref(), Some("Artist"));
        assert_eq!(tag.album.as_deref(), Some("Album"));
        assert_eq!(tag.track, Some(1));
    }

    #[test]
    fn overwrites_existing_artist_and_album_on_every_file() {
        let dir = tempdir().unwrap();
        let names = ["1 - One.mp3", "2 - Two.mp3", "3 - Three.mp3"];
        for name in names {
            let path = dir.path().join(name);
            write_silent_mp3(&path);
            tag_file(&path, "Old Artist", "Old Album", None).unwrap();
        }

        let report = tag_directory(dir.path(), &mp3(), "New Artist", "New Album").unwrap();
        assert_eq!(report.tagged, 3);

        for (i, name) in names.iter().enumerate() {
            let tag = read_tag(&dir.path().join(name)).unwrap();
            assert_eq!(tag.artist.as_deref(), Some("New Artist"));
            assert_eq!(tag.album.as_deref(), Some("New Album"));
            assert_eq!(tag.track, Some(i as u32 + 1));
        }
    }

    #[test]
    fn leaves_track_number_alone_for_unnumbered_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Intro.mp3");
        write_silent_mp3(&path);
        tag_file(&path, "Someone", "Something", Some(7)).unwrap();

        tag_directory(dir.path(), &mp3(), "Artist", "Album").unwrap();

        let tag = read_tag(&path).unwrap();
        assert_eq!(tag.artist.as_deref(), Some("Artist"));
        assert_eq!(tag.track, Some(7));
    }

    #[test]
    fn unknown_marker_does_not_set_track_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("NA - Song.mp3");
        write_silent_mp3(&path);

        tag_directory(dir.path(), &mp3(), "Artist", "Album").unwrap();

        let tag = read_tag(&path).unwrap();
        assert_eq!(tag.album.as_deref(), Some("Album"));
        assert_eq!(tag.track, None);
    }

    #[test]
    fn one_corrupt_file_does_not_stop_the_rest() {
        let dir = tempdir().unwrap();
        for i in 1..=4 {
            write_silent_mp3(&dir.path().join(format!("{i} - Good {i}.mp3")));
        }
        write_corrupt_mp3(&dir.path().join("5 - Broken.mp3"));

        let report = tag_directory(dir.path(), &mp3(), "Artist", "Album").unwrap();
        assert_eq!(report.tagged, 4);
        assert_eq!(report.failures.len(), 1);
        match &report.failures[0] {
            Error::Tag { path, .. } => assert!(path.ends_with("5 - Broken.mp3")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn every_counted_file_carries_a_readable_tag() {
        let dir = tempdir().unwrap();
        for name in ["1 - A.mp3", "NA - B.mp3", "C.mp3"] {
            write_silent_mp3(&dir.path().join(name));
        }

        let report = tag_directory(dir.path(), &mp3(), "Artist", "Album").unwrap();
        assert_eq!(report.tagged, 3);
        for name in ["1 - A.mp3", "NA - B.mp3", "C.mp3"] {
            let tag = read_tag(&dir.path().join(name)).expect("tag written");
            assert_eq!(tag.artist.as_deref(), Some("Artist"));
        }
    }

    #[test]
    fn empty_directory_tags_nothing() {
        let dir = tempdir().unwrap();
        let report = tag_directory(dir.path(), &mp3(), "Artist", "Album").unwrap();
        assert_eq!(report.tagged, 0);
        assert!(report.failures.is_empty());
    }
}
