use std::io;
use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Error, Result};

use super::model::TrackFile;

fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.'))
                .filter(|e| !e.is_empty())
                .any(|e| e.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the audio files directly inside `dir`, sorted by file name.
///
/// The listing is not recursive. Extensions match case-insensitively and
/// hidden files are skipped.
pub fn list_audio_files(dir: &Path, extensions: &[String]) -> Result<Vec<TrackFile>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Only the directory itself being unreadable is fatal.
            Err(e) if e.depth() == 0 => {
                return Err(Error::Directory {
                    path: dir.to_path_buf(),
                    source: io::Error::from(e),
                });
            }
            Err(e) => {
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                warn!(%path, "skipping unreadable entry: {e}");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || is_hidden(path) || !is_audio_file(path, extensions) {
            continue;
        }

        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "skipping file with a non UTF-8 name");
            continue;
        };

        files.push(TrackFile::new(path.to_path_buf(), name.to_string()));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn mp3() -> Vec<String> {
        vec!["mp3".to_string()]
    }

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let exts = vec!["mp3".to_string(), ".flac".to_string()];
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/a.ogg"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/a"), &exts));
    }

    #[test]
    fn list_filters_non_audio_hidden_and_nested_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.mp3"), b"x").unwrap();
        fs::write(dir.path().join("A.MP3"), b"x").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"x").unwrap();
        fs::write(dir.path().join(".partial.mp3"), b"x").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("nested.mp3"), b"x").unwrap();

        let files = list_audio_files(dir.path(), &mp3()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.display_name.as_str()).collect();
        assert_eq!(names, vec!["A.MP3", "b.mp3"]);
        assert_eq!(files[1].path, dir.path().join("b.mp3"));
    }

    #[test]
    fn list_skips_directories_named_like_audio() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("folder.mp3")).unwrap();
        fs::write(dir.path().join("01 - Song.mp3"), b"x").unwrap();

        let files = list_audio_files(dir.path(), &mp3()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].title, "Song.mp3");
    }

    #[test]
    fn list_of_empty_directory_is_empty() {
        let dir = tempdir().unwrap();
        assert!(list_audio_files(dir.path(), &mp3()).unwrap().is_empty());
    }

    #[test]
    fn list_of_missing_directory_is_a_directory_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = list_audio_files(&missing, &mp3()).unwrap_err();
        assert!(matches!(err, Error::Directory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn list_skips_dangling_symlinks() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("NA - A.mp3"), b"x").unwrap();
        fs::write(dir.path().join("Song.mp3"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("stale-link.jpg"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("stale.mp3")).unwrap();

        let files = list_audio_files(dir.path(), &mp3()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.display_name.as_str()).collect();
        assert_eq!(names, vec!["NA - A.mp3", "Song.mp3"]);
    }
}
