use std::path::PathBuf;

use super::naming;

/// One audio file sitting directly inside a library directory.
#[derive(Debug, Clone)]
pub struct TrackFile {
    pub path: PathBuf,
    /// Current file name, extension included.
    pub display_name: String,
    /// File name with any ordering prefix stripped.
    pub title: String,
}

impl TrackFile {
    pub fn new(path: PathBuf, display_name: String) -> Self {
        let title = naming::title_of(&display_name);
        Self {
            path,
            display_name,
            title,
        }
    }
}
