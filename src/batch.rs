//! Batch definitions: a YAML mapping of artist names to album/URL pairs.
//!
//! ```yaml
//! Some Artist:
//!   - album: First Album
//!     url: https://www.youtube.com/playlist?list=...
//!   - album: Second Album
//!     url: https://www.youtube.com/playlist?list=...
//! ```

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::warn;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub artist: String,
    pub album: String,
    pub url: String,
}

/// Load a batch file, keeping the order in which entries appear.
pub fn load(path: &Path) -> Result<Vec<BatchEntry>> {
    let text = fs::read_to_string(path).map_err(|source| Error::BatchRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &text)
}

fn parse(path: &Path, text: &str) -> Result<Vec<BatchEntry>> {
    let doc: Value = serde_yaml::from_str(text).map_err(|source| Error::BatchParse {
        path: path.to_path_buf(),
        source,
    })?;

    let artists = match doc {
        Value::Mapping(map) => map,
        Value::Null => {
            warn!(path = %path.display(), "batch file is empty");
            return Ok(Vec::new());
        }
        _ => {
            return Err(Error::BatchShape {
                path: path.to_path_buf(),
            });
        }
    };

    let mut entries = Vec::new();
    for (key, albums) in &artists {
        let Some(artist) = scalar(key) else {
            warn!("skipping artist with unusable name: {key:?}");
            continue;
        };
        let Value::Sequence(items) = albums else {
            warn!(%artist, "skipping artist: expected a list of albums");
            continue;
        };

        for item in items {
            let album = item.get("album").and_then(scalar);
            let url = item.get("url").and_then(scalar);
            match (album, url) {
                (Some(album), Some(url)) => entries.push(BatchEntry {
                    artist: artist.clone(),
                    album,
                    url,
                }),
                _ => warn!(%artist, "skipping invalid entry: {item:?}"),
            }
        }
    }

    Ok(entries)
}

// Names like `1989` or `311` come through as numbers.
fn scalar(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
