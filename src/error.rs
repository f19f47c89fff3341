use std::io;
use std::path::PathBuf;

use lofty::error::LoftyError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A single rename could not be performed.
    #[error("failed to rename {from} to {to}: {source}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: io::Error,
    },

    /// The rename target is occupied by something that is not part of the renumbering.
    #[error("refusing to rename {from} to {to}: target already exists")]
    Collision { from: String, to: String },

    /// Reading or persisting a file's tags failed.
    #[error("failed to tag {}: {source}", .path.display())]
    Tag {
        path: PathBuf,
        #[source]
        source: LoftyError,
    },

    /// The library directory cannot be created or listed.
    #[error("library directory {} is not usable: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not run downloader `{program}`: {source}")]
    Downloader {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read batch file {}: {source}", .path.display())]
    BatchRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse batch file {}: {source}", .path.display())]
    BatchParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("batch file {} must map artist names to lists of albums", .path.display())]
    BatchShape { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),
}
