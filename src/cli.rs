//! Command-line interface definitions.
//!
//! Only argument parsing lives here; `runtime` turns the parsed arguments
//! and the loaded settings into pipeline jobs.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::config::Browser;

/// Download playlists as audio into `Library/Artist/Album/NN - Title.ext`.
#[derive(Parser, Debug)]
#[command(name = "downtune", version, about)]
#[command(group(ArgGroup::new("source").required(true).args(["url", "batch"])))]
pub struct Args {
    /// Playlist or video URL
    pub url: Option<String>,

    /// YAML file mapping artists to album/url pairs
    #[arg(long, value_name = "FILE")]
    pub batch: Option<PathBuf>,

    /// Artist name, used for the directory and for tagging
    #[arg(long)]
    pub artist: Option<String>,

    /// Album name, used for the directory and for tagging
    #[arg(long)]
    pub album: Option<String>,

    /// Browser to extract cookies from (private or age-restricted videos)
    #[arg(long, value_enum)]
    pub browser: Option<Browser>,

    /// Library root directory (overrides `library.root`)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Update the downloader before running
    #[arg(long)]
    pub update: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}
