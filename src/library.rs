//! The on-disk library: filename ordering, renumbering and tag writing.
//!
//! A library directory holds the audio files of one artist/album pair. The
//! pipeline renumbers the files first and then tags them from their names.

mod model;
mod naming;
mod renumber;
mod scan;
mod tagger;

pub use renumber::{Outcome, RenumberReport, renumber};
pub use tagger::{TagReport, tag_directory};
