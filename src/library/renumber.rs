use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};

use super::naming::{self, OrderingToken};
use super::scan::list_audio_files;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No audio files in the directory.
    Empty,
    /// Every file already starts with a track number; nothing was touched.
    AlreadyNumbered,
    /// A fresh order was assigned and applied.
    Renumbered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

#[derive(Debug)]
pub struct RenumberReport {
    pub outcome: Outcome,
    /// Number of audio files considered.
    pub processed: usize,
    /// Renames that were applied.
    pub renamed: Vec<Rename>,
    pub failures: Vec<Error>,
}

impl RenumberReport {
    fn untouched(outcome: Outcome, processed: usize) -> Self {
        Self {
            outcome,
            processed,
            renamed: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// True unless every name already carries a valid track number.
pub fn needs_renumbering<S: AsRef<str>>(names: &[S]) -> bool {
    names
        .iter()
        .any(|n| !matches!(naming::classify(n.as_ref()), OrderingToken::Numbered(_)))
}

/// Compute the renames that give `names` a contiguous, zero-padded order.
///
/// The order is the byte-wise sort of the current names. Existing indices are
/// discarded, not used as sort keys. Names that would not change are left out.
pub fn plan<S: AsRef<str>>(names: &[S]) -> Vec<Rename> {
    let mut sorted: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
    sorted.sort_unstable();

    let width = naming::pad_width(sorted.len());

    sorted
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| {
            let to = naming::numbered_name(i + 1, width, &naming::title_of(name));
            (to != name).then(|| Rename {
                from: name.to_string(),
                to,
            })
        })
        .collect()
}

/// Give every audio file in `dir` a leading track number.
///
/// Does nothing when all files are already numbered. Otherwise the whole
/// directory is re-sorted by name, including files that had a number. A failed
/// rename is recorded in the report and the remaining files are still processed.
pub fn renumber(dir: &Path, extensions: &[String]) -> Result<RenumberReport> {
    let files = list_audio_files(dir, extensions)?;
    if files.is_empty() {
        info!(dir = %dir.display(), "no audio files to number");
        return Ok(RenumberReport::untouched(Outcome::Empty, 0));
    }

    let names: Vec<&str> = files.iter().map(|f| f.display_name.as_str()).collect();
    if !needs_renumbering(&names) {
        info!("all files already have track numbers");
        return Ok(RenumberReport::untouched(
            Outcome::AlreadyNumbered,
            files.len(),
        ));
    }

    info!("adding track numbers to files");
    let moves = plan(&names);
    let (renamed, failures) = apply(dir, &moves);

    for r in &renamed {
        info!("  {} -> {}", r.from, r.to);
    }
    for err in &failures {
        warn!("  {err}");
    }
    info!("processed {} files", files.len());

    Ok(RenumberReport {
        outcome: Outcome::Renumbered,
        processed: files.len(),
        renamed,
        failures,
    })
}

fn move_file(dir: &Path, from: &str, to: &str) -> Result<()> {
    let target = dir.join(to);
    if fs::symlink_metadata(&target).is_ok() {
        return Err(Error::Collision {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    fs::rename(dir.join(from), target).map_err(|source| Error::Rename {
        from: from.to_string(),
        to: to.to_string(),
        source,
    })
}

// Independent of the original name, so a long name can still be staged.
fn staging_name(index: usize) -> String {
    format!(".downtune-{index}.renumber")
}

/// Apply `moves` inside `dir`, never overwriting an existing file.
///
/// When some target is still occupied by a file that is itself about to move,
/// every move goes through a hidden staging name first.
fn apply(dir: &Path, moves: &[Rename]) -> (Vec<Rename>, Vec<Error>) {
    let mut renamed = Vec::new();
    let mut failures = Vec::new();

    let sources: HashSet<&str> = moves.iter().map(|m| m.from.as_str()).collect();
    let chained = moves.iter().any(|m| sources.contains(m.to.as_str()));

    if !chained {
        for m in moves {
            match move_file(dir, &m.from, &m.to) {
                Ok(()) => renamed.push(m.clone()),
                Err(e) => failures.push(e),
            }
        }
        return (renamed, failures);
    }

    let mut staged = Vec::with_capacity(moves.len());
    for (i, m) in moves.iter().enumerate() {
        let tmp = staging_name(i);
        match move_file(dir, &m.from, &tmp) {
            Ok(()) => staged.push((m, tmp)),
            Err(e) => failures.push(e),
        }
    }

    for (m, tmp) in staged {
        match move_file(dir, &tmp, &m.to) {
            Ok(()) => renamed.push(m.clone()),
            Err(e) => {
                failures.push(relabel(e, m));
                if let Err(restore) = move_file(dir, &tmp, &m.from) {
                    warn!(file = %m.from, staged = %tmp, "could not restore staged file: {restore}");
                }
            }
        }
    }

    (renamed, failures)
}

// Report staging failures against the user's file names, not the temporary one.
fn relabel(err: Error, m: &Rename) -> Error {
    match err {
        Error::Collision { .. } => Error::Collision {
            from: m.from.clone(),
            to: m.to.clone(),
        },
        Error::Rename { source, .. } => Error::Rename {
            from: m.from.clone(),
            to: m.to.clone(),
            source,
        },
        other => other,
    }
}
