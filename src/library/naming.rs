//! Filename classification.
//!
//! The downloader names files `{playlist_index} - {title}.{ext}` and writes the
//! literal `NA` in place of the index when the position is unknown. Everything
//! here works on plain file names and never touches the filesystem.

/// The ordering hint carried by the start of a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingToken {
    /// A leading decimal index. Leading zeros are not significant.
    Numbered(u32),
    /// The `NA` marker the downloader writes when it had no index.
    Unknown,
    /// No recognizable prefix.
    None,
}

const UNKNOWN_MARKER: &str = "NA";

fn leading_digits(name: &str) -> &str {
    let end = name.bytes().take_while(u8::is_ascii_digit).count();
    &name[..end]
}

fn has_unknown_marker(name: &str) -> bool {
    name.get(..UNKNOWN_MARKER.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(UNKNOWN_MARKER))
}

/// Classify the ordering prefix of `name`.
///
/// A digit run that does not fit a `u32` cannot be a track number and yields
/// [`OrderingToken::None`].
pub fn classify(name: &str) -> OrderingToken {
    let digits = leading_digits(name);
    if !digits.is_empty() {
        return digits
            .parse()
            .map(OrderingToken::Numbered)
            .unwrap_or(OrderingToken::None);
    }
    if has_unknown_marker(name) {
        OrderingToken::Unknown
    } else {
        OrderingToken::None
    }
}

/// Track number encoded in `name`, if it starts with a valid index.
pub fn track_number(name: &str) -> Option<u32> {
    match classify(name) {
        OrderingToken::Numbered(n) => Some(n),
        OrderingToken::Unknown | OrderingToken::None => None,
    }
}

// Whitespace, then at most one `-` or `.`, then whitespace.
fn skip_separator(rest: &str) -> &str {
    let rest = rest.trim_start();
    rest.strip_prefix(['-', '.']).unwrap_or(rest).trim_start()
}

/// Remove a `Numbered` or `Unknown` prefix together with its separator.
///
/// Names without a recognized prefix are returned unchanged.
pub fn strip_prefix(name: &str) -> &str {
    let marker_len = match classify(name) {
        OrderingToken::Numbered(_) => leading_digits(name).len(),
        OrderingToken::Unknown => UNKNOWN_MARKER.len(),
        OrderingToken::None => return name,
    };
    skip_separator(&name[marker_len..])
}

/// The title part of a file name, extension included.
///
/// The prefix is stripped from the stem only, so a name like `01.mp3` keeps
/// its stem instead of collapsing into a bare extension.
pub fn title_of(name: &str) -> String {
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    let stripped = strip_prefix(stem);
    let title = if stripped.is_empty() { stem } else { stripped };

    match ext {
        Some(ext) => format!("{title}.{ext}"),
        None => title.to_string(),
    }
}

/// Zero-padding width for a directory holding `count` files.
pub fn pad_width(count: usize) -> usize {
    count.max(1).to_string().len()
}

pub fn numbered_name(index: usize, width: usize, title: &str) -> String {
    format!("{index:0width$} - {title}")
}
