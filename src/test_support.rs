//! Shared helpers for unit tests.

use std::fs;
use std::ffi::OsString;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};

use lofty::prelude::{Accessor, TaggedFileExt};

// MPEG-1 Layer III, 128 kbit/s, 44.1 kHz, joint stereo, no padding: 417 bytes per frame.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
const FRAME_LEN: usize = 417;
const FRAME_COUNT: usize = 16;

/// Write a short, silent MP3 with no tags at all.
pub fn write_silent_mp3(path: &Path) {
    let mut data = Vec::with_capacity(FRAME_LEN * FRAME_COUNT);
    for _ in 0..FRAME_COUNT {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..FRAME_HEADER.len()].copy_from_slice(&FRAME_HEADER);
        data.extend_from_slice(&frame);
    }
    fs::write(path, data).unwrap();
}

/// Write a file with an audio extension but no audio frames in it.
pub fn write_corrupt_mp3(path: &Path) {
    fs::write(path, b"this is definitely not an mpeg stream").unwrap();
}

#[derive(Debug)]
pub struct TagSnapshot {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub track: Option<u32>,
}

/// Read back the primary tag of `path`, if it has one.
pub fn read_tag(path: &Path) -> Option<TagSnapshot> {
    let tagged = lofty::read_from_path(path).unwrap();
    let tag = tagged.primary_tag()?;
    Some(TagSnapshot {
        artist: tag.artist().map(|s| s.into_owned()),
        album: tag.album().map(|s| s.into_owned()),
        track: tag.track(),
    })
}

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Serializes tests that touch process environment variables.
pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sets or removes an environment variable and restores it on drop.
pub struct EnvGuard {
    key: &'static str,
    old: Option<OsString>,
}

impl EnvGuard {
    pub fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    pub fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}
