//! Configuration loader and schema types.
//!
//! This module exposes the settings that control where the library lives
//! and how the downloader is invoked, plus helpers to load them from disk.

mod load;
mod schema;

pub use schema::*;
