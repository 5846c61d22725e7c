//! Version-control status input for the engine.
//!
//! A [`StatusSource`] turns a directory into the list of [`StatusEntry`] pairs
//! the merge step colors assets with. The production source is
//! [`crate::core::git::GitStatusSource`]; tests inject fixed data through
//! [`StaticStatusSource`].
//!
//! # Line format
//! Each line is a two-character status code, one separator character and a
//! path: `XY PATH`. Lines shorter than three characters are skipped, as are
//! lines that cannot be sliced at those offsets. Nothing here is fatal.

use crate::core::{error::Result, state::StatusEntry};
use std::path::Path;

/// Produces status entries for a directory.
pub trait StatusSource: Send + Sync {
    /// Fetch the status entries for `directory`.
    ///
    /// An `Err` means "no status information"; the caller logs it and keeps
    /// going with default colors.
    fn fetch(&self, directory: &Path) -> Result<Vec<StatusEntry>>;
}

/// Parse one status line into an entry.
pub fn parse_status_line(line: &str) -> Option<StatusEntry> {
    if line.len() < 3 {
        return None;
    }
    let code = line.get(0..2)?;
    let name = line.get(3..)?;
    Some(StatusEntry::new(name, code))
}

/// Parse a whole status output, dropping lines that do not fit the format.
pub fn parse_porcelain(output: &str) -> Vec<StatusEntry> {
    output.lines().filter_map(parse_status_line).collect()
}

/// A status source returning the same entries for every directory.
#[derive(Debug, Clone, Default)]
pub struct StaticStatusSource {
    entries: Vec<StatusEntry>,
}

impl StaticStatusSource {
    pub fn new(entries: Vec<StatusEntry>) -> Self {
        Self { entries }
    }

    /// Build from `(name, code)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, code)| StatusEntry::new(name, code))
                .collect(),
        )
    }
}

impl StatusSource for StaticStatusSource {
    fn fetch(&self, _directory: &Path) -> Result<Vec<StatusEntry>> {
        Ok(self.entries.clone())
    }
}
