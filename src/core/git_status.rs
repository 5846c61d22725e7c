//! Type-safe porcelain status codes.
//!
//! This module defines [`StatusCode`], the typed form of the two-character
//! `XY` code that starts every `git status --porcelain` line. Only the codes the
//! engine colors are represented; everything else stays a raw string and falls
//! through to the default color.
//!
//! # Public API
//! - [`StatusCode`]: Enumeration of the recognised porcelain codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognised two-character porcelain status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// Untracked file (`??`)
    Untracked,
    /// Modified in the index (`M `)
    Modified,
    /// Added to the index (`A `)
    Added,
    /// Deleted from the index (`D `)
    Deleted,
    /// Renamed in the index (`R `)
    Renamed,
    /// Copied in the index (`C `)
    Copied,
    /// Unmerged (`U `)
    Unmerged,
}

impl StatusCode {
    /// Every recognised code, in legend order
    pub const ALL: [StatusCode; 7] = [
        StatusCode::Untracked,
        StatusCode::Modified,
        StatusCode::Added,
        StatusCode::Deleted,
        StatusCode::Renamed,
        StatusCode::Copied,
        StatusCode::Unmerged,
    ];

    /// Parse an exact two-character code. Anything unrecognised is `None`.
    pub fn from_code(code: &str) -> Option<StatusCode> {
        match code {
            "??" => Some(StatusCode::Untracked),
            "M " => Some(StatusCode::Modified),
            "A " => Some(StatusCode::Added),
            "D " => Some(StatusCode::Deleted),
            "R " => Some(StatusCode::Renamed),
            "C " => Some(StatusCode::Copied),
            "U " => Some(StatusCode::Unmerged),
            _ => None,
        }
    }

    /// The porcelain code exactly as git prints it
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Untracked => "??",
            StatusCode::Modified => "M ",
            StatusCode::Added => "A ",
            StatusCode::Deleted => "D ",
            StatusCode::Renamed => "R ",
            StatusCode::Copied => "C ",
            StatusCode::Unmerged => "U ",
        }
    }

    /// Get human-readable description for status
    pub fn description(&self) -> &'static str {
        match self {
            StatusCode::Untracked => "untracked",
            StatusCode::Modified => "modified",
            StatusCode::Added => "new",
            StatusCode::Deleted => "deleted",
            StatusCode::Renamed => "renamed",
            StatusCode::Copied => "copied",
            StatusCode::Unmerged => "unmerged",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
