//! Data structures shared between the engine and its readers.
//!
//! # Public API
//! - [`AssetColor`]: Symbolic display color of an asset
//! - [`Asset`]: One directory entry paired with its color
//! - [`StatusEntry`]: One parsed status line, consumed during merge
//! - [`Listing`]: A published set of assets with the generation that produced it
//!
//! Colors stay symbolic here. Turning them into terminal colors is the
//! presentation layer's job (see [`crate::core::colors`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Symbolic display color for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetColor {
    /// No matching status entry
    #[default]
    Black,
    Magenta,
    Yellow,
    Green,
    Red,
    Blue,
    Cyan,
}

impl AssetColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetColor::Black => "black",
            AssetColor::Magenta => "magenta",
            AssetColor::Yellow => "yellow",
            AssetColor::Green => "green",
            AssetColor::Red => "red",
            AssetColor::Blue => "blue",
            AssetColor::Cyan => "cyan",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == AssetColor::Black
    }
}

impl fmt::Display for AssetColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub color: AssetColor,
}

impl Asset {
    pub fn new(name: impl Into<String>, color: AssetColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// A single `(name, code)` pair parsed from status output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub name: String,
    pub code: String,
}

impl StatusEntry {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// The unit readers observe. Replaced wholesale on every publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Recompute generation that produced this listing, 0 before the first publish
    pub generation: u64,
    pub directory: Option<PathBuf>,
    pub published_at: DateTime<Utc>,
    pub assets: Vec<Asset>,
}

impl Listing {
    pub fn empty() -> Self {
        Self {
            generation: 0,
            directory: None,
            published_at: Utc::now(),
            assets: Vec::new(),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.assets.iter().map(|asset| asset.name.clone()).collect()
    }

    pub fn colors(&self) -> Vec<AssetColor> {
        self.assets.iter().map(|asset| asset.color).collect()
    }
}
