//! Core functionality for artchive.
//!
//! This module provides the asset-status engine (scanning, status parsing,
//! merging, publishing) plus the error, configuration and output helpers the
//! command-line front end builds on.

pub mod browser;
pub mod classifier;
pub mod colors;
pub mod config;
pub mod dirs;
pub mod error;
pub mod events;
pub mod git;
pub mod git_status;
pub mod index;
pub mod output;
pub mod scanner;
pub mod scheduler;
pub mod state;
pub mod status_source;
pub mod store;

// === Error handling ===
pub use error::{ArtchiveError, Result};

// === Data model ===
pub use git_status::StatusCode;
pub use state::{Asset, AssetColor, Listing, StatusEntry};

// === Engine components ===
pub use classifier::classify;
pub use git::GitStatusSource;
pub use index::AssetIndex;
pub use scanner::scan;
pub use scheduler::{merge, RecomputeHandle, RecomputeOutcome, RecomputeScheduler};
pub use status_source::{parse_porcelain, parse_status_line, StaticStatusSource, StatusSource};

// === Consumer-facing façade ===
pub use browser::AssetBrowser;
pub use config::Settings;
pub use events::{ChangeEvent, Observers};
pub use store::PathStore;

// === Terminal presentation ===
pub use colors::{format_asset_line, format_legend_line, paint, terminal_color};
pub use output::{print_error, print_info, print_section_header, print_success, print_warning};
