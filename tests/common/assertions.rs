//! Common assertion helpers for test output validation
//!
//! Provides predicates and assertion utilities for validating artchive
//! command output, error messages, and expected behaviors.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for the missing-directory error
pub fn not_a_directory() -> impl Predicate<str> {
    predicates::str::contains("not a directory")
}

/// Creates a predicate that checks for the no-selection error
pub fn no_directory_selected() -> impl Predicate<str> {
    predicates::str::contains("No directory selected")
}

/// Creates a predicate that checks for numbered asset indices
pub fn has_asset_index(index: u32) -> impl Predicate<str> {
    predicates::str::contains(format!("[{}]", index))
}

/// Creates a predicate that checks for the degraded-status warning
pub fn status_unavailable() -> impl Predicate<str> {
    predicates::str::contains("No git status available")
}
