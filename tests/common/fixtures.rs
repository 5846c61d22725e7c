//! Test data generation utilities and predefined scenarios
//!
//! Provides functions for creating repositories with specific file states
//! to test status coloring consistently.

#![allow(dead_code)]

use super::repository::*;
use artchive::core::error::Result;

/// Scenario: `a.txt` staged modification, `b.txt` clean, `c.txt` untracked
pub fn create_abc_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_test_files(&repo.path, &["a.txt", "b.txt"])?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    modify_test_files(&repo.path, &["a.txt"])?;
    git_add(&repo.path, "a.txt")?;
    create_file(&repo.path, "c.txt", "untracked\n")?;

    Ok(repo)
}

/// Scenario: one file for every colored status
///
/// - `added.txt` staged new file
/// - `deleted.txt` staged deletion, absent from the directory itself
/// - `modified.txt` staged modification
/// - `untracked.txt` untracked
/// - `clean.txt` committed and unchanged
pub fn create_mixed_status_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_test_files(&repo.path, &["modified.txt", "clean.txt", "deleted.txt"])?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    modify_test_files(&repo.path, &["modified.txt"])?;
    git_add(&repo.path, "modified.txt")?;

    remove_file(&repo.path, "deleted.txt")?;
    git_add(&repo.path, "deleted.txt")?;

    create_file(&repo.path, "added.txt", "new\n")?;
    git_add(&repo.path, "added.txt")?;

    create_file(&repo.path, "untracked.txt", "loose\n")?;

    Ok(repo)
}
