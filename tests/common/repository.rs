//! Git repository management and setup utilities
//!
//! Provides functions for creating and managing test repositories with various states
//! and configurations for comprehensive testing scenarios.

#![allow(dead_code)]

use artchive::core::error::{ArtchiveError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn git(repo_path: &Path, args: &[&str]) -> Result<()> {
    std::process::Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .map_err(ArtchiveError::Io)?;
    Ok(())
}

/// Sets up a fresh git repository for testing
///
/// Creates a temporary directory, initializes it as a git repository,
/// and sets up basic git configuration to avoid user prompts.
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Creates a file with specified content
pub fn create_file(dir: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(dir.join(filename), content)?;
    Ok(())
}

/// Adds a file to the git index ("." for everything)
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])
}

/// Creates a git commit with the specified message
pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message])
}

/// Removes a file from the filesystem (not from git)
pub fn remove_file(dir: &Path, filename: &str) -> Result<()> {
    fs::remove_file(dir.join(filename))?;
    Ok(())
}

/// Creates multiple test files with sequential content
pub fn create_test_files(dir: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("content{}\nline 2\n", i + 1);
        create_file(dir, filename, &content)?;
    }
    Ok(())
}

/// Modifies multiple test files with new content
pub fn modify_test_files(dir: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("modified{}\nline 2\nnew line\n", i + 1);
        create_file(dir, filename, &content)?;
    }
    Ok(())
}

/// A plain directory with the given files, outside any repository
pub fn setup_plain_dir(filenames: &[&str]) -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    create_test_files(temp_dir.path(), filenames)?;
    Ok(temp_dir)
}
