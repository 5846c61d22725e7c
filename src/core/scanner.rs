//! Non-recursive directory listing.

use crate::core::error::{ArtchiveError, Result};
use std::fs;
use std::path::Path;

/// List the names of the immediate children of `directory`.
///
/// Files and subdirectories alike, hidden entries included, in the order the
/// OS enumerates them. Fails with [`ArtchiveError::NotADirectory`] when the
/// path is missing or is not a directory.
pub fn scan(directory: &Path) -> Result<Vec<String>> {
    if !directory.is_dir() {
        return Err(ArtchiveError::not_a_directory(directory));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    log::debug!("Scanned {} entries in {}", names.len(), directory.display());
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_lists_files_and_directories() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("a.txt"), "a")?;
        fs::write(temp_dir.path().join(".hidden"), "h")?;
        fs::create_dir(temp_dir.path().join("sub"))?;
        fs::write(temp_dir.path().join("sub").join("nested.txt"), "n")?;

        let mut names = scan(temp_dir.path())?;
        names.sort();

        assert_eq!(names, vec![".hidden", "a.txt", "sub"]);
        Ok(())
    }

    #[test]
    fn test_scan_empty_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        assert!(scan(temp_dir.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn test_scan_missing_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let missing = temp_dir.path().join("missing");

        let result = scan(&missing);
        assert!(matches!(result, Err(ArtchiveError::NotADirectory { .. })));
        Ok(())
    }

    #[test]
    fn test_scan_regular_file_is_not_a_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x")?;

        let result = scan(&file);
        assert!(matches!(result, Err(ArtchiveError::NotADirectory { path }) if path == file));
        Ok(())
    }
}
