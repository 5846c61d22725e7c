//! Persisted last-used directory.
//!
//! [`PathStore`] keeps a single text value in `directory_path.txt` under the
//! per-user config directory. Writes go to a sibling temporary file that is
//! restricted to the owner and then renamed over the target, so a reader never
//! sees a partially written value.
//!
//! The path is stored as its raw bytes on Unix, so names that are not valid
//! UTF-8 or that carry surrounding whitespace survive a round trip.

use crate::core::dirs::get_config_directory;
use crate::core::error::{ArtchiveError, Result};
use std::fs;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

pub const STORE_FILE_NAME: &str = "directory_path.txt";

/// Distinguishes temporary files of concurrent saves within one process
static SAVE_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStore {
    file: PathBuf,
}

impl PathStore {
    pub fn with_file(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::with_file(
            get_config_directory()?.join(STORE_FILE_NAME),
        ))
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Read the stored directory.
    ///
    /// The last line that is not blank wins, with only its line terminator
    /// removed. An empty file yields `Ok(None)`; a missing or unreadable one is
    /// `PersistedPathUnavailable`.
    pub fn load(&self) -> Result<Option<PathBuf>> {
        let content = fs::read(&self.file)
            .map_err(|e| ArtchiveError::persisted_path_unavailable(&self.file, e))?;

        Ok(content
            .split(|byte| *byte == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
            .last()
            .map(path_from_bytes))
    }

    /// Atomically replace the stored directory.
    pub fn save(&self, directory: &Path) -> Result<()> {
        self.write_atomically(directory)
            .map_err(|e| ArtchiveError::persisted_path_write_failed(&self.file, e))
    }

    fn write_atomically(&self, directory: &Path) -> std::io::Result<()> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_file = self.temp_file();
        let result = (|| {
            let mut file = fs::File::create(&temp_file)?;
            restrict_to_owner(&temp_file);
            file.write_all(&path_to_bytes(directory))?;
            file.write_all(b"\n")?;
            file.sync_all()?;
            fs::rename(&temp_file, &self.file)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_file);
        }
        result
    }

    fn temp_file(&self) -> PathBuf {
        let mut name = self
            .file
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| OsString::from(STORE_FILE_NAME));
        name.push(format!(
            ".{}.{}.tmp",
            std::process::id(),
            SAVE_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        self.file.with_file_name(name)
    }
}

#[cfg(unix)]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_to_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Best-effort: limit `path` to read/write by the current user.
pub fn restrict_to_owner(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
            log::warn!("Failed to restrict permissions on {}: {e}", path.display());
        }
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}
