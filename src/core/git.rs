//! Git-backed status source.
//!
//! [`GitStatusSource`] runs `git status --porcelain=v1` directly (argument
//! array, never a shell string) with the working directory set to the target,
//! parses the output and rewrites the repository-relative paths so they can be
//! matched against the target directory's own entry names.
//!
//! # Normalisation
//! - `R  old -> new` and `C  old -> new` keep the destination name
//! - C-style quoted paths (`"with space.txt"`) are unquoted
//! - A trailing `/` (untracked directories) is removed
//! - The target's prefix inside the work tree, found with `git2`, is stripped;
//!   entries outside the target directory are dropped
//! - An entry naming the target itself or one of its ancestors (an untracked
//!   directory is reported once, not per file) applies to every entry of the
//!   target

use crate::core::{
    error::{ArtchiveError, Result},
    scanner,
    state::StatusEntry,
    status_source::{parse_porcelain, StatusSource},
};
use git2::{ErrorCode, Repository};
use std::path::{Path, PathBuf};
use std::process::Command;

const STATUS_ARGS: [&str; 7] = [
    "-c",
    "color.status=false",
    "-c",
    "core.quotepath=false",
    "status",
    "--porcelain=v1",
    "--untracked-files=normal",
];

#[derive(Debug, Clone)]
pub struct GitStatusSource {
    git_binary: String,
}

impl Default for GitStatusSource {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitStatusSource {
    pub fn new(git_binary: impl Into<String>) -> Self {
        Self {
            git_binary: git_binary.into(),
        }
    }

    fn command_line(&self) -> String {
        format!("{} status --porcelain=v1", self.git_binary)
    }

    /// Run the status command in `directory` and return its raw stdout
    fn run_status(&self, directory: &Path) -> Result<String> {
        let mut cmd = Command::new(&self.git_binary);
        cmd.args(STATUS_ARGS).current_dir(directory);

        let output = cmd
            .output()
            .map_err(|e| ArtchiveError::status_command_failed(self.command_line(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ArtchiveError::status_command_failed(
                self.command_line(),
                format!("{}: {}", output.status, stderr.trim()),
            ));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            ArtchiveError::status_command_failed(
                self.command_line(),
                format!("output is not valid UTF-8: {e}"),
            )
        })
    }
}

impl StatusSource for GitStatusSource {
    fn fetch(&self, directory: &Path) -> Result<Vec<StatusEntry>> {
        let stdout = self.run_status(directory)?;
        let parsed = parse_porcelain(&stdout);
        let prefix = workdir_prefix(directory).unwrap_or_else(|e| {
            log::warn!(
                "Matching status paths as-is, work tree lookup failed for {}: {e}",
                directory.display()
            );
            None
        });

        log::debug!(
            "Parsed {} status entries for {} (work tree prefix: {:?})",
            parsed.len(),
            directory.display(),
            prefix
        );

        let mut entries = Vec::with_capacity(parsed.len());
        for entry in parsed {
            match normalize_entry(entry, prefix.as_deref()) {
                NormalizedEntry::Child(entry) => entries.push(entry),
                NormalizedEntry::WholeTarget { code } => {
                    log::debug!("Status {code:?} covers all of {}", directory.display());
                    entries.extend(
                        scanner::scan(directory)?
                            .into_iter()
                            .map(|name| StatusEntry::new(name, code.clone())),
                    );
                }
                NormalizedEntry::Outside => {}
            }
        }
        Ok(entries)
    }
}

/// Where a status entry lands relative to the target directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedEntry {
    /// An entry of the target, renamed relative to it
    Child(StatusEntry),
    /// The entry is the target or one of its ancestors; its code holds for
    /// everything inside
    WholeTarget { code: String },
    Outside,
}

/// Location of `directory` relative to the root of the work tree containing it.
///
/// `Ok(None)` when there is no work tree around `directory`.
pub fn workdir_prefix(directory: &Path) -> Result<Option<PathBuf>> {
    let repo = match Repository::discover(directory) {
        Ok(repo) => repo,
        Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let Some(workdir) = repo.workdir() else {
        return Ok(None);
    };

    let workdir = workdir.canonicalize()?;
    let target = directory.canonicalize()?;
    Ok(target.strip_prefix(&workdir).ok().map(Path::to_path_buf))
}

/// Rewrite a parsed entry so its name is relative to the target directory.
pub fn normalize_entry(entry: StatusEntry, prefix: Option<&Path>) -> NormalizedEntry {
    let StatusEntry { name, code } = entry;

    let name = if is_rename_or_copy(&code) {
        name.split_once(" -> ")
            .map(|(_, destination)| destination.to_string())
            .unwrap_or(name)
    } else {
        name
    };
    let name = unquote_path(&name);
    let name = name.strip_suffix('/').unwrap_or(&name).to_string();

    let prefix = match prefix {
        Some(prefix) if !prefix.as_os_str().is_empty() => prefix,
        _ => return NormalizedEntry::Child(StatusEntry { name, code }),
    };

    let prefix = prefix.to_string_lossy().replace('\\', "/");
    if is_same_or_ancestor(&name, &prefix) {
        return NormalizedEntry::WholeTarget { code };
    }

    match name
        .strip_prefix(prefix.as_str())
        .and_then(|rest| rest.strip_prefix('/'))
    {
        Some(relative) => NormalizedEntry::Child(StatusEntry::new(relative, code)),
        None => NormalizedEntry::Outside,
    }
}

/// Whether `name` is `prefix` itself or a directory above it
fn is_same_or_ancestor(name: &str, prefix: &str) -> bool {
    !name.is_empty()
        && prefix
            .strip_prefix(name)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn is_rename_or_copy(code: &str) -> bool {
    code.contains('R') || code.contains('C')
}

/// Undo git's C-style path quoting. Unquoted input is returned unchanged.
pub fn unquote_path(raw: &str) -> String {
    let inner = match raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner,
        None => return raw.to_string(),
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => bytes.push(b'\n'),
            Some('t') => bytes.push(b'\t'),
            Some('r') => bytes.push(b'\r'),
            Some('a') => bytes.push(0x07),
            Some('b') => bytes.push(0x08),
            Some('f') => bytes.push(0x0c),
            Some('v') => bytes.push(0x0b),
            Some(d @ '0'..='7') => {
                // Three-digit octal byte
                let mut value = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                bytes.push(value as u8);
            }
            Some(other) => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
            None => bytes.push(b'\\'),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
