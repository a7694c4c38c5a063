//! Filesystem capability used by the path validators.
//!
//! Path checks never touch `std::fs` directly; they go through a [`FileSystem`]
//! so callers can substitute another backend (and tests can inject failures).

use std::io;
use std::path::{Component, Path, PathBuf};

/// Abstraction for the filesystem queries path validation needs.
///
/// Each method is a single query. No result is cached between calls.
pub trait FileSystem: Send + Sync {
    /// The error type for fallible queries.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns true if something exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns true if `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Returns true if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the entries of a directory.
    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>, Self::Error>;

    /// Returns the directory relative paths are resolved against.
    fn current_dir(&self) -> Result<PathBuf, Self::Error>;

    /// Resolves symlinks and `.`/`..` components of an absolute path.
    ///
    /// The path does not have to exist: the longest existing prefix is
    /// resolved through the filesystem and the remaining components are
    /// appended lexically. The result must be a fixed point, so resolving it
    /// again returns it unchanged.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf, Self::Error>;
}

/// The real filesystem, via `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    type Error = io::Error;

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_children(&self, path: &Path) -> Result<Vec<PathBuf>, Self::Error> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }

    fn current_dir(&self) -> Result<PathBuf, Self::Error> {
        std::env::current_dir()
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf, Self::Error> {
        let components: Vec<Component<'_>> = path.components().collect();
        for split in (1..=components.len()).rev() {
            let prefix: PathBuf = components[..split].iter().collect();
            // Missing or inaccessible prefixes fall through to a shorter one
            if let Ok(base) = std::fs::canonicalize(&prefix) {
                let rest: PathBuf = components[split..].iter().collect();
                return Ok(normalize(&base.join(rest)));
            }
        }
        Ok(normalize(path))
    }
}

/// Removes `.` and `..` components without touching the filesystem.
///
/// `..` at the root is dropped; leading `..` in a relative path is kept.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }
    normalized
}
