//! Path validators.
//!
//! Every path is coerced first, then resolved to an absolute form unless the
//! caller opts out. Existence is always checked before kind, and kind before
//! emptiness. All errors carry the resolved path.

use std::path::PathBuf;

use crate::coerce::{self, check_or_convert, Mode, TypeSet};
use crate::error::{Domain, PathKind, ValidationError};
use crate::fs::FileSystem;
use crate::value::Value;
use crate::ValidationResult;

use super::Checker;

/// Options for [`Checker::path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathOptions {
    /// Strict or loose type handling.
    pub mode: Mode,
    /// Make the path absolute and resolve symlinks and `.`/`..`.
    pub resolve: bool,
}

impl PathOptions {
    /// Disables string to path conversion.
    pub fn strict(mut self) -> Self {
        self.mode = Mode::Strict;
        self
    }

    /// Returns the path as given, without resolving it.
    pub fn unresolved(mut self) -> Self {
        self.resolve = false;
        self
    }
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Loose,
            resolve: true,
        }
    }
}

/// Options for [`Checker::new_file`] and [`Checker::new_folder`].
///
/// # Example
///
/// ```rust
/// use argcheck::{Checker, NewPathOptions};
///
/// let dir = tempfile::tempdir().unwrap();
/// let checker = Checker::new();
///
/// // The folder exists, which is fine once `exist_ok` is set
/// let options = NewPathOptions::default().exist_ok();
/// assert!(checker.new_folder(dir.path(), "out", options).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPathOptions {
    /// Strict or loose type handling.
    pub mode: Mode,
    /// Accept a target that already exists with the right kind.
    pub exist_ok: bool,
    /// Require an existing target folder to be empty.
    pub require_empty: bool,
}

impl NewPathOptions {
    /// Disables string to path conversion.
    pub fn strict(mut self) -> Self {
        self.mode = Mode::Strict;
        self
    }

    /// Accepts an existing target.
    pub fn exist_ok(mut self) -> Self {
        self.exist_ok = true;
        self
    }

    /// Accepts an existing folder that already has entries.
    pub fn allow_non_empty(mut self) -> Self {
        self.require_empty = false;
        self
    }
}

impl Default for NewPathOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Loose,
            exist_ok: false,
            require_empty: true,
        }
    }
}

impl<F: FileSystem> Checker<F> {
    /// Coerces a value to a path.
    ///
    /// In loose mode strings are accepted. With `resolve` set the path is made
    /// absolute against the current directory, then symlinks and `.`/`..` are
    /// resolved through [`FileSystem::canonicalize`]. Components that do not
    /// exist yet are resolved lexically, and resolving a resolved path returns
    /// it unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use argcheck::{Checker, PathOptions};
    ///
    /// let checker = Checker::new();
    /// let path = checker.path("a/./b/../c", "input", PathOptions::default()).unwrap();
    ///
    /// assert!(path.is_absolute());
    /// assert!(path.ends_with("a/c"));
    /// ```
    #[track_caller]
    pub fn path(
        &self,
        value: impl Into<Value>,
        name: &str,
        options: PathOptions,
    ) -> ValidationResult<PathBuf> {
        self.meta_name(name, "path")?;
        self.coerce_path(value.into(), name, options.mode, options.resolve)
    }

    /// Requires an existing regular file.
    #[track_caller]
    pub fn existing_file(
        &self,
        value: impl Into<Value>,
        name: &str,
        mode: Mode,
    ) -> ValidationResult<PathBuf> {
        self.meta_name(name, "existing_file")?;
        let path = self.coerce_path(value.into(), name, mode, true)?;
        self.existing(path, name, PathKind::File)
    }

    /// Requires an existing folder.
    ///
    /// # Example
    ///
    /// ```rust
    /// use argcheck::{Checker, Mode, PathKind};
    ///
    /// let checker = Checker::new();
    /// let error = checker
    ///     .existing_folder("no/such/folder", "data", Mode::Loose)
    ///     .unwrap_err();
    ///
    /// assert_eq!(error.code(), "not_found");
    /// assert_eq!(error.expected_kind(), Some(PathKind::Folder));
    /// assert!(error.message.starts_with("data does not exist\nPath: "));
    /// ```
    #[track_caller]
    pub fn existing_folder(
        &self,
        value: impl Into<Value>,
        name: &str,
        mode: Mode,
    ) -> ValidationResult<PathBuf> {
        self.meta_name(name, "existing_folder")?;
        let path = self.coerce_path(value.into(), name, mode, true)?;
        self.existing(path, name, PathKind::Folder)
    }

    /// Requires a path where a new file can be created.
    ///
    /// With `exist_ok`, an existing regular file is accepted but an existing
    /// folder is not. `require_empty` does not apply to files.
    #[track_caller]
    pub fn new_file(
        &self,
        value: impl Into<Value>,
        name: &str,
        options: NewPathOptions,
    ) -> ValidationResult<PathBuf> {
        self.meta_name(name, "new_file")?;
        let path = self.coerce_path(value.into(), name, options.mode, true)?;
        self.create_target(path, name, PathKind::File, options.exist_ok)
            .map(|(path, _)| path)
    }

    /// Requires a path where a new folder can be created.
    ///
    /// With `exist_ok`, an existing folder is accepted and must then be empty
    /// unless `require_empty` is relaxed. An existing file is always rejected
    /// as the wrong kind, before emptiness is considered.
    #[track_caller]
    pub fn new_folder(
        &self,
        value: impl Into<Value>,
        name: &str,
        options: NewPathOptions,
    ) -> ValidationResult<PathBuf> {
        self.meta_name(name, "new_folder")?;
        let path = self.coerce_path(value.into(), name, options.mode, true)?;
        let (path, existed) =
            self.create_target(path, name, PathKind::Folder, options.exist_ok)?;

        if existed && options.require_empty {
            let children = self
                .fs
                .list_children(&path)
                .map_err(|e| ValidationError::unreadable(&path, name, e))?;
            tracing::trace!(path = %path.display(), entries = children.len(), "listed folder");
            if !children.is_empty() {
                return Err(ValidationError::not_empty(&path, name));
            }
        }
        Ok(path)
    }

    fn coerce_path(
        &self,
        value: Value,
        name: &str,
        mode: Mode,
        resolve: bool,
    ) -> ValidationResult<PathBuf> {
        let types = TypeSet::of(coerce::PATH);
        let path = match check_or_convert(value, &types, name, None, mode, Domain::Path)? {
            Value::Path(path) => path,
            other => {
                return Err(ValidationError::not_type(
                    other,
                    name,
                    Domain::Path,
                    types.names(),
                    None,
                ))
            }
        };
        if resolve {
            self.resolve(path, name)
        } else {
            Ok(path)
        }
    }

    fn resolve(&self, path: PathBuf, name: &str) -> ValidationResult<PathBuf> {
        let absolute = if path.is_absolute() {
            path
        } else {
            match self.fs.current_dir() {
                Ok(base) => base.join(path),
                Err(e) => return Err(unresolvable(path, name, e)),
            }
        };
        match self.fs.canonicalize(&absolute) {
            Ok(resolved) => {
                tracing::trace!(path = %resolved.display(), "resolved path");
                Ok(resolved)
            }
            Err(e) => Err(unresolvable(absolute, name, e)),
        }
    }

    fn existing(&self, path: PathBuf, name: &str, kind: PathKind) -> ValidationResult<PathBuf> {
        let exists = self.fs.exists(&path);
        tracing::trace!(path = %path.display(), exists, "checked existence");
        if !exists {
            return Err(ValidationError::not_found(&path, name, kind));
        }
        self.require_kind(path, name, kind)
    }

    /// Returns the path and whether it already existed.
    fn create_target(
        &self,
        path: PathBuf,
        name: &str,
        kind: PathKind,
        exist_ok: bool,
    ) -> ValidationResult<(PathBuf, bool)> {
        let exists = self.fs.exists(&path);
        tracing::trace!(path = %path.display(), exists, "checked existence");
        if !exists {
            return Ok((path, false));
        }
        if !exist_ok {
            return Err(ValidationError::already_exists(&path, name, kind));
        }
        self.require_kind(path, name, kind).map(|path| (path, true))
    }

    fn require_kind(&self, path: PathBuf, name: &str, kind: PathKind) -> ValidationResult<PathBuf> {
        let matches = match kind {
            PathKind::File => self.fs.is_file(&path),
            PathKind::Folder => self.fs.is_dir(&path),
        };
        if matches {
            Ok(path)
        } else {
            Err(ValidationError::wrong_kind(&path, name, kind))
        }
    }
}

fn unresolvable<E>(path: PathBuf, name: &str, source: E) -> ValidationError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ValidationError::cannot_convert(
        Value::Path(path),
        name,
        Domain::Path,
        "absolute path",
        source,
    )
}
