//! Validation entry points.
//!
//! Every validator is a method on [`Checker`], which carries the [`Config`] and
//! the [`FileSystem`] capability for the call. Each method takes the value, a
//! name used in messages (conventionally `"input"`), and its domain options,
//! and returns either the validated value or exactly one [`ValidationError`].
//!
//! # Example
//!
//! ```rust
//! use argcheck::{Checker, Mode, RangeOptions};
//!
//! let checker = Checker::new();
//!
//! let count = checker.integer("12", "count", Mode::Loose).unwrap();
//! assert_eq!(count, 12);
//!
//! let error = checker
//!     .in_range(count, 0, 10, "count", RangeOptions::default())
//!     .unwrap_err();
//! assert_eq!(error.message, "count (12) must be less than or equal to 10");
//! ```

mod compare;
mod numeric;
mod path;
mod string;

pub use compare::RangeOptions;
pub use numeric::RealOptions;
pub use path::{NewPathOptions, PathOptions};

use std::panic::Location;

use crate::coerce::{self, Mode, TypeSet};
use crate::config::Config;
use crate::error::{Domain, ValidationError};
use crate::fs::{FileSystem, StdFileSystem};
use crate::value::{Real, Value};
use crate::ValidationResult;

/// Entry point for all validators.
///
/// `Checker` is cheap to build and holds no mutable state, so one instance can
/// be shared across threads and reused for any number of calls.
///
/// # Example
///
/// ```rust
/// use argcheck::{Checker, Config, Kind};
///
/// // Debug mode also validates the arguments of each call
/// let checker = Checker::new().with_config(Config::debug_mode());
///
/// let error = checker.string("abc", "").unwrap_err();
/// assert_eq!(error.kind(), Kind::ValueMismatch);
/// assert!(error.name.starts_with("`name` argument of string"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Checker<F = StdFileSystem> {
    config: Config,
    fs: F,
}

impl Checker {
    /// Creates a checker with the default configuration and the real filesystem.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F> Checker<F> {
    /// Replaces the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replaces the filesystem used by the path validators.
    pub fn with_filesystem<G: FileSystem>(self, fs: G) -> Checker<G> {
        Checker {
            config: self.config,
            fs,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the filesystem used by the path validators.
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Generic check-or-convert against an explicit type set.
    ///
    /// See [`coerce::check_or_convert`] for the algorithm. In debug mode the
    /// name and a supplied description must be non-empty.
    #[track_caller]
    pub fn check_or_convert(
        &self,
        value: impl Into<Value>,
        types: &TypeSet,
        name: &str,
        description: Option<&str>,
        mode: Mode,
        domain: Domain,
    ) -> ValidationResult<Value> {
        self.meta_name(name, "check_or_convert")?;
        if let Some(description) = description {
            self.meta_text(description, "description", "check_or_convert")?;
        }
        coerce::check_or_convert(value.into(), types, name, description, mode, domain)
    }

    /// Requires a non-empty input name in debug mode.
    #[track_caller]
    pub(crate) fn meta_name(&self, name: &str, operation: &'static str) -> ValidationResult<()> {
        self.meta_text(name, "name", operation)
    }

    #[track_caller]
    fn meta_text(
        &self,
        text: &str,
        argument: &'static str,
        operation: &'static str,
    ) -> ValidationResult<()> {
        if self.config.debug && text.trim().is_empty() {
            return Err(ValidationError::empty(
                Value::from(text),
                meta_label(argument, operation),
            ));
        }
        Ok(())
    }

    /// Requires a comparison bound that is not NaN in debug mode.
    #[track_caller]
    pub(crate) fn meta_bound(
        &self,
        bound: Real,
        argument: &'static str,
        operation: &'static str,
    ) -> ValidationResult<()> {
        if self.config.debug && bound.is_nan() {
            return Err(ValidationError::is_nan(
                bound.into(),
                meta_label(argument, operation),
            ));
        }
        Ok(())
    }

    /// Requires `min <= max` in debug mode.
    #[track_caller]
    pub(crate) fn meta_ordered(
        &self,
        min: Real,
        max: Real,
        operation: &'static str,
    ) -> ValidationResult<()> {
        if self.config.debug && min > max {
            return Err(ValidationError::not_less_equal(
                min,
                meta_label("min", operation),
                max,
            ));
        }
        Ok(())
    }
}

/// Names a meta-argument and the call site that supplied it.
#[track_caller]
fn meta_label(argument: &str, operation: &str) -> String {
    format!(
        "`{}` argument of {} (called at {})",
        argument,
        operation,
        Location::caller()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::{FLOAT, INT};
    use crate::error::Kind;

    #[test]
    fn test_release_mode_skips_meta_checks() {
        let checker = Checker::new();
        assert_eq!(checker.integer(3, "", Mode::Strict).unwrap(), 3);
    }

    #[test]
    fn test_debug_mode_rejects_empty_name() {
        let checker = Checker::new().with_config(Config::debug_mode());
        let error = checker.integer(3, "  ", Mode::Strict).unwrap_err();

        assert!(error.matches(Kind::ValueMismatch, Domain::String));
        assert_eq!(error.code(), "empty");
        assert!(error.name.starts_with("`name` argument of integer (called at "));
        assert!(error.name.contains(file!()));
    }

    #[test]
    fn test_meta_checks_run_before_the_value() {
        let checker = Checker::new().with_config(Config::debug_mode());
        // The value is invalid too, but the empty name is reported
        let error = checker.integer("x", "", Mode::Strict).unwrap_err();
        assert!(error.is_string());
    }

    #[test]
    fn test_debug_mode_rejects_empty_description() {
        let checker = Checker::new().with_config(Config::debug_mode());
        let types = TypeSet::of(INT).or(FLOAT);
        let error = checker
            .check_or_convert(1, &types, "x", Some(""), Mode::Strict, Domain::Numeric)
            .unwrap_err();
        assert!(error.name.starts_with("`description` argument of check_or_convert"));
    }

    #[test]
    fn test_check_or_convert_passes_through() {
        let checker = Checker::new();
        let types = TypeSet::of(INT);
        let value = checker
            .check_or_convert(5, &types, "x", None, Mode::Strict, Domain::Numeric)
            .unwrap();
        assert_eq!(value, Value::Int(5));
    }
}
