//! # Argcheck
//!
//! Runtime validation of loosely typed inputs: numbers, strings, and
//! filesystem paths.
//!
//! ## Overview
//!
//! Each validator either returns the value in its required type or fails with
//! exactly one [`ValidationError`]. Errors are classified along two
//! independent axes, so callers can ask "was this a type problem?" and "was
//! this about a path?" without matching on concrete variants:
//!
//! - [`Kind`]: `TypeMismatch`, `ConversionFailure`, or `ValueMismatch`
//! - [`Domain`]: `Numeric`, `String`, or `Path`
//!
//! Validators run in one of two [`Mode`]s. Strict mode accepts only values
//! that already have the target type. Loose mode (the default) makes a single
//! conversion attempt towards the first allowed type.
//!
//! ## Core Types
//!
//! - [`Checker`]: entry point; every validator is a method on it
//! - [`Value`]: the dynamically typed input
//! - [`ValidationError`]: a single classified failure
//! - [`TypeSet`]: the allowed types for [`coerce::check_or_convert`]
//!
//! ## Example
//!
//! ```rust
//! use argcheck::{Checker, Domain, Kind, Mode};
//! use serde_json::json;
//!
//! let checker = Checker::new();
//!
//! // Loose mode converts when nothing is lost
//! assert_eq!(checker.integer(json!(4.0), "count", Mode::Loose).unwrap(), 4);
//!
//! // A lossy conversion is refused
//! let error = checker.integer(json!(4.5), "count", Mode::Loose).unwrap_err();
//! assert!(error.matches(Kind::ConversionFailure, Domain::Numeric));
//!
//! // Strict mode never converts
//! let error = checker.integer("4", "count", Mode::Strict).unwrap_err();
//! assert!(error.is_type_mismatch());
//! assert_eq!(error.message, "count must be an int");
//! ```

pub mod check;
pub mod coerce;
pub mod config;
pub mod error;
pub mod fs;
pub mod value;

pub use check::{Checker, NewPathOptions, PathOptions, RangeOptions, RealOptions};
pub use coerce::{ConversionError, Mode, TypeSet, TypeSpec};
pub use config::Config;
pub use error::{
    natural_list, BoxError, Domain, Kind, Operator, PathKind, Reason, Sign, ValidationError,
};
pub use fs::{FileSystem, StdFileSystem};
pub use value::{Complex, Number, Real, Value};

/// Result of a validation: the checked value or a single classified error.
pub type ValidationResult<T, E = ValidationError> = Result<T, E>;
