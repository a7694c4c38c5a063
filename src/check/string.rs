//! String validator.

use crate::coerce::{self, check_or_convert, Mode, TypeSet};
use crate::error::{Domain, ValidationError};
use crate::value::Value;
use crate::ValidationResult;

use super::Checker;

impl<F> Checker<F> {
    /// Checks that a value is already a string.
    ///
    /// There is no loose mode: turning an arbitrary value into text would
    /// change its meaning.
    ///
    /// # Example
    ///
    /// ```rust
    /// use argcheck::{Checker, Domain, Kind};
    ///
    /// let checker = Checker::new();
    /// assert_eq!(checker.string("abc", "label").unwrap(), "abc");
    ///
    /// let error = checker.string(42, "label").unwrap_err();
    /// assert!(error.matches(Kind::TypeMismatch, Domain::String));
    /// assert_eq!(error.message, "label must be a string");
    /// ```
    #[track_caller]
    pub fn string(&self, value: impl Into<Value>, name: &str) -> ValidationResult<String> {
        self.meta_name(name, "string")?;
        let types = TypeSet::of(coerce::STRING);
        match check_or_convert(
            value.into(),
            &types,
            name,
            Some("string"),
            Mode::Strict,
            Domain::String,
        )? {
            Value::Str(s) => Ok(s),
            other => Err(ValidationError::not_type(
                other,
                name,
                Domain::String,
                types.names(),
                Some("string"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::Kind;
    use std::path::PathBuf;

    #[test]
    fn test_string_accepts_strings() {
        let checker = Checker::new();
        assert_eq!(checker.string("", "x").unwrap(), "");
        assert_eq!(checker.string(String::from("hi"), "x").unwrap(), "hi");
    }

    #[test]
    fn test_string_never_converts() {
        let checker = Checker::new();
        for value in [Value::Int(1), Value::Path(PathBuf::from("a")), Value::None] {
            let error = checker.string(value.clone(), "x").unwrap_err();
            assert!(error.matches(Kind::TypeMismatch, Domain::String));
            assert_eq!(error.value, value);
            assert_eq!(error.supported_types(), Some(&["string"][..]));
        }
    }

    #[test]
    fn test_string_debug_mode_checks_name() {
        let checker = Checker::new().with_config(Config::debug_mode());
        let error = checker.string("abc", " ").unwrap_err();
        assert_eq!(error.code(), "empty");
        assert!(error.name.contains("argument of string"));
    }
}
