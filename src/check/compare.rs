//! Comparison, range and sign checks on real-valued numbers.

use crate::error::{Operator, Sign, ValidationError};
use crate::value::Real;
use crate::ValidationResult;

use super::Checker;

/// Options for [`Checker::in_range`].
///
/// Both bounds are inclusive by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOptions {
    /// Accept a value equal to `min`.
    pub include_min: bool,
    /// Accept a value equal to `max`.
    pub include_max: bool,
}

impl RangeOptions {
    /// Both bounds inclusive.
    pub fn inclusive() -> Self {
        Self::default()
    }

    /// Both bounds exclusive.
    pub fn exclusive() -> Self {
        Self {
            include_min: false,
            include_max: false,
        }
    }

    /// Makes the lower bound exclusive.
    pub fn exclude_min(mut self) -> Self {
        self.include_min = false;
        self
    }

    /// Makes the upper bound exclusive.
    pub fn exclude_max(mut self) -> Self {
        self.include_max = false;
        self
    }
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            include_min: true,
            include_max: true,
        }
    }
}

impl<F> Checker<F> {
    /// Requires `value < bound`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use argcheck::{Checker, Operator};
    ///
    /// let checker = Checker::new();
    /// assert!(checker.less(1, 2.5, "x").is_ok());
    ///
    /// let error = checker.less(3, 2, "x").unwrap_err();
    /// assert_eq!(error.message, "x (3) must be less than 2");
    /// assert_eq!(error.operator(), Some(Operator::Less));
    /// ```
    #[track_caller]
    pub fn less(
        &self,
        value: impl Into<Real>,
        bound: impl Into<Real>,
        name: &str,
    ) -> ValidationResult<Real> {
        self.meta_name(name, "less")?;
        self.compare(value.into(), Operator::Less, bound.into(), name, "less")
    }

    /// Requires `value <= bound`.
    #[track_caller]
    pub fn less_equal(
        &self,
        value: impl Into<Real>,
        bound: impl Into<Real>,
        name: &str,
    ) -> ValidationResult<Real> {
        self.meta_name(name, "less_equal")?;
        self.compare(value.into(), Operator::LessEqual, bound.into(), name, "less_equal")
    }

    /// Requires `value > bound`.
    #[track_caller]
    pub fn greater(
        &self,
        value: impl Into<Real>,
        bound: impl Into<Real>,
        name: &str,
    ) -> ValidationResult<Real> {
        self.meta_name(name, "greater")?;
        self.compare(value.into(), Operator::Greater, bound.into(), name, "greater")
    }

    /// Requires `value >= bound`.
    #[track_caller]
    pub fn greater_equal(
        &self,
        value: impl Into<Real>,
        bound: impl Into<Real>,
        name: &str,
    ) -> ValidationResult<Real> {
        self.meta_name(name, "greater_equal")?;
        self.compare(
            value.into(),
            Operator::GreaterEqual,
            bound.into(),
            name,
            "greater_equal",
        )
    }

    /// Requires `value` to lie between `min` and `max`.
    ///
    /// The lower bound is checked first, so a value violating both reports the
    /// lower bound.
    ///
    /// # Example
    ///
    /// ```rust
    /// use argcheck::{Checker, RangeOptions};
    ///
    /// let checker = Checker::new();
    /// let error = checker
    ///     .in_range(5, 5, 10, "x", RangeOptions::default().exclude_min())
    ///     .unwrap_err();
    /// assert_eq!(error.code(), "not_greater");
    /// ```
    #[track_caller]
    pub fn in_range(
        &self,
        value: impl Into<Real>,
        min: impl Into<Real>,
        max: impl Into<Real>,
        name: &str,
        options: RangeOptions,
    ) -> ValidationResult<Real> {
        let (value, min, max) = (value.into(), min.into(), max.into());
        self.meta_name(name, "in_range")?;
        self.meta_bound(min, "min", "in_range")?;
        self.meta_bound(max, "max", "in_range")?;
        self.meta_ordered(min, max, "in_range")?;

        let lower = if options.include_min {
            Operator::GreaterEqual
        } else {
            Operator::Greater
        };
        let upper = if options.include_max {
            Operator::LessEqual
        } else {
            Operator::Less
        };

        if !lower.holds(value, min) {
            return Err(ValidationError::comparison(value, name, lower, min));
        }
        if !upper.holds(value, max) {
            return Err(ValidationError::comparison(value, name, upper, max));
        }
        Ok(value)
    }

    /// Requires `value > 0`, or `value >= 0` when `allow_zero` is set.
    ///
    /// # Example
    ///
    /// ```rust
    /// use argcheck::{Checker, Sign};
    ///
    /// let checker = Checker::new();
    /// assert!(checker.positive(0, "x", true).is_ok());
    ///
    /// let error = checker.positive(0, "x", false).unwrap_err();
    /// assert!(error.is_sign() && error.is_comparison());
    /// assert_eq!(error.sign(), Some(Sign::Positive));
    /// ```
    #[track_caller]
    pub fn positive(
        &self,
        value: impl Into<Real>,
        name: &str,
        allow_zero: bool,
    ) -> ValidationResult<Real> {
        self.meta_name(name, "positive")?;
        check_sign(value.into(), name, Sign::Positive, allow_zero)
    }

    /// Requires `value < 0`, or `value <= 0` when `allow_zero` is set.
    #[track_caller]
    pub fn negative(
        &self,
        value: impl Into<Real>,
        name: &str,
        allow_zero: bool,
    ) -> ValidationResult<Real> {
        self.meta_name(name, "negative")?;
        check_sign(value.into(), name, Sign::Negative, allow_zero)
    }

    #[track_caller]
    fn compare(
        &self,
        value: Real,
        operator: Operator,
        bound: Real,
        name: &str,
        operation: &'static str,
    ) -> ValidationResult<Real> {
        self.meta_bound(bound, "bound", operation)?;
        if operator.holds(value, bound) {
            Ok(value)
        } else {
            Err(ValidationError::comparison(value, name, operator, bound))
        }
    }
}

fn check_sign(value: Real, name: &str, sign: Sign, allow_zero: bool) -> ValidationResult<Real> {
    if sign.operator(allow_zero).holds(value, Real::ZERO) {
        Ok(value)
    } else {
        Err(ValidationError::wrong_sign(value, name, sign, allow_zero))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_each_operator_maps_to_its_error() {
        let checker = Checker::new();
        let cases = [
            (checker.less(2, 1, "x"), "not_less", "x (2) must be less than 1"),
            (
                checker.less_equal(2, 1, "x"),
                "not_less_equal",
                "x (2) must be less than or equal to 1",
            ),
            (checker.greater(1, 2, "x"), "not_greater", "x (1) must be greater than 2"),
            (
                checker.greater_equal(1, 2, "x"),
                "not_greater_equal",
                "x (1) must be greater than or equal to 2",
            ),
        ];
        for (result, code, message) in cases {
            let error = result.unwrap_err();
            assert_eq!(error.code(), code);
            assert_eq!(error.message, message);
            assert!(error.is_comparison());
            assert!(!error.is_sign());
        }
    }

    #[test]
    fn test_boundaries() {
        let checker = Checker::new();
        assert!(checker.less_equal(1, 1, "x").is_ok());
        assert!(checker.greater_equal(1.0, 1, "x").is_ok());
        assert!(checker.less(1, 1, "x").is_err());
        assert!(checker.greater(1, 1.0, "x").is_err());
    }

    #[test]
    fn test_comparisons_return_the_value() {
        let checker = Checker::new();
        assert_eq!(checker.less(0.5, 1, "x").unwrap(), Real::Float(0.5));
    }

    #[test]
    fn test_nan_never_satisfies_a_comparison() {
        let checker = Checker::new();
        assert!(checker.less(f64::NAN, 1, "x").is_err());
        assert!(checker.greater_equal(f64::NAN, 1, "x").is_err());
        assert!(checker.positive(f64::NAN, "x", true).is_err());
    }

    #[test]
    fn test_in_range_inclusive_and_exclusive() {
        let checker = Checker::new();
        assert!(checker.in_range(5, 5, 10, "x", RangeOptions::inclusive()).is_ok());
        assert!(checker.in_range(10, 5, 10, "x", RangeOptions::inclusive()).is_ok());

        let error = checker
            .in_range(10, 5, 10, "x", RangeOptions::exclusive())
            .unwrap_err();
        assert_eq!(error.code(), "not_less");

        let error = checker
            .in_range(4.5, 5, 10, "x", RangeOptions::inclusive())
            .unwrap_err();
        assert_eq!(error.code(), "not_greater_equal");
        assert_eq!(error.compare_to(), Some(Real::Int(5)));
    }

    #[test]
    fn test_in_range_checks_min_first() {
        let checker = Checker::new();
        // Violates both bounds of an inverted range; the minimum is reported
        let error = checker
            .in_range(7, 10, 5, "x", RangeOptions::default())
            .unwrap_err();
        assert_eq!(error.code(), "not_greater_equal");
    }

    #[test]
    fn test_sign_checks() {
        let checker = Checker::new();
        assert!(checker.positive(1, "x", false).is_ok());
        assert!(checker.negative(-1, "x", false).is_ok());
        assert!(checker.negative(0, "x", true).is_ok());

        let error = checker.negative(0, "x", false).unwrap_err();
        assert_eq!(error.code(), "not_negative");
        assert_eq!(error.message, "x (0) must be less than 0");
        assert_eq!(error.operator(), Some(Operator::Less));

        let error = checker.negative(0.5, "x", true).unwrap_err();
        assert_eq!(error.code(), "not_negative_or_zero");
    }

    #[test]
    fn test_debug_mode_rejects_nan_bound() {
        let checker = Checker::new().with_config(Config::debug_mode());
        let error = checker.less(1, f64::NAN, "x").unwrap_err();
        assert_eq!(error.code(), "is_nan");
        assert!(error.name.starts_with("`bound` argument of less (called at "));

        // Release mode just fails the comparison
        let error = Checker::new().less(1, f64::NAN, "x").unwrap_err();
        assert_eq!(error.code(), "not_less");
    }

    #[test]
    fn test_debug_mode_rejects_inverted_range() {
        let checker = Checker::new().with_config(Config::debug_mode());
        let error = checker
            .in_range(7, 10, 5, "x", RangeOptions::default())
            .unwrap_err();
        assert_eq!(error.code(), "not_less_equal");
        assert!(error.name.starts_with("`min` argument of in_range"));
        assert_eq!(error.value, crate::Value::Int(10));
    }
}
