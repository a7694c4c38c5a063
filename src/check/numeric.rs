//! Numeric validators.
//!
//! Numeric types form the promotion lattice `int ⊂ real ⊂ complex`. Promotion
//! is always allowed in loose mode; narrowing only when nothing is lost:
//! complex → float needs a zero imaginary part, float → int needs an exact
//! integer. Strict mode disables both and is the only source of type
//! mismatches here.

use crate::coerce::{self, check_or_convert, float_to_int, ConversionError, Mode, TypeSet};
use crate::error::{Domain, ValidationError};
use crate::value::{Complex, Number, Real, Value};
use crate::ValidationResult;

use super::Checker;

/// Options for [`Checker::real`].
///
/// # Example
///
/// ```rust
/// use argcheck::{Checker, RealOptions, Real};
///
/// let checker = Checker::new();
/// let value = checker.real(f64::INFINITY, "limit", RealOptions::new().allow_inf()).unwrap();
/// assert_eq!(value, Real::Float(f64::INFINITY));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RealOptions {
    /// Strict or loose type handling.
    pub mode: Mode,
    /// Accept NaN.
    pub allow_nan: bool,
    /// Accept positive or negative infinity.
    pub allow_inf: bool,
}

impl RealOptions {
    /// Loose mode, NaN and infinity rejected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables all coercion.
    pub fn strict(mut self) -> Self {
        self.mode = Mode::Strict;
        self
    }

    /// Accepts NaN.
    pub fn allow_nan(mut self) -> Self {
        self.allow_nan = true;
        self
    }

    /// Accepts infinities.
    pub fn allow_inf(mut self) -> Self {
        self.allow_inf = true;
        self
    }
}

impl<F> Checker<F> {
    /// Checks that a value is numeric: an int, float, or complex.
    ///
    /// Numeric values are returned unchanged. In loose mode anything else is
    /// converted as a complex number and then simplified: a zero imaginary part
    /// gives a real, and an integral real that fits an `i64` gives an int.
    ///
    /// # Example
    ///
    /// ```rust
    /// use argcheck::{Checker, Mode, Number};
    ///
    /// let checker = Checker::new();
    /// assert_eq!(checker.numeric(2.5, "x", Mode::Strict).unwrap(), Number::Float(2.5));
    /// assert_eq!(checker.numeric("4+0j", "x", Mode::Loose).unwrap(), Number::Int(4));
    /// assert!(checker.numeric("4", "x", Mode::Strict).unwrap_err().is_type_mismatch());
    /// ```
    #[track_caller]
    pub fn numeric(
        &self,
        value: impl Into<Value>,
        name: &str,
        mode: Mode,
    ) -> ValidationResult<Number> {
        self.meta_name(name, "numeric")?;
        let value: Value = value.into();
        let types = TypeSet::of(coerce::COMPLEX)
            .or(coerce::FLOAT)
            .or(coerce::INT);

        let already_numeric = types.contains(&value);
        let value = check_or_convert(
            value,
            &types,
            name,
            Some("numeric type"),
            mode,
            Domain::Numeric,
        )?;
        match value {
            Value::Int(i) => Ok(Number::Int(i)),
            Value::Float(x) => Ok(Number::Float(x)),
            Value::Complex(z) if already_numeric => Ok(Number::Complex(z)),
            Value::Complex(z) => Ok(simplify(z)),
            other => Err(mismatch(other, name, &types, Some("numeric type"))),
        }
    }

    /// Checks that a value is a complex number.
    ///
    /// In loose mode ints and floats are promoted and strings are parsed as
    /// complex literals.
    #[track_caller]
    pub fn complex(
        &self,
        value: impl Into<Value>,
        name: &str,
        mode: Mode,
    ) -> ValidationResult<Complex> {
        self.meta_name(name, "complex")?;
        let types = TypeSet::of(coerce::COMPLEX);
        match check_or_convert(value.into(), &types, name, None, mode, Domain::Numeric)? {
            Value::Complex(z) => Ok(z),
            other => Err(mismatch(other, name, &types, None)),
        }
    }

    /// Checks that a value is a float.
    ///
    /// In loose mode ints are promoted, complex numbers are narrowed when their
    /// imaginary part is zero, and strings are parsed.
    #[track_caller]
    pub fn float(&self, value: impl Into<Value>, name: &str, mode: Mode) -> ValidationResult<f64> {
        self.meta_name(name, "float")?;
        let value: Value = value.into();
        if let (Value::Complex(z), Mode::Loose) = (&value, mode) {
            return narrow(*z, name, "float");
        }

        let types = TypeSet::of(coerce::FLOAT);
        match check_or_convert(value, &types, name, None, mode, Domain::Numeric)? {
            Value::Float(x) => Ok(x),
            other => Err(mismatch(other, name, &types, None)),
        }
    }

    /// Checks that a value is an integer.
    ///
    /// In loose mode a complex number is first narrowed to a float (a non-zero
    /// imaginary part is a value mismatch), and a float must then hold an exact
    /// integer (anything else is a conversion failure).
    ///
    /// # Example
    ///
    /// ```rust
    /// use argcheck::{Checker, Complex, Mode};
    ///
    /// let checker = Checker::new();
    /// assert_eq!(checker.integer(3.0, "n", Mode::Loose).unwrap(), 3);
    /// assert_eq!(checker.integer(Complex::new(3.0, 0.0), "n", Mode::Loose).unwrap(), 3);
    /// assert!(checker.integer(3.5, "n", Mode::Loose).unwrap_err().is_conversion_failure());
    /// assert!(checker.integer(Complex::new(3.0, 2.0), "n", Mode::Loose).unwrap_err().is_value_mismatch());
    /// ```
    #[track_caller]
    pub fn integer(&self, value: impl Into<Value>, name: &str, mode: Mode) -> ValidationResult<i64> {
        self.meta_name(name, "integer")?;
        let value: Value = value.into();
        if mode == Mode::Loose {
            let float = match value {
                Value::Complex(z) => Some(narrow(z, name, "integer")?),
                Value::Float(x) => Some(x),
                _ => None,
            };
            if let Some(x) = float {
                return exact_integer(x, name);
            }
        }

        let types = TypeSet::of(coerce::INT);
        match check_or_convert(value, &types, name, None, mode, Domain::Numeric)? {
            Value::Int(i) => Ok(i),
            other => Err(mismatch(other, name, &types, None)),
        }
    }

    /// Checks that a value is a real-valued number: an int or a float.
    ///
    /// Complex numbers are narrowed in loose mode. NaN and infinities are
    /// rejected after narrowing unless `options` allows them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use argcheck::{Checker, RealOptions};
    ///
    /// let checker = Checker::new();
    /// let error = checker.real(f64::NAN, "x", RealOptions::new()).unwrap_err();
    /// assert_eq!(error.code(), "is_nan");
    /// assert!(checker.real(f64::NAN, "x", RealOptions::new().allow_nan()).is_ok());
    /// ```
    #[track_caller]
    pub fn real(
        &self,
        value: impl Into<Value>,
        name: &str,
        options: RealOptions,
    ) -> ValidationResult<Real> {
        self.meta_name(name, "real")?;
        let types = TypeSet::of(coerce::FLOAT).or(coerce::INT);
        let description = Some("real-valued number");

        let value: Value = value.into();
        let real = match value {
            Value::Int(i) => Real::Int(i),
            Value::Float(x) => Real::Float(x),
            Value::Bool(b) if options.mode == Mode::Loose => Real::Int(i64::from(b)),
            Value::Complex(z) if options.mode == Mode::Loose => {
                Real::Float(narrow(z, name, "real-valued number")?)
            }
            other => match check_or_convert(
                other,
                &types,
                name,
                description,
                options.mode,
                Domain::Numeric,
            )? {
                Value::Int(i) => Real::Int(i),
                Value::Float(x) => Real::Float(x),
                other => return Err(mismatch(other, name, &types, description)),
            },
        };

        if real.is_nan() && !options.allow_nan {
            return Err(ValidationError::is_nan(real.into(), name));
        }
        if real.is_infinite() && !options.allow_inf {
            return Err(ValidationError::is_inf(real.into(), name));
        }
        Ok(real)
    }
}

/// Narrows a complex number to its real part when the imaginary part is zero.
fn narrow(z: Complex, name: &str, target: &str) -> ValidationResult<f64> {
    if z.is_real() {
        Ok(z.re)
    } else {
        Err(ValidationError::complex_valued(Value::Complex(z), name, target))
    }
}

/// Converts a float holding an exact integer.
fn exact_integer(x: f64, name: &str) -> ValidationResult<i64> {
    float_to_int(x).map_err(|cause| {
        let error = match cause {
            ConversionError::OutOfRange { .. } => ValidationError::overflow(Value::Float(x), name),
            _ => ValidationError::not_integer(Value::Float(x), name),
        };
        error.with_source(cause)
    })
}

/// Simplifies a converted complex number to the narrowest exact type.
fn simplify(z: Complex) -> Number {
    if !z.is_real() {
        return Number::Complex(z);
    }
    match float_to_int(z.re) {
        Ok(i) => Number::Int(i),
        Err(_) => Number::Float(z.re),
    }
}

/// Type mismatch for a converter that produced an unexpected shape.
fn mismatch(
    value: Value,
    name: &str,
    types: &TypeSet,
    description: Option<&str>,
) -> ValidationError {
    ValidationError::not_type(value, name, Domain::Numeric, types.names(), description)
}
