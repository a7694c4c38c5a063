//! The check-or-convert primitive every validator is built on.
//!
//! A [`TypeSpec`] pairs a type label with a predicate ("is this value already my
//! shape?") and a converter. A [`TypeSet`] is a non-empty ordered list of them.
//! [`check_or_convert`] returns a conforming value untouched, rejects it in
//! strict mode, and otherwise makes exactly one conversion attempt against the
//! first spec of the set.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use stillwater::prelude::*;

use crate::error::{natural_list, Domain, ValidationError};
use crate::value::{Complex, Value};
use crate::ValidationResult;

/// Whether a validator may convert its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The value must already be one of the allowed types.
    Strict,
    /// One conversion attempt against the first allowed type is made.
    #[default]
    Loose,
}

impl Mode {
    /// Returns true for [`Mode::Strict`].
    pub fn is_strict(self) -> bool {
        self == Mode::Strict
    }
}

/// Why a single conversion attempt failed.
///
/// This is kept as the `source()` of the resulting conversion-failure
/// [`ValidationError`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// The value's type has no conversion to the target.
    #[error("a {found} value cannot be converted to {target}")]
    Unsupported {
        /// Runtime type of the value.
        found: &'static str,
        /// Label of the target type.
        target: &'static str,
    },

    /// A string is not a valid literal of the target type.
    #[error("invalid {target} literal: {literal:?}")]
    InvalidLiteral {
        /// Label of the target type.
        target: &'static str,
        /// The rejected text.
        literal: String,
    },

    /// A float has a fractional part (or is NaN).
    #[error("{value} is not integral")]
    Inexact {
        /// The rejected float.
        value: f64,
    },

    /// A float is outside the range of an `i64`.
    #[error("{value} is outside the range of a 64-bit integer")]
    OutOfRange {
        /// The rejected float.
        value: f64,
    },
}

/// Predicate testing whether a value already has a type's shape.
pub type Matcher = fn(&Value) -> bool;

/// Converter attempting to turn a value into a type's shape.
pub type Converter = fn(&Value) -> Result<Value, ConversionError>;

/// A candidate target type: a label, a shape predicate and a converter.
///
/// # Example
///
/// ```rust
/// use argcheck::{coerce, Value};
///
/// assert!((coerce::INT.matches)(&Value::Int(1)));
/// assert_eq!((coerce::INT.convert)(&Value::from("42")), Ok(Value::Int(42)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeSpec {
    /// Label used in messages and `supported_types`.
    pub name: &'static str,
    /// Returns true if a value already has this shape.
    pub matches: Matcher,
    /// Attempts to convert a value into this shape.
    pub convert: Converter,
}

impl TypeSpec {
    /// Creates a type spec from its parts.
    pub const fn new(name: &'static str, matches: Matcher, convert: Converter) -> Self {
        Self {
            name,
            matches,
            convert,
        }
    }
}

/// `i64` integers.
pub const INT: TypeSpec = TypeSpec::new("int", is_int, to_int);
/// `f64` floats.
pub const FLOAT: TypeSpec = TypeSpec::new("float", is_float, to_float);
/// Complex numbers.
pub const COMPLEX: TypeSpec = TypeSpec::new("complex", is_complex, to_complex);
/// Strings.
pub const STRING: TypeSpec = TypeSpec::new("string", is_string, to_string);
/// Filesystem paths.
pub const PATH: TypeSpec = TypeSpec::new("path", is_path, to_path);

/// A non-empty, ordered set of allowed types.
///
/// Order matters only in loose mode: the first spec is the single conversion
/// target.
///
/// # Example
///
/// ```rust
/// use argcheck::coerce::{TypeSet, FLOAT, INT};
///
/// let real = TypeSet::of(FLOAT).or(INT);
/// assert_eq!(real.describe(), "float or int");
/// assert_eq!(real.first().name, "float");
/// ```
#[derive(Debug, Clone)]
pub struct TypeSet(NonEmptyVec<TypeSpec>);

impl TypeSet {
    /// Creates a set holding a single type.
    pub fn of(spec: TypeSpec) -> Self {
        Self(NonEmptyVec::singleton(spec))
    }

    /// Appends another allowed type.
    pub fn or(self, spec: TypeSpec) -> Self {
        Self(self.0.combine(NonEmptyVec::singleton(spec)))
    }

    /// Returns the conversion target used in loose mode.
    pub fn first(&self) -> &TypeSpec {
        self.0.head()
    }

    /// Returns true if the value already has one of the allowed shapes.
    pub fn contains(&self, value: &Value) -> bool {
        self.0.iter().any(|spec| (spec.matches)(value))
    }

    /// Returns the labels of the allowed types, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|spec| spec.name).collect()
    }

    /// Returns the default description: a natural list of the labels.
    pub fn describe(&self) -> String {
        natural_list(&self.names())
    }

    /// Returns the number of allowed types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a type set holds at least one type.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<TypeSpec> for TypeSet {
    fn from(spec: TypeSpec) -> Self {
        TypeSet::of(spec)
    }
}

/// Checks a value against a set of allowed types, converting it in loose mode.
///
/// 1. A value that already has an allowed shape is returned unchanged.
/// 2. In strict mode anything else is a `domain` type mismatch.
/// 3. In loose mode the first type's converter is invoked once. If it fails,
///    the failure becomes a `domain` conversion failure with the
///    [`ConversionError`] as its source. No other type is tried.
///
/// `description` defaults to a natural list of the allowed type labels.
///
/// # Example
///
/// ```rust
/// use argcheck::coerce::{check_or_convert, Mode, TypeSet, INT, FLOAT};
/// use argcheck::{Domain, Value};
///
/// let types = TypeSet::of(INT).or(FLOAT);
///
/// let value = check_or_convert(Value::from("7"), &types, "count", None, Mode::Loose, Domain::Numeric);
/// assert_eq!(value.unwrap(), Value::Int(7));
///
/// // "7.5" would be a valid float, but only the first type is ever tried
/// let error = check_or_convert(Value::from("7.5"), &types, "count", None, Mode::Loose, Domain::Numeric)
///     .unwrap_err();
/// assert!(error.is_conversion_failure());
/// ```
pub fn check_or_convert(
    value: Value,
    types: &TypeSet,
    name: &str,
    description: Option<&str>,
    mode: Mode,
    domain: Domain,
) -> ValidationResult<Value> {
    if types.contains(&value) {
        return Ok(value);
    }
    if mode.is_strict() {
        return Err(ValidationError::not_type(
            value,
            name,
            domain,
            types.names(),
            description,
        ));
    }

    let target = types.first();
    tracing::trace!(
        input = name,
        to = target.name,
        from = value.type_name(),
        "attempting conversion"
    );
    match (target.convert)(&value) {
        Ok(converted) => Ok(converted),
        Err(cause) => {
            let description = description
                .map(str::to_string)
                .unwrap_or_else(|| types.describe());
            Err(ValidationError::cannot_convert(
                value,
                name,
                domain,
                &description,
                cause,
            ))
        }
    }
}

fn is_int(value: &Value) -> bool {
    matches!(value, Value::Int(_))
}

fn is_float(value: &Value) -> bool {
    matches!(value, Value::Float(_))
}

fn is_complex(value: &Value) -> bool {
    matches!(value, Value::Complex(_))
}

fn is_string(value: &Value) -> bool {
    matches!(value, Value::Str(_))
}

fn is_path(value: &Value) -> bool {
    matches!(value, Value::Path(_))
}

fn unsupported(value: &Value, target: &'static str) -> ConversionError {
    ConversionError::Unsupported {
        found: value.type_name(),
        target,
    }
}

fn invalid_literal(text: &str, target: &'static str) -> ConversionError {
    ConversionError::InvalidLiteral {
        target,
        literal: text.to_string(),
    }
}

/// Converts a float to an `i64` only when no information is lost.
pub(crate) fn float_to_int(x: f64) -> Result<i64, ConversionError> {
    // 2^63; every f64 below it in magnitude that is integral fits an i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if x.is_nan() {
        return Err(ConversionError::Inexact { value: x });
    }
    if x.is_infinite() || x >= LIMIT || x < -LIMIT {
        return Err(ConversionError::OutOfRange { value: x });
    }
    if x.fract() != 0.0 {
        return Err(ConversionError::Inexact { value: x });
    }
    Ok(x as i64)
}

fn to_int(value: &Value) -> Result<Value, ConversionError> {
    match value {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(x) => float_to_int(*x).map(Value::Int),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid_literal(s, "int")),
        other => Err(unsupported(other, "int")),
    }
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

fn to_float(value: &Value) -> Result<Value, ConversionError> {
    match value {
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Float(x) => Ok(Value::Float(*x)),
        Value::Str(s) => parse_float(s)
            .map(Value::Float)
            .ok_or_else(|| invalid_literal(s, "float")),
        other => Err(unsupported(other, "float")),
    }
}

const NUMBER: &str = r"(?:(?:\d+(?:\.\d*)?|\.\d+)(?:e[+-]?\d+)?|inf(?:inity)?|nan)";

static COMPLEX_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)^(?:(?P<re>[+-]?{n})(?P<im>[+-]{n}?)j|(?P<real>[+-]?{n})|(?P<imag>[+-]?{n}?)j)$",
        n = NUMBER
    );
    Regex::new(&pattern).expect("complex literal pattern compiles")
});

/// Parses an imaginary coefficient, where a bare sign means one.
fn coefficient(text: &str) -> Option<f64> {
    match text {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        _ => text.parse::<f64>().ok(),
    }
}

/// Parses a complex literal such as `1+2j`, `-3.5j`, `(1-1e3j)` or `4`.
pub(crate) fn parse_complex(text: &str) -> Option<Complex> {
    let text = text.trim();
    let text = text
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(text);
    let caps = COMPLEX_LITERAL.captures(text)?;

    if let (Some(re), Some(im)) = (caps.name("re"), caps.name("im")) {
        return Some(Complex::new(
            re.as_str().parse().ok()?,
            coefficient(im.as_str())?,
        ));
    }
    if let Some(real) = caps.name("real") {
        return Some(Complex::new(real.as_str().parse().ok()?, 0.0));
    }
    let imag = caps.name("imag").map_or("", |m| m.as_str());
    Some(Complex::new(0.0, coefficient(imag)?))
}

fn to_complex(value: &Value) -> Result<Value, ConversionError> {
    match value {
        Value::Int(i) => Ok(Value::Complex(Complex::new(*i as f64, 0.0))),
        Value::Bool(b) => Ok(Value::Complex(Complex::new(if *b { 1.0 } else { 0.0 }, 0.0))),
        Value::Float(x) => Ok(Value::Complex(Complex::new(*x, 0.0))),
        Value::Complex(z) => Ok(Value::Complex(*z)),
        Value::Str(s) => parse_complex(s)
            .map(Value::Complex)
            .ok_or_else(|| invalid_literal(s, "complex")),
        other => Err(unsupported(other, "complex")),
    }
}

fn to_string(value: &Value) -> Result<Value, ConversionError> {
    match value {
        Value::Str(s) => Ok(Value::Str(s.clone())),
        Value::Path(p) => p
            .to_str()
            .map(|s| Value::Str(s.to_string()))
            .ok_or_else(|| unsupported(value, "string")),
        other => Err(unsupported(other, "string")),
    }
}

fn to_path(value: &Value) -> Result<Value, ConversionError> {
    match value {
        Value::Path(p) => Ok(Value::Path(p.clone())),
        Value::Str(s) => Ok(Value::Path(PathBuf::from(s))),
        other => Err(unsupported(other, "path")),
    }
}
