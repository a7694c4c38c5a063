//! Dynamic values accepted by the validators.
//!
//! This module provides [`Value`], the "value of unknown shape" every entry point
//! accepts, together with the typed numeric outputs [`Real`], [`Number`] and
//! [`Complex`].

use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

/// A complex number with `f64` components.
///
/// # Example
///
/// ```rust
/// use argcheck::Complex;
///
/// let z = Complex::new(3.0, 2.0);
/// assert_eq!(z.to_string(), "(3+2j)");
/// assert!(!z.is_real());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    /// Real component.
    pub re: f64,
    /// Imaginary component.
    pub im: f64,
}

impl Complex {
    /// Creates a complex number from its components.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Returns true if the imaginary component is exactly zero.
    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }
}

impl Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.re == 0.0 && self.re.is_sign_positive() {
            return write!(f, "({}j)", component(self.im));
        }
        let sign = if self.im.is_sign_negative() && !self.im.is_nan() {
            '-'
        } else {
            '+'
        };
        write!(
            f,
            "({}{}{}j)",
            component(self.re),
            sign,
            component(self.im.abs())
        )
    }
}

/// Formats a complex component without a trailing `.0`.
fn component(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x == f64::INFINITY {
        "inf".to_string()
    } else if x == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{}", x)
    } else {
        format!("{:?}", x)
    }
}

/// Formats a float so that integral values keep their `.0`.
fn float(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else {
        format!("{:?}", x)
    }
}

/// A real-valued number: either an integer or a float.
///
/// Comparisons are exact, including between an integer and a float beyond
/// 2^53. NaN compares unordered with everything.
#[derive(Debug, Clone, Copy)]
pub enum Real {
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
}

impl Real {
    /// The integer zero, used as the bound of sign checks.
    pub const ZERO: Real = Real::Int(0);

    /// Returns the value as an `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Real::Int(i) => i as f64,
            Real::Float(x) => x,
        }
    }

    /// Returns true if the value is a NaN float.
    pub fn is_nan(self) -> bool {
        matches!(self, Real::Float(x) if x.is_nan())
    }

    /// Returns true if the value is an infinite float.
    pub fn is_infinite(self) -> bool {
        matches!(self, Real::Float(x) if x.is_infinite())
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Real::Int(a), Real::Int(b)) => Some(a.cmp(&b)),
            (Real::Float(x), Real::Float(y)) => x.partial_cmp(&y),
            (Real::Int(i), Real::Float(x)) => compare_int_float(i, x),
            (Real::Float(x), Real::Int(i)) => compare_int_float(i, x).map(Ordering::reverse),
        }
    }
}

/// Compares an integer with a float without rounding the integer.
fn compare_int_float(i: i64, x: f64) -> Option<Ordering> {
    // 2^63
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if x.is_nan() {
        return None;
    }
    if x >= LIMIT {
        return Some(Ordering::Less);
    }
    if x < -LIMIT {
        return Some(Ordering::Greater);
    }
    // |x| < 2^63 here, so its integral part is exact as an i64
    let whole = x.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(x - whole)),
        unequal => Some(unequal),
    }
}

impl Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Real::Int(i) => write!(f, "{}", i),
            Real::Float(x) => f.write_str(&float(*x)),
        }
    }
}

macro_rules! real_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Real {
            fn from(value: $t) -> Self {
                Real::Int(i64::from(value))
            }
        })*
    };
}

real_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Real {
    fn from(value: f64) -> Self {
        Real::Float(value)
    }
}

impl From<f32> for Real {
    fn from(value: f32) -> Self {
        Real::Float(f64::from(value))
    }
}

/// Any numeric value: integer, float, or complex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A complex number.
    Complex(Complex),
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => f.write_str(&float(*x)),
            Number::Complex(z) => write!(f, "{}", z),
        }
    }
}

/// A value of unknown shape, as handed to a validator.
///
/// `Value` covers the scalar shapes the validators understand plus lists and
/// maps, which are never valid for any built-in target but still need to be
/// reported in a classified error.
///
/// # Example
///
/// ```rust
/// use argcheck::Value;
/// use serde_json::json;
///
/// assert_eq!(Value::from(3), Value::Int(3));
/// assert_eq!(Value::from(&json!("x")), Value::Str("x".to_string()));
/// assert_eq!(Value::from(2.5).type_name(), "float");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// A complex number.
    Complex(Complex),
    /// A string.
    Str(String),
    /// A filesystem path.
    Path(PathBuf),
    /// An ordered list of values.
    List(Vec<Value>),
    /// An insertion-ordered map of values.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Returns the runtime type label of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Complex(_) => "complex",
            Value::Str(_) => "str",
            Value::Path(_) => "path",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns true for integers, floats and complex numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Complex(_))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("none"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => f.write_str(&float(*x)),
            Value::Complex(z) => write!(f, "{}", z),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Path(p) => write!(f, "{}", p.display()),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key, item)?;
                }
                f.write_str("}")
            }
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::Int(i64::from(value))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Value::Int)
            .unwrap_or(Value::Float(value as f64))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<Complex> for Value {
    fn from(value: Complex) -> Self {
        Value::Complex(value)
    }
}

impl From<Real> for Value {
    fn from(value: Real) -> Self {
        match value {
            Real::Int(i) => Value::Int(i),
            Real::Float(x) => Value::Float(x),
        }
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(i) => Value::Int(i),
            Number::Float(x) => Value::Float(x),
            Number::Complex(z) => Value::Complex(z),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Str(value.clone())
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Self {
        Value::Path(value)
    }
}

impl From<&Path> for Value {
    fn from(value: &Path) -> Self {
        Value::Path(value.to_path_buf())
    }
}

impl From<&PathBuf> for Value {
    fn from(value: &PathBuf) -> Self {
        Value::Path(value.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float))
                .unwrap_or(Value::None),
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => Value::List(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(key, item)| (key.clone(), Value::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_float_display_keeps_decimal_point() {
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(3.5).to_string(), "3.5");
        assert_eq!(Value::Float(f64::NAN).to_string(), "nan");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-inf");
    }

    #[test]
    fn test_complex_display() {
        assert_eq!(Complex::new(3.0, 2.0).to_string(), "(3+2j)");
        assert_eq!(Complex::new(3.5, -2.0).to_string(), "(3.5-2j)");
        assert_eq!(Complex::new(0.0, 2.0).to_string(), "(2j)");
        assert_eq!(Complex::new(1.0, 0.0).to_string(), "(1+0j)");
    }

    #[test]
    fn test_real_mixed_comparison() {
        assert!(Real::Int(3) < Real::Float(3.5));
        assert!(Real::Float(2.0) > Real::Int(1));
        assert_eq!(Real::Int(3), Real::Float(3.0));
        assert!(Real::Int(i64::MAX) > Real::Int(i64::MAX - 1));
    }

    #[test]
    fn test_real_mixed_comparison_is_exact_for_large_values() {
        let above = Real::Int(9_007_199_254_740_993);
        let float = Real::Float(9_007_199_254_740_992.0);
        assert!(above > float);
        assert!(float < above);
        assert_ne!(above, float);
        assert_eq!(Real::Int(9_007_199_254_740_992), float);

        assert!(Real::Int(i64::MAX) < Real::Float(9_223_372_036_854_775_808.0));
        assert_eq!(Real::Int(i64::MIN), Real::Float(-9_223_372_036_854_775_808.0));
        assert!(Real::Int(i64::MIN) > Real::Float(f64::NEG_INFINITY));
        assert!(Real::Int(-3) < Real::Float(-2.5));
        assert!(Real::Int(-2) > Real::Float(-2.5));
        assert!(Real::Int(2) < Real::Float(2.5));
    }

    #[test]
    fn test_real_nan_is_unordered() {
        let nan = Real::Float(f64::NAN);
        assert_eq!(nan.partial_cmp(&Real::ZERO), None);
        assert!(nan.is_nan());
        assert!(!Real::Int(1).is_nan());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::None.type_name(), "none");
        assert_eq!(Value::from(true).type_name(), "bool");
        assert_eq!(Value::from("x").type_name(), "str");
        assert_eq!(Value::from(PathBuf::from("a")).type_name(), "path");
        assert_eq!(Value::from(vec![1, 2]).type_name(), "list");
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from(json!(null)), Value::None);
        assert_eq!(Value::from(json!(42)), Value::Int(42));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Float(u64::MAX as f64));
        assert_eq!(
            Value::from(json!([1, "a"])),
            Value::List(vec![Value::Int(1), Value::Str("a".to_string())])
        );

        let map = Value::from(json!({"b": 1, "a": 2}));
        match map {
            Value::Map(entries) => assert_eq!(entries.len(), 2),
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_collection_display() {
        let list = Value::from(vec![Value::Int(1), Value::from("a")]);
        assert_eq!(list.to_string(), "[1, \"a\"]");
        assert_eq!(Value::from(json!({"k": 1})).to_string(), "{\"k\": 1}");
    }
}
