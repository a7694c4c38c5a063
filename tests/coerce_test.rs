//! Integration tests for the generic check-or-convert core.

use argcheck::coerce::{check_or_convert, COMPLEX, FLOAT, INT, PATH, STRING};
use argcheck::{Checker, Complex, ConversionError, Domain, Kind, Mode, TypeSet, TypeSpec, Value};
use serde_json::json;
use std::error::Error;

#[test]
fn test_conforming_values_pass_in_both_modes() {
    let types = TypeSet::of(INT).or(FLOAT);
    for mode in [Mode::Strict, Mode::Loose] {
        for value in [Value::Int(1), Value::Float(1.5)] {
            let result = check_or_convert(value.clone(), &types, "x", None, mode, Domain::Numeric);
            assert_eq!(result.unwrap(), value);
        }
    }
}

#[test]
fn test_strict_default_description_lists_types() {
    let types = TypeSet::of(INT).or(FLOAT).or(COMPLEX);
    let error = check_or_convert(
        Value::from("1"),
        &types,
        "x",
        None,
        Mode::Strict,
        Domain::Numeric,
    )
    .unwrap_err();

    assert!(error.matches(Kind::TypeMismatch, Domain::Numeric));
    assert_eq!(error.message, "x must be an int, float, or complex");
}

#[test]
fn test_only_the_first_type_is_tried() {
    let types = TypeSet::of(COMPLEX).or(INT);
    let value = check_or_convert(
        Value::from("3"),
        &types,
        "x",
        None,
        Mode::Loose,
        Domain::Numeric,
    )
    .unwrap();
    assert_eq!(value, Value::Complex(Complex::new(3.0, 0.0)));
}

#[test]
fn test_conversion_failure_wraps_the_converter_error() {
    let types = TypeSet::of(INT);
    let error = check_or_convert(
        Value::from(json!({"a": 1})),
        &types,
        "x",
        Some("whole number"),
        Mode::Loose,
        Domain::Numeric,
    )
    .unwrap_err();

    assert!(error.is_conversion_failure());
    assert_eq!(error.message, "x cannot be converted to a whole number");
    let source = error
        .source()
        .and_then(|e| e.downcast_ref::<ConversionError>())
        .unwrap();
    assert_eq!(
        source,
        &ConversionError::Unsupported {
            found: "map",
            target: "int"
        }
    );
}

#[test]
fn test_domain_is_taken_from_the_caller() {
    let error = check_or_convert(
        Value::Int(3),
        &TypeSet::of(PATH),
        "x",
        None,
        Mode::Loose,
        Domain::Path,
    )
    .unwrap_err();
    assert!(error.matches(Kind::ConversionFailure, Domain::Path));
}

#[test]
fn test_custom_type_spec() {
    fn is_bool(value: &Value) -> bool {
        matches!(value, Value::Bool(_))
    }

    fn to_bool(value: &Value) -> Result<Value, ConversionError> {
        match value {
            Value::Str(s) if s == "yes" => Ok(Value::Bool(true)),
            Value::Str(s) if s == "no" => Ok(Value::Bool(false)),
            Value::Str(s) => Err(ConversionError::InvalidLiteral {
                target: "bool",
                literal: s.clone(),
            }),
            other => Err(ConversionError::Unsupported {
                found: other.type_name(),
                target: "bool",
            }),
        }
    }

    const BOOL: TypeSpec = TypeSpec::new("bool", is_bool, to_bool);

    let checker = Checker::new();
    let value = checker
        .check_or_convert("yes", &TypeSet::of(BOOL), "flag", None, Mode::Loose, Domain::String)
        .unwrap();
    assert_eq!(value, Value::Bool(true));

    // A string is allowed by this set, so it is never converted
    let types = TypeSet::of(BOOL).or(STRING);
    let value = checker
        .check_or_convert("yes", &types, "flag", None, Mode::Loose, Domain::String)
        .unwrap();
    assert_eq!(value, Value::from("yes"));
}
