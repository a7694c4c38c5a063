//! The classified validation error.
//!
//! Every failure raised by a validator is a [`ValidationError`] carrying two
//! independent tags: a [`Kind`] (why it failed) and a [`Domain`] (what was being
//! validated). The variant-specific payload lives in [`Reason`], and the kind is
//! derived from it, so an error can never hold two kinds at once.

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use super::message::{natural_list, with_article, with_path};
use crate::value::{Real, Value};

/// Boxed lower-level failure kept as the error's `source()`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a validation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The value's runtime type is not supported.
    TypeMismatch,
    /// The value's type is plausible, but converting it failed.
    ConversionFailure,
    /// The value has a usable type but fails a semantic constraint.
    ValueMismatch,
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::TypeMismatch => "type mismatch",
            Kind::ConversionFailure => "conversion failure",
            Kind::ValueMismatch => "value mismatch",
        })
    }
}

/// What was being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Integers, floats, complex numbers.
    Numeric,
    /// Strings.
    String,
    /// Filesystem paths.
    Path,
}

impl Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Domain::Numeric => "numeric",
            Domain::String => "string",
            Domain::Path => "path",
        })
    }
}

/// A comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

impl Operator {
    /// Returns the phrase used in error messages, e.g. `"greater than"`.
    pub fn phrase(self) -> &'static str {
        match self {
            Operator::Less => "less than",
            Operator::LessEqual => "less than or equal to",
            Operator::Greater => "greater than",
            Operator::GreaterEqual => "greater than or equal to",
        }
    }

    /// Returns the operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::GreaterEqual => ">=",
        }
    }

    /// Evaluates `value <op> bound`. NaN on either side never satisfies it.
    pub fn holds(self, value: Real, bound: Real) -> bool {
        match self {
            Operator::Less => value < bound,
            Operator::LessEqual => value <= bound,
            Operator::Greater => value > bound,
            Operator::GreaterEqual => value >= bound,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The required sign of a sign check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Greater than zero (or equal, when zero is allowed).
    Positive,
    /// Less than zero (or equal, when zero is allowed).
    Negative,
}

impl Sign {
    /// Returns the comparison against zero this sign requires.
    pub fn operator(self, allow_zero: bool) -> Operator {
        match (self, allow_zero) {
            (Sign::Positive, false) => Operator::Greater,
            (Sign::Positive, true) => Operator::GreaterEqual,
            (Sign::Negative, false) => Operator::Less,
            (Sign::Negative, true) => Operator::LessEqual,
        }
    }
}

/// The filesystem kind a path was required to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// A regular file.
    File,
    /// A directory.
    Folder,
}

impl Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PathKind::File => "file",
            PathKind::Folder => "folder",
        })
    }
}

/// The variant-specific payload of a [`ValidationError`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reason {
    /// The value is not one of the supported types.
    NotType {
        /// Labels of the supported types.
        supported: Vec<&'static str>,
        /// Description used in the message.
        description: String,
    },
    /// The single conversion attempt failed.
    CannotConvert {
        /// Description of the conversion target.
        description: String,
    },
    /// A float (or real-valued complex) has a fractional part.
    NotInteger,
    /// An integral float does not fit in an `i64`.
    Overflow,
    /// A complex number with a non-zero imaginary part was narrowed.
    ComplexValued {
        /// Description of the narrowing target.
        description: String,
    },
    /// A real number is NaN.
    IsNaN,
    /// A real number is infinite.
    IsInf,
    /// A real number fails a comparison.
    Comparison {
        /// The operator that had to hold.
        operator: Operator,
        /// The bound the value was compared to.
        compare_to: Real,
        /// Set when the comparison is a sign check against zero.
        sign: Option<Sign>,
    },
    /// A string is empty.
    Empty,
    /// The path does not exist.
    NotFound {
        /// The resolved path.
        path: PathBuf,
        /// The kind of resource that was expected.
        expected: PathKind,
    },
    /// The path already exists.
    AlreadyExists {
        /// The resolved path.
        path: PathBuf,
        /// The kind of resource that was going to be created.
        expected: PathKind,
    },
    /// The path exists but is the wrong kind of resource.
    WrongKind {
        /// The resolved path.
        path: PathBuf,
        /// The kind of resource that was expected.
        expected: PathKind,
    },
    /// The folder exists but is not empty.
    NotEmpty {
        /// The resolved path.
        path: PathBuf,
    },
    /// Probing the path failed.
    Unreadable {
        /// The resolved path.
        path: PathBuf,
    },
}

impl Reason {
    /// Returns the kind this reason belongs to.
    pub fn kind(&self) -> Kind {
        match self {
            Reason::NotType { .. } => Kind::TypeMismatch,
            Reason::CannotConvert { .. } | Reason::NotInteger | Reason::Overflow => {
                Kind::ConversionFailure
            }
            Reason::ComplexValued { .. }
            | Reason::IsNaN
            | Reason::IsInf
            | Reason::Comparison { .. }
            | Reason::Empty
            | Reason::NotFound { .. }
            | Reason::AlreadyExists { .. }
            | Reason::WrongKind { .. }
            | Reason::NotEmpty { .. }
            | Reason::Unreadable { .. } => Kind::ValueMismatch,
        }
    }

    /// Returns a machine-readable code for the concrete variant.
    pub fn code(&self) -> &'static str {
        match self {
            Reason::NotType { .. } => "not_type",
            Reason::CannotConvert { .. } => "cannot_convert",
            Reason::NotInteger => "not_integer",
            Reason::Overflow => "overflow",
            Reason::ComplexValued { .. } => "complex_valued",
            Reason::IsNaN => "is_nan",
            Reason::IsInf => "is_inf",
            Reason::Comparison { operator, sign, .. } => match (sign, operator) {
                (Some(Sign::Positive), Operator::Greater) => "not_positive",
                (Some(Sign::Positive), _) => "not_positive_or_zero",
                (Some(Sign::Negative), Operator::Less) => "not_negative",
                (Some(Sign::Negative), _) => "not_negative_or_zero",
                (None, Operator::Less) => "not_less",
                (None, Operator::LessEqual) => "not_less_equal",
                (None, Operator::Greater) => "not_greater",
                (None, Operator::GreaterEqual) => "not_greater_equal",
            },
            Reason::Empty => "empty",
            Reason::NotFound { .. } => "not_found",
            Reason::AlreadyExists { .. } => "already_exists",
            Reason::WrongKind { .. } => "wrong_kind",
            Reason::NotEmpty { .. } => "not_empty",
            Reason::Unreadable { .. } => "unreadable",
        }
    }

    /// Renders the message for an input called `name` holding `value`.
    fn render(&self, name: &str, value: &Value) -> String {
        match self {
            Reason::NotType { description, .. } => {
                format!("{} must be {}", name, with_article(description))
            }
            Reason::CannotConvert { description } => {
                format!("{} cannot be converted to {}", name, with_article(description))
            }
            Reason::NotInteger => format!("{} ({}) is not an integer", name, value),
            Reason::Overflow => format!(
                "{} ({}) is too large to be represented as an integer",
                name, value
            ),
            Reason::ComplexValued { description } => format!(
                "{} {} is complex-valued, so cannot be converted to {}",
                name,
                value,
                with_article(description)
            ),
            Reason::IsNaN => format!("{} cannot be NaN", name),
            Reason::IsInf => format!("{} cannot be Inf", name),
            Reason::Comparison {
                operator,
                compare_to,
                ..
            } => format!(
                "{} ({}) must be {} {}",
                name,
                value,
                operator.phrase(),
                compare_to
            ),
            Reason::Empty => format!("{} cannot be empty", name),
            Reason::NotFound { path, .. } => {
                with_path(&format!("{} does not exist", name), path)
            }
            Reason::AlreadyExists { path, .. } => {
                with_path(&format!("{} already exists", name), path)
            }
            Reason::WrongKind { path, expected } => {
                with_path(&format!("{} does not point to a {}", name, expected), path)
            }
            Reason::NotEmpty { path } => with_path(
                &format!("{} is a folder, but the folder is not empty", name),
                path,
            ),
            Reason::Unreadable { path } => {
                with_path(&format!("{} could not be inspected", name), path)
            }
        }
    }
}

/// A single classified validation failure.
///
/// `ValidationError` captures everything about a failed check:
/// - **value**: the offending input (for path errors, the resolved path)
/// - **name**: the label of the failing input
/// - **message**: the fully rendered, human-readable message
/// - **kind** and **domain**: the two classification tags
/// - **reason**: the variant-specific payload
///
/// # Example
///
/// ```rust
/// use argcheck::{Checker, Domain, Kind};
///
/// let checker = Checker::new();
/// let error = checker.integer(3.5, "count", Default::default()).unwrap_err();
///
/// assert_eq!(error.kind(), Kind::ConversionFailure);
/// assert_eq!(error.domain(), Domain::Numeric);
/// assert_eq!(error.message, "count (3.5) is not an integer");
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The value that failed validation.
    pub value: Value,
    /// The label of the input that failed.
    pub name: String,
    /// Human-readable error message.
    pub message: String,
    domain: Domain,
    reason: Reason,
    #[source]
    source: Option<BoxError>,
}

impl ValidationError {
    /// Creates an error from its parts and renders its message.
    pub fn new(value: Value, name: impl Into<String>, domain: Domain, reason: Reason) -> Self {
        let name = name.into();
        let message = reason.render(&name, &value);
        tracing::debug!(
            input = %name,
            code = reason.code(),
            domain = %domain,
            "validation failed"
        );
        Self {
            value,
            name,
            message,
            domain,
            reason,
            source: None,
        }
    }

    /// Attaches the lower-level failure that caused this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Replaces the input label and re-renders the message.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.message = self.reason.render(&self.name, &self.value);
        self
    }

    /// The value's type is not supported.
    ///
    /// The description defaults to a natural list of the supported type labels.
    pub fn not_type(
        value: Value,
        name: impl Into<String>,
        domain: Domain,
        supported: Vec<&'static str>,
        description: Option<&str>,
    ) -> Self {
        let description = description
            .map(str::to_string)
            .unwrap_or_else(|| natural_list(&supported));
        Self::new(
            value,
            name,
            domain,
            Reason::NotType {
                supported,
                description,
            },
        )
    }

    /// The single conversion attempt failed with `source`.
    pub fn cannot_convert<E>(
        value: Value,
        name: impl Into<String>,
        domain: Domain,
        description: &str,
        source: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(
            value,
            name,
            domain,
            Reason::CannotConvert {
                description: description.to_string(),
            },
        )
        .with_source(source)
    }

    /// A float has a fractional part and cannot become an integer.
    pub fn not_integer(value: Value, name: impl Into<String>) -> Self {
        Self::new(value, name, Domain::Numeric, Reason::NotInteger)
    }

    /// An integral float is outside the `i64` range.
    pub fn overflow(value: Value, name: impl Into<String>) -> Self {
        Self::new(value, name, Domain::Numeric, Reason::Overflow)
    }

    /// A complex number with a non-zero imaginary part was narrowed.
    pub fn complex_valued(value: Value, name: impl Into<String>, description: &str) -> Self {
        Self::new(
            value,
            name,
            Domain::Numeric,
            Reason::ComplexValued {
                description: description.to_string(),
            },
        )
    }

    /// A real number is NaN.
    pub fn is_nan(value: Value, name: impl Into<String>) -> Self {
        Self::new(value, name, Domain::Numeric, Reason::IsNaN)
    }

    /// A real number is infinite.
    pub fn is_inf(value: Value, name: impl Into<String>) -> Self {
        Self::new(value, name, Domain::Numeric, Reason::IsInf)
    }

    /// A real number fails `value <operator> bound`.
    pub fn comparison(
        value: Real,
        name: impl Into<String>,
        operator: Operator,
        compare_to: Real,
    ) -> Self {
        Self::new(
            value.into(),
            name,
            Domain::Numeric,
            Reason::Comparison {
                operator,
                compare_to,
                sign: None,
            },
        )
    }

    /// The value is not less than `bound`.
    pub fn not_less(value: Real, name: impl Into<String>, bound: Real) -> Self {
        Self::comparison(value, name, Operator::Less, bound)
    }

    /// The value is not less than or equal to `bound`.
    pub fn not_less_equal(value: Real, name: impl Into<String>, bound: Real) -> Self {
        Self::comparison(value, name, Operator::LessEqual, bound)
    }

    /// The value is not greater than `bound`.
    pub fn not_greater(value: Real, name: impl Into<String>, bound: Real) -> Self {
        Self::comparison(value, name, Operator::Greater, bound)
    }

    /// The value is not greater than or equal to `bound`.
    pub fn not_greater_equal(value: Real, name: impl Into<String>, bound: Real) -> Self {
        Self::comparison(value, name, Operator::GreaterEqual, bound)
    }

    /// The value does not have the required sign.
    pub fn wrong_sign(value: Real, name: impl Into<String>, sign: Sign, allow_zero: bool) -> Self {
        Self::new(
            value.into(),
            name,
            Domain::Numeric,
            Reason::Comparison {
                operator: sign.operator(allow_zero),
                compare_to: Real::ZERO,
                sign: Some(sign),
            },
        )
    }

    /// The value is not positive (or not `>= 0` when zero is allowed).
    pub fn not_positive(value: Real, name: impl Into<String>, allow_zero: bool) -> Self {
        Self::wrong_sign(value, name, Sign::Positive, allow_zero)
    }

    /// The value is not negative (or not `<= 0` when zero is allowed).
    pub fn not_negative(value: Real, name: impl Into<String>, allow_zero: bool) -> Self {
        Self::wrong_sign(value, name, Sign::Negative, allow_zero)
    }

    /// A string is empty.
    pub fn empty(value: Value, name: impl Into<String>) -> Self {
        Self::new(value, name, Domain::String, Reason::Empty)
    }

    /// The path does not exist.
    pub fn not_found(path: &Path, name: impl Into<String>, expected: PathKind) -> Self {
        Self::new(
            Value::Path(path.to_path_buf()),
            name,
            Domain::Path,
            Reason::NotFound {
                path: path.to_path_buf(),
                expected,
            },
        )
    }

    /// The path already exists.
    pub fn already_exists(path: &Path, name: impl Into<String>, expected: PathKind) -> Self {
        Self::new(
            Value::Path(path.to_path_buf()),
            name,
            Domain::Path,
            Reason::AlreadyExists {
                path: path.to_path_buf(),
                expected,
            },
        )
    }

    /// The path exists but is not the expected kind of resource.
    pub fn wrong_kind(path: &Path, name: impl Into<String>, expected: PathKind) -> Self {
        Self::new(
            Value::Path(path.to_path_buf()),
            name,
            Domain::Path,
            Reason::WrongKind {
                path: path.to_path_buf(),
                expected,
            },
        )
    }

    /// The folder exists but is not empty.
    pub fn not_empty(path: &Path, name: impl Into<String>) -> Self {
        Self::new(
            Value::Path(path.to_path_buf()),
            name,
            Domain::Path,
            Reason::NotEmpty {
                path: path.to_path_buf(),
            },
        )
    }

    /// Probing the path failed with `source`.
    pub fn unreadable<E>(path: &Path, name: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(
            Value::Path(path.to_path_buf()),
            name,
            Domain::Path,
            Reason::Unreadable {
                path: path.to_path_buf(),
            },
        )
        .with_source(source)
    }

    /// Returns why validation failed.
    pub fn kind(&self) -> Kind {
        self.reason.kind()
    }

    /// Returns what was being validated.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Returns the variant-specific payload.
    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    /// Returns the machine-readable code of the concrete variant.
    pub fn code(&self) -> &'static str {
        self.reason.code()
    }

    /// Returns true if this error has both the given kind and domain.
    pub fn matches(&self, kind: Kind, domain: Domain) -> bool {
        self.kind() == kind && self.domain == domain
    }

    /// Returns true for type mismatches.
    pub fn is_type_mismatch(&self) -> bool {
        self.kind() == Kind::TypeMismatch
    }

    /// Returns true for conversion failures.
    pub fn is_conversion_failure(&self) -> bool {
        self.kind() == Kind::ConversionFailure
    }

    /// Returns true for value mismatches.
    pub fn is_value_mismatch(&self) -> bool {
        self.kind() == Kind::ValueMismatch
    }

    /// Returns true for numeric-domain errors.
    pub fn is_numeric(&self) -> bool {
        self.domain == Domain::Numeric
    }

    /// Returns true for string-domain errors.
    pub fn is_string(&self) -> bool {
        self.domain == Domain::String
    }

    /// Returns true for path-domain errors.
    pub fn is_path(&self) -> bool {
        self.domain == Domain::Path
    }

    /// Returns true for comparison failures, sign failures included.
    pub fn is_comparison(&self) -> bool {
        matches!(self.reason, Reason::Comparison { .. })
    }

    /// Returns true for sign failures.
    pub fn is_sign(&self) -> bool {
        matches!(self.reason, Reason::Comparison { sign: Some(_), .. })
    }

    /// Returns the comparison operator that had to hold.
    pub fn operator(&self) -> Option<Operator> {
        match self.reason {
            Reason::Comparison { operator, .. } => Some(operator),
            _ => None,
        }
    }

    /// Returns the bound of a comparison failure.
    pub fn compare_to(&self) -> Option<Real> {
        match self.reason {
            Reason::Comparison { compare_to, .. } => Some(compare_to),
            _ => None,
        }
    }

    /// Returns the required sign of a sign failure.
    pub fn sign(&self) -> Option<Sign> {
        match self.reason {
            Reason::Comparison { sign, .. } => sign,
            _ => None,
        }
    }

    /// Returns the supported type labels of a type mismatch.
    pub fn supported_types(&self) -> Option<&[&'static str]> {
        match &self.reason {
            Reason::NotType { supported, .. } => Some(supported.as_slice()),
            _ => None,
        }
    }

    /// Returns the resolved path of a path-domain value mismatch.
    pub fn path(&self) -> Option<&Path> {
        match &self.reason {
            Reason::NotFound { path, .. }
            | Reason::AlreadyExists { path, .. }
            | Reason::WrongKind { path, .. }
            | Reason::NotEmpty { path }
            | Reason::Unreadable { path } => Some(path.as_path()),
            _ => None,
        }
    }

    /// Returns the expected filesystem kind of a path-domain error.
    pub fn expected_kind(&self) -> Option<PathKind> {
        match self.reason {
            Reason::NotFound { expected, .. }
            | Reason::AlreadyExists { expected, .. }
            | Reason::WrongKind { expected, .. } => Some(expected),
            _ => None,
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};
