//! Error types for validation failures.
//!
//! This module provides [`ValidationError`], a single failure classified along
//! two independent axes ([`Kind`] and [`Domain`]), plus the text helpers used
//! to render its message.

mod message;
mod validation_error;

pub use message::natural_list;
pub use validation_error::{
    BoxError, Domain, Kind, Operator, PathKind, Reason, Sign, ValidationError,
};
