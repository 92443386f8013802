//! Validation errors raised while building a query.
//!
//! Every failure in the query subsystem is a client-side contract violation
//! and is reported as a [`ValidationError`] at the offending call. These
//! errors are never retried and never deferred to serialization.

use std::fmt;

use thiserror::Error;

use crate::query::FilterOperator;

/// The way a field is being used by a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldUsage {
    /// The field appears in `filter`.
    Filter,
    /// The field appears in `order`.
    Order,
    /// The field appears in `expand`.
    Expand,
}

impl fmt::Display for FieldUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter => f.write_str("filtering"),
            Self::Order => f.write_str("ordering"),
            Self::Expand => f.write_str("expansion"),
        }
    }
}

/// A query was built in a way the remote service does not accept.
///
/// All variants share the HTTP-400 status returned by [`ValidationError::code`].
///
/// # Example
///
/// ```rust
/// use moysklad_api::query::ValidationError;
///
/// let error = ValidationError::LimitOutOfRange { limit: 0 };
/// assert_eq!(error.code(), 400);
/// assert!(error.to_string().contains("between 1 and 1000"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field carries no metadata for the attempted usage.
    #[error("Field '{field}' does not support {usage}.")]
    UnsupportedUsage {
        /// The wire path of the field.
        field: String,
        /// What the caller tried to do with it.
        usage: FieldUsage,
    },

    /// A sub-field was addressed through a field that does not allow nesting.
    #[error("Field '{outer}' does not allow access to its nested field '{inner}'.")]
    NestingNotAllowed {
        /// The composite field.
        outer: String,
        /// The sub-field that was addressed.
        inner: String,
    },

    /// A composite field was filtered directly although only its sub-fields may be.
    #[error("Field '{field}' can only be filtered through one of its nested fields.")]
    RootNestingMember {
        /// The composite field.
        field: String,
    },

    /// A field path addresses more than two levels.
    #[error("Field path '{path}' is nested deeper than two levels.")]
    NestingTooDeep {
        /// The offending path.
        path: String,
    },

    /// A field name is not declared for the entity.
    #[error("Field '{field}' is not declared for this entity.")]
    UnknownField {
        /// The name that was looked up.
        field: String,
    },

    /// The operator is not in the field's allowed operator set.
    #[error("Operator '{operator}' is not supported on field '{field}'.")]
    UnsupportedOperator {
        /// The wire path of the field.
        field: String,
        /// The rejected operator.
        operator: FilterOperator,
    },

    /// An empty value was asserted on a field that requires a value.
    #[error("Field '{field}' requires a value.")]
    ValueRequired {
        /// The wire path of the field.
        field: String,
    },

    /// A value contains `;`, the separator between filter items.
    #[error("Value '{value}' for field '{field}' cannot contain ';'.")]
    ValueContainsSeparator {
        /// The wire path of the field.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// A floating-point value is NaN or infinite.
    #[error("Value '{value}' for field '{field}' is not a finite number.")]
    NonFiniteValue {
        /// The wire path of the field.
        field: String,
        /// The rejected value as rendered.
        value: String,
    },

    /// A second constraint was added to a field that accepts only one.
    #[error("Field '{field}' may be specified only once.")]
    ConstraintAlreadySpecified {
        /// The wire path of the field.
        field: String,
    },

    /// The operator cannot co-exist with one already recorded on the field.
    #[error("Operator '{operator}' cannot be combined with '{existing}' on field '{field}'.")]
    OperatorCombination {
        /// The wire path of the field.
        field: String,
        /// The operator being added.
        operator: FilterOperator,
        /// The conflicting operator already recorded.
        existing: FilterOperator,
    },

    /// A by-name overload received an empty name.
    #[error("Field name cannot be empty.")]
    EmptyFieldName,

    /// `limit` outside `1..=1000`.
    #[error("Limit must be between 1 and 1000, got {limit}.")]
    LimitOutOfRange {
        /// The rejected limit.
        limit: i64,
    },

    /// Negative `offset`.
    #[error("Offset cannot be negative, got {offset}.")]
    NegativeOffset {
        /// The rejected offset.
        offset: i64,
    },
}

impl ValidationError {
    /// The HTTP-style status code shared by every validation error.
    pub const CODE: u16 = 400;

    /// Returns the HTTP-style status code of this error (always 400).
    #[must_use]
    pub const fn code(&self) -> u16 {
        Self::CODE
    }
}

// Verify ValidationError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ValidationError>();
};
