//! Filter operators understood by the MoySklad `filter` query parameter.

use std::fmt;

/// A comparison operator in a `filter` expression.
///
/// Each operator renders to its wire token via [`FilterOperator::as_str`]:
///
/// ```rust
/// use moysklad_api::query::FilterOperator;
///
/// assert_eq!(FilterOperator::Equal.as_str(), "=");
/// assert_eq!(FilterOperator::StartsWith.as_str(), "~=");
/// assert_eq!(FilterOperator::EndsWith.to_string(), "=~");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessOrEqual,
    /// `~` (substring match)
    Contains,
    /// `~=` (prefix match)
    StartsWith,
    /// `=~` (suffix match)
    EndsWith,
}

impl FilterOperator {
    /// Every operator.
    pub const ALL: &'static [Self] = &[
        Self::Equal,
        Self::NotEqual,
        Self::GreaterThan,
        Self::GreaterOrEqual,
        Self::LessThan,
        Self::LessOrEqual,
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
    ];

    /// `=` and `!=`.
    pub const EQUALITY: &'static [Self] = &[Self::Equal, Self::NotEqual];

    /// Equality plus the four range comparisons.
    pub const COMPARISON: &'static [Self] = &[
        Self::Equal,
        Self::NotEqual,
        Self::GreaterThan,
        Self::GreaterOrEqual,
        Self::LessThan,
        Self::LessOrEqual,
    ];

    /// Equality plus the three text matching operators.
    pub const TEXT: &'static [Self] = &[
        Self::Equal,
        Self::NotEqual,
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
    ];

    /// Returns the wire token for this operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::Contains => "~",
            Self::StartsWith => "~=",
            Self::EndsWith => "=~",
        }
    }

    /// Returns the operators that may already be recorded on a field when
    /// this operator is added to it.
    ///
    /// Repeating `=` (or `!=`) chains values as a logical OR. The range
    /// operators chain with each other as a logical AND, but a range
    /// operator never repeats itself. The text operators are exclusive and
    /// return `None`.
    #[must_use]
    pub const fn co_operators(&self) -> Option<&'static [Self]> {
        match self {
            Self::Equal => Some(&[Self::Equal]),
            Self::NotEqual => Some(&[Self::NotEqual]),
            Self::GreaterThan => Some(&[Self::LessThan, Self::LessOrEqual, Self::GreaterOrEqual]),
            Self::GreaterOrEqual => Some(&[Self::LessOrEqual, Self::LessThan, Self::GreaterThan]),
            Self::LessThan => Some(&[Self::GreaterThan, Self::LessOrEqual, Self::GreaterOrEqual]),
            Self::LessOrEqual => Some(&[Self::GreaterOrEqual, Self::LessThan, Self::GreaterThan]),
            Self::Contains | Self::StartsWith | Self::EndsWith => None,
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
