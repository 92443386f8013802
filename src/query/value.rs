//! Value domains accepted by filter assertions.
//!
//! A field's value type `V` implements [`FieldValue`], which names the type
//! the assertion verbs accept. The marker traits [`OrderedFilterValue`] and
//! [`TextFilterValue`] unlock the range and text verbs; nullable fields use
//! `Option<T>` as their value type, which unlocks `be_null`/`not_be_null`.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

/// Date-time format used in `filter` values.
pub const FILTER_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format used in `filter` values.
pub const FILTER_DATE_FORMAT: &str = "%Y-%m-%d";

/// A value that can appear on the right-hand side of a filter.
pub trait FilterValue {
    /// Renders the value as it appears in the `filter` query parameter.
    fn to_filter_value(&self) -> String;

    /// Returns `false` for values the service cannot compare against,
    /// such as NaN or an infinite float.
    fn is_representable(&self) -> bool {
        true
    }
}

/// A value domain with a meaningful ordering (`>`, `>=`, `<`, `<=`).
pub trait OrderedFilterValue: FilterValue {}

/// A value domain supporting substring matching (`~`, `~=`, `=~`).
pub trait TextFilterValue: OrderedFilterValue {}

/// The value type of a declared field.
///
/// Scalar types map to themselves; `Option<T>` marks a nullable field of `T`.
pub trait FieldValue {
    /// The type accepted by assertion verbs.
    type Value: FilterValue;
}

impl<T: FilterValue> FieldValue for Option<T> {
    type Value = T;
}

impl FilterValue for String {
    fn to_filter_value(&self) -> String {
        self.clone()
    }
}

impl OrderedFilterValue for String {}
impl TextFilterValue for String {}

impl FilterValue for bool {
    fn to_filter_value(&self) -> String {
        self.to_string()
    }
}

impl FilterValue for Uuid {
    fn to_filter_value(&self) -> String {
        self.hyphenated().to_string()
    }
}

impl FilterValue for NaiveDateTime {
    fn to_filter_value(&self) -> String {
        self.format(FILTER_DATE_TIME_FORMAT).to_string()
    }
}

impl OrderedFilterValue for NaiveDateTime {}

impl FilterValue for NaiveDate {
    fn to_filter_value(&self) -> String {
        self.format(FILTER_DATE_FORMAT).to_string()
    }
}

impl OrderedFilterValue for NaiveDate {}

macro_rules! numeric_filter_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FilterValue for $ty {
                fn to_filter_value(&self) -> String {
                    self.to_string()
                }
            }

            impl OrderedFilterValue for $ty {}

            impl FieldValue for $ty {
                type Value = Self;
            }
        )*
    };
}

numeric_filter_values!(i32, i64, u32, u64);

impl FilterValue for f64 {
    fn to_filter_value(&self) -> String {
        self.to_string()
    }

    fn is_representable(&self) -> bool {
        self.is_finite()
    }
}

impl OrderedFilterValue for f64 {}

impl FieldValue for f64 {
    type Value = Self;
}

macro_rules! scalar_field_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                type Value = Self;
            }
        )*
    };
}

scalar_field_values!(String, bool, Uuid, NaiveDateTime, NaiveDate);
