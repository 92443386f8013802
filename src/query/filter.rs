//! Filter items and the assertion builders that produce them.

use std::fmt;
use std::marker::PhantomData;

use crate::query::{
    FieldValue, FilterOperator, FilterValue, OrderedFilterValue, ResolvedField, TextFilterValue,
    ValidationError,
};

/// One `(field path, operator, value)` triple of a `filter` expression.
///
/// Renders as `{field_path}{operator}{value}`; a `None` value renders as
/// nothing after the operator.
///
/// ```rust
/// use moysklad_api::query::{FilterItem, FilterOperator};
///
/// let item = FilterItem::new("code", FilterOperator::Equal, Some("foo".to_string()));
/// assert_eq!(item.to_string(), "code=foo");
///
/// let item = FilterItem::new("email", FilterOperator::NotEqual, None);
/// assert_eq!(item.to_string(), "email!=");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterItem {
    field_path: String,
    operator: FilterOperator,
    value: Option<String>,
}

impl FilterItem {
    /// Creates a filter item.
    #[must_use]
    pub fn new(
        field_path: impl Into<String>,
        operator: FilterOperator,
        value: Option<String>,
    ) -> Self {
        Self {
            field_path: field_path.into(),
            operator,
            value,
        }
    }

    /// The dotted wire path of the field.
    #[must_use]
    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    /// The operator.
    #[must_use]
    pub const fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// The value, `None` for a null assertion.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for FilterItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.field_path,
            self.operator,
            self.value.as_deref().unwrap_or_default()
        )
    }
}

/// The ordered list of filter items accumulated by one query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterStore {
    items: Vec<FilterItem>,
}

impl FilterStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The recorded items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[FilterItem] {
        &self.items
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Validates and records an assertion on `field`.
    ///
    /// `allowed_co_operators` lists the operators that may already be
    /// recorded on the same path; `None` makes the assertion exclusive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the operator is not allowed on the
    /// field, when the value contains the `;` item separator, when an empty
    /// value is asserted on a field that requires one,
    /// when the field accepts a single constraint and already has one, or
    /// when the operator cannot co-exist with one already recorded.
    pub fn add_filter(
        &mut self,
        field: &ResolvedField,
        value: Option<String>,
        operator: FilterOperator,
        allowed_co_operators: Option<&[FilterOperator]>,
    ) -> Result<(), ValidationError> {
        let metadata = field.metadata();
        let path = field.path();

        if !metadata.supports_operator(operator) {
            return Err(ValidationError::UnsupportedOperator {
                field: path.to_string(),
                operator,
            });
        }

        if let Some(value) = value.as_deref().filter(|v| v.contains(';')) {
            return Err(ValidationError::ValueContainsSeparator {
                field: path.to_string(),
                value: value.to_string(),
            });
        }

        let value = value.filter(|v| !v.is_empty());
        if value.is_none() && !metadata.allow_null {
            return Err(ValidationError::ValueRequired {
                field: path.to_string(),
            });
        }

        let mut existing = self.items.iter().filter(|i| i.field_path == path).peekable();
        if existing.peek().is_some() {
            if !metadata.allow_continue_constraint {
                return Err(ValidationError::ConstraintAlreadySpecified {
                    field: path.to_string(),
                });
            }

            let conflict = existing.find(|item| {
                allowed_co_operators.map_or(true, |allowed| !allowed.contains(&item.operator))
            });
            if let Some(item) = conflict {
                return Err(ValidationError::OperatorCombination {
                    field: path.to_string(),
                    operator,
                    existing: item.operator,
                });
            }
        }

        tracing::trace!(field = path, %operator, "adding filter");
        self.items.push(FilterItem {
            field_path: path.to_string(),
            operator,
            value,
        });
        Ok(())
    }

    /// Renders the `filter` parameter value, `None` when empty.
    #[must_use]
    pub fn to_query_value(&self) -> Option<String> {
        if self.items.is_empty() {
            return None;
        }
        Some(
            self.items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(";"),
        )
    }
}

/// Fluent assertions on one field of entity `E` with value type `V`.
///
/// Obtained from [`ApiParameterBuilder::filter`](crate::query::ApiParameterBuilder::filter).
/// The verbs available depend on the value domain of `V`:
///
/// | Domain | Verbs |
/// |---|---|
/// | every value | `be`, `not_be` |
/// | ordered (numbers, dates, strings) | `be_greater_than`, `be_greater_or_equal_to`, `be_less_than`, `be_less_or_equal_to` |
/// | text (strings) | `contains`, `starts_with`, `ends_with` |
/// | nullable (`Option<T>`) | `be_null`, `not_be_null` |
///
/// Every verb returns the assertion again so constraints on the same field
/// chain; repeating `be` expresses a logical OR, combining range verbs a
/// logical AND.
///
/// ```rust
/// use moysklad_api::query::ApiParameterBuilder;
/// use moysklad_api::rest::resources::Product;
///
/// let mut query = ApiParameterBuilder::<Product>::new();
/// query
///     .filter(Product::WEIGHT)
///     .unwrap()
///     .be_greater_or_equal_to(1.5)
///     .unwrap()
///     .be_less_or_equal_to(3.0)
///     .unwrap();
/// assert_eq!(query.filters().len(), 2);
/// ```
pub struct Assertion<'q, E, V> {
    store: &'q mut FilterStore,
    field: ResolvedField,
    _marker: PhantomData<fn() -> (E, V)>,
}

impl<E, V> fmt::Debug for Assertion<'_, E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("field", &self.field.path())
            .finish_non_exhaustive()
    }
}

impl<'q, E, V> Assertion<'q, E, V> {
    pub(crate) fn new(store: &'q mut FilterStore, field: ResolvedField) -> Self {
        Self {
            store,
            field,
            _marker: PhantomData,
        }
    }

    /// The resolved wire path of the asserted field.
    #[must_use]
    pub fn field_path(&self) -> &str {
        self.field.path()
    }

    fn add(
        &mut self,
        value: Option<String>,
        operator: FilterOperator,
    ) -> Result<&mut Self, ValidationError> {
        self.store
            .add_filter(&self.field, value, operator, operator.co_operators())?;
        Ok(self)
    }
}

impl<E, V: FieldValue> Assertion<'_, E, V> {
    fn add_value(
        &mut self,
        value: &V::Value,
        operator: FilterOperator,
    ) -> Result<&mut Self, ValidationError> {
        let rendered = value.to_filter_value();
        if !value.is_representable() {
            return Err(ValidationError::NonFiniteValue {
                field: self.field.path().to_string(),
                value: rendered,
            });
        }
        self.add(Some(rendered), operator)
    }

    /// Asserts `field = value`. Repeating it matches any of the values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field rejects the assertion.
    pub fn be(&mut self, value: impl Into<V::Value>) -> Result<&mut Self, ValidationError> {
        self.add_value(&value.into(), FilterOperator::Equal)
    }

    /// Asserts `field != value`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field rejects the assertion.
    pub fn not_be(&mut self, value: impl Into<V::Value>) -> Result<&mut Self, ValidationError> {
        self.add_value(&value.into(), FilterOperator::NotEqual)
    }
}

impl<E, V> Assertion<'_, E, V>
where
    V: FieldValue,
    V::Value: OrderedFilterValue,
{
    /// Asserts `field > value`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field rejects the assertion.
    pub fn be_greater_than(
        &mut self,
        value: impl Into<V::Value>,
    ) -> Result<&mut Self, ValidationError> {
        self.add_value(&value.into(), FilterOperator::GreaterThan)
    }

    /// Asserts `field >= value`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field rejects the assertion.
    pub fn be_greater_or_equal_to(
        &mut self,
        value: impl Into<V::Value>,
    ) -> Result<&mut Self, ValidationError> {
        self.add_value(&value.into(), FilterOperator::GreaterOrEqual)
    }

    /// Asserts `field < value`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field rejects the assertion.
    pub fn be_less_than(&mut self, value: impl Into<V::Value>) -> Result<&mut Self, ValidationError> {
        self.add_value(&value.into(), FilterOperator::LessThan)
    }

    /// Asserts `field <= value`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field rejects the assertion.
    pub fn be_less_or_equal_to(
        &mut self,
        value: impl Into<V::Value>,
    ) -> Result<&mut Self, ValidationError> {
        self.add_value(&value.into(), FilterOperator::LessOrEqual)
    }
}

impl<E, V> Assertion<'_, E, V>
where
    V: FieldValue,
    V::Value: TextFilterValue,
{
    /// Asserts that the field contains `value`. Exclusive on the field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field rejects the assertion.
    pub fn contains(&mut self, value: impl Into<V::Value>) -> Result<&mut Self, ValidationError> {
        self.add_value(&value.into(), FilterOperator::Contains)
    }

    /// Asserts that the field starts with `value`. Exclusive on the field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field rejects the assertion.
    pub fn starts_with(
        &mut self,
        value: impl Into<V::Value>,
    ) -> Result<&mut Self, ValidationError> {
        self.add_value(&value.into(), FilterOperator::StartsWith)
    }

    /// Asserts that the field ends with `value`. Exclusive on the field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field rejects the assertion.
    pub fn ends_with(&mut self, value: impl Into<V::Value>) -> Result<&mut Self, ValidationError> {
        self.add_value(&value.into(), FilterOperator::EndsWith)
    }
}

impl<E, T: FilterValue> Assertion<'_, E, Option<T>> {
    /// Asserts that the field is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field does not allow null.
    pub fn be_null(&mut self) -> Result<&mut Self, ValidationError> {
        self.add(None, FilterOperator::Equal)
    }

    /// Asserts that the field is not empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field does not allow null.
    pub fn not_be_null(&mut self) -> Result<&mut Self, ValidationError> {
        self.add(None, FilterOperator::NotEqual)
    }
}
