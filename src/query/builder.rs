//! The query builder and its serializer.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use crate::query::{
    Assertion, ExpandStore, FieldSelector, FieldUsage, FilterItem, FilterStore,
    OrderStore, Queryable, SortDirection, ValidationError,
};

/// Largest page size accepted by the service.
pub const MAX_LIMIT: i64 = 1000;

/// A query that can be rendered into request parameters.
///
/// Specialised builders call the base builder's [`build`](Self::build) and
/// add their own keys to the result.
pub trait QueryParameters {
    /// Renders the query into a flat parameter map.
    ///
    /// Keys are present only when the corresponding part of the query is set.
    fn build(&self) -> HashMap<String, String>;
}

/// Accumulates filter, order, expand, search and paging state for a query
/// against entity `E`.
///
/// Each verb validates its input against the field metadata declared by `E`
/// and fails with a [`ValidationError`] at the offending call.
///
/// # Example
///
/// ```rust
/// use moysklad_api::query::{ApiParameterBuilder, QueryParameters};
/// use moysklad_api::rest::resources::Counterparty;
///
/// let mut query = ApiParameterBuilder::<Counterparty>::new();
/// query.filter(Counterparty::CODE).unwrap().be("foo").unwrap().be("bar").unwrap();
/// query.order_by(Counterparty::NAME).unwrap();
/// query.search("foo").limit(100).unwrap().offset(50).unwrap();
///
/// let params = query.build();
/// assert_eq!(params["filter"], "code=foo;code=bar");
/// assert_eq!(params["order"], "name,asc");
/// assert_eq!(params["limit"], "100");
/// ```
pub struct ApiParameterBuilder<E> {
    filters: FilterStore,
    order: OrderStore,
    expand: ExpandStore,
    search: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Default for ApiParameterBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ApiParameterBuilder<E> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            order: self.order.clone(),
            expand: self.expand.clone(),
            search: self.search.clone(),
            limit: self.limit,
            offset: self.offset,
            _marker: PhantomData,
        }
    }
}

impl<E> fmt::Debug for ApiParameterBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiParameterBuilder")
            .field("filters", &self.filters)
            .field("order", &self.order)
            .field("expand", &self.expand)
            .field("search", &self.search)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<E> ApiParameterBuilder<E> {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filters: FilterStore::new(),
            order: OrderStore::new(),
            expand: ExpandStore::new(),
            search: None,
            limit: None,
            offset: None,
            _marker: PhantomData,
        }
    }

    /// Starts an assertion on `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field is not filterable, or if it is
    /// addressed through a composite field that forbids it.
    pub fn filter<V>(
        &mut self,
        field: impl Into<FieldSelector<E, V>>,
    ) -> Result<Assertion<'_, E, V>, ValidationError> {
        let resolved = field.into().resolve(FieldUsage::Filter)?;
        Ok(Assertion::new(&mut self.filters, resolved))
    }

    /// Sorts ascending by `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field is not orderable.
    pub fn order_by<V>(
        &mut self,
        field: impl Into<FieldSelector<E, V>>,
    ) -> Result<&mut Self, ValidationError> {
        self.push_order(field.into(), SortDirection::Asc)
    }

    /// Sorts descending by `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field is not orderable.
    pub fn order_by_descending<V>(
        &mut self,
        field: impl Into<FieldSelector<E, V>>,
    ) -> Result<&mut Self, ValidationError> {
        self.push_order(field.into(), SortDirection::Desc)
    }

    /// Adds an ascending secondary sort.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field is not orderable.
    pub fn then_by<V>(
        &mut self,
        field: impl Into<FieldSelector<E, V>>,
    ) -> Result<&mut Self, ValidationError> {
        self.push_order(field.into(), SortDirection::Asc)
    }

    /// Adds a descending secondary sort.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field is not orderable.
    pub fn then_by_descending<V>(
        &mut self,
        field: impl Into<FieldSelector<E, V>>,
    ) -> Result<&mut Self, ValidationError> {
        self.push_order(field.into(), SortDirection::Desc)
    }

    /// Asks the service to inline the entity referenced by `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the field is not expandable.
    pub fn expand<V>(
        &mut self,
        field: impl Into<FieldSelector<E, V>>,
    ) -> Result<&mut Self, ValidationError> {
        let resolved = field.into().resolve(FieldUsage::Expand)?;
        self.expand.add(resolved.path());
        Ok(self)
    }

    /// Sets the full-text search string.
    pub fn search(&mut self, text: impl Into<String>) -> &mut Self {
        self.search = Some(text.into());
        self
    }

    /// Sets the page size.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LimitOutOfRange`] outside `1..=1000`.
    pub fn limit(&mut self, limit: i64) -> Result<&mut Self, ValidationError> {
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ValidationError::LimitOutOfRange { limit });
        }
        self.limit = Some(limit);
        Ok(self)
    }

    /// Sets the number of rows to skip.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeOffset`] for a negative offset.
    pub fn offset(&mut self, offset: i64) -> Result<&mut Self, ValidationError> {
        if offset < 0 {
            return Err(ValidationError::NegativeOffset { offset });
        }
        self.offset = Some(offset);
        Ok(self)
    }

    /// The recorded filter items in call order.
    #[must_use]
    pub fn filters(&self) -> &[FilterItem] {
        self.filters.items()
    }

    /// The recorded sort directives in order of first use.
    #[must_use]
    pub fn order(&self) -> &[(String, SortDirection)] {
        self.order.entries()
    }

    /// The recorded expansion paths.
    #[must_use]
    pub fn expanded(&self) -> &[String] {
        self.expand.paths()
    }

    /// The search string, if set.
    #[must_use]
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// The page size, if set.
    #[must_use]
    pub const fn page_limit(&self) -> Option<i64> {
        self.limit
    }

    /// The offset, if set.
    #[must_use]
    pub const fn page_offset(&self) -> Option<i64> {
        self.offset
    }

    fn push_order<V>(
        &mut self,
        field: FieldSelector<E, V>,
        direction: SortDirection,
    ) -> Result<&mut Self, ValidationError> {
        let resolved = field.resolve(FieldUsage::Order)?;
        self.order.set(resolved.path(), direction);
        Ok(self)
    }
}

impl<E: Queryable> ApiParameterBuilder<E> {
    /// Starts an assertion on the field with wire path `name`.
    ///
    /// Values are passed as strings; the field metadata still governs which
    /// operators and null assertions are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for an empty or unknown name, or if the
    /// field is not filterable.
    pub fn filter_by_name(
        &mut self,
        name: &str,
    ) -> Result<Assertion<'_, E, Option<String>>, ValidationError> {
        let selector = E::field_by_name::<Option<String>>(name)?;
        self.filter(selector)
    }

    /// Sorts by the field with wire path `name`.
    ///
    /// Repeated calls append secondary sorts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for an empty or unknown name, or if the
    /// field is not orderable.
    pub fn order_by_name(
        &mut self,
        name: &str,
        direction: SortDirection,
    ) -> Result<&mut Self, ValidationError> {
        let selector = E::field_by_name::<()>(name)?;
        self.push_order(selector, direction)
    }

    /// Expands the field with wire path `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for an empty or unknown name, or if the
    /// field is not expandable.
    pub fn expand_by_name(&mut self, name: &str) -> Result<&mut Self, ValidationError> {
        let selector = E::field_by_name::<()>(name)?;
        self.expand(selector)
    }
}

impl<E> QueryParameters for ApiParameterBuilder<E> {
    fn build(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();

        if let Some(filter) = self.filters.to_query_value() {
            params.insert("filter".to_string(), filter);
        }
        if let Some(expand) = self.expand.to_query_value() {
            params.insert("expand".to_string(), expand);
        }
        if let Some(order) = self.order.to_query_value() {
            params.insert("order".to_string(), order);
        }
        if let Some(search) = &self.search {
            params.insert("search".to_string(), search.clone());
        }
        if let Some(limit) = self.limit {
            params.insert("limit".to_string(), limit.to_string());
        }
        if let Some(offset) = self.offset {
            params.insert("offset".to_string(), offset.to_string());
        }

        params
    }
}
