//! Response wrappers for resource operations.
//!
//! [`ApiResponse<T>`] combines decoded data with the rate limit and request
//! ID of the HTTP response, and implements `Deref<Target = T>`:
//!
//! ```rust,ignore
//! let response = Product::all(&client, None).await?;
//!
//! // EntityList methods via Deref
//! for product in response.rows.iter() {
//!     println!("{}", product.name);
//! }
//!
//! if let Some(offset) = response.next_offset() {
//!     query.offset(offset)?;
//!     // Fetch next page...
//! }
//! ```
//!
//! Collections come back as an [`EntityList`]: a `meta` block describing the
//! page and the `rows` of the page.

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::{HttpResponse, RateLimit};
use crate::rest::ApiError;

/// A decoded response from a resource operation.
///
/// # Example
///
/// ```rust
/// use moysklad_api::rest::ApiResponse;
///
/// let response = ApiResponse::new(vec!["a", "b"], None, Some("req-1".to_string()));
/// assert_eq!(response.len(), 2);
/// assert_eq!(response.request_id(), Some("req-1"));
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    data: T,
    rate_limit: Option<RateLimit>,
    request_id: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Creates a new `ApiResponse` with the given data and metadata.
    #[must_use]
    pub const fn new(data: T, rate_limit: Option<RateLimit>, request_id: Option<String>) -> Self {
        Self {
            data,
            rate_limit,
            request_id,
        }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns a reference to the inner data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns the rate limit information, if the service sent any.
    #[must_use]
    pub const fn rate_limit(&self) -> Option<&RateLimit> {
        self.rate_limit.as_ref()
    }

    /// Returns the request ID from the response headers.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Maps the inner data to a new type, preserving metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            data: f(self.data),
            rate_limit: self.rate_limit,
            request_id: self.request_id,
        }
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decodes the whole body of a successful HTTP response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Deserialize`] if the body does not match `T`.
    pub fn from_http_response(
        response: HttpResponse,
        resource: &'static str,
    ) -> Result<Self, ApiError> {
        let request_id = response.request_id().map(ToString::to_string);
        let data = serde_json::from_value(response.body)
            .map_err(|source| ApiError::Deserialize { resource, source })?;

        Ok(Self {
            data,
            rate_limit: response.rate_limit,
            request_id,
        })
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ApiResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

/// Paging metadata of a collection response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// Link to the current page.
    #[serde(default)]
    pub href: String,
    /// Type of the listed entities (e.g., `product`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Total number of entities matching the query.
    #[serde(default)]
    pub size: i64,
    /// Page size applied by the service.
    #[serde(default)]
    pub limit: i64,
    /// Offset of the first row of this page.
    #[serde(default)]
    pub offset: i64,
    /// Link to the next page, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_href: Option<String>,
    /// Link to the previous page, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_href: Option<String>,
}

/// One page of a collection: `meta` plus `rows`.
///
/// # Example
///
/// ```rust
/// use moysklad_api::rest::{EntityList, ListMeta};
///
/// let page = EntityList {
///     meta: ListMeta { size: 250, limit: 100, offset: 100, ..Default::default() },
///     rows: vec![0_u8; 100],
/// };
/// assert!(page.has_next_page());
/// assert_eq!(page.next_offset(), Some(200));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityList<T> {
    /// Paging metadata.
    pub meta: ListMeta,
    /// The entities of this page.
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
}

impl<T> EntityList<T> {
    /// Returns `true` if more rows follow this page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.meta.next_href.is_some() || self.end_offset() < self.meta.size
    }

    /// Returns the offset of the next page, if any.
    #[must_use]
    pub fn next_offset(&self) -> Option<i64> {
        self.has_next_page().then(|| self.end_offset())
    }

    /// Returns the number of rows on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the rows of this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    fn end_offset(&self) -> i64 {
        let page = if self.meta.limit > 0 {
            self.meta.limit
        } else {
            i64::try_from(self.rows.len()).unwrap_or(i64::MAX)
        };
        self.meta.offset.saturating_add(page)
    }
}

impl<T> IntoIterator for EntityList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EntityList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// Verify response types are Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiResponse<String>>();
    assert_send_sync::<ApiResponse<EntityList<String>>>();
};
