//! Resource trait for CRUD operations.
//!
//! Types implementing [`RestResource`] gain `find()`, `all()`,
//! `all_with_parent()`, `save()` and `delete()`. Queries are passed as the
//! resource's [`RestResource::Query`] type, usually an
//! [`ApiParameterBuilder`](crate::query::ApiParameterBuilder) over the
//! resource itself.
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use moysklad_api::query::ApiParameterBuilder;
//! use moysklad_api::rest::{RestResource, ResourceOperation, ResourcePath};
//! use serde::{Deserialize, Serialize};
//! use uuid::Uuid;
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Store {
//!     #[serde(skip_serializing)]
//!     pub id: Option<Uuid>,
//!     pub name: String,
//! }
//!
//! impl RestResource for Store {
//!     type Query = ApiParameterBuilder<Self>;
//!
//!     const NAME: &'static str = "Store";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(ResourceOperation::Find, &["id"], "entity/store/{id}"),
//!         ResourcePath::new(ResourceOperation::All, &[], "entity/store"),
//!         ResourcePath::new(ResourceOperation::Create, &[], "entity/store"),
//!         ResourcePath::new(ResourceOperation::Update, &["id"], "entity/store/{id}"),
//!         ResourcePath::new(ResourceOperation::Delete, &["id"], "entity/store/{id}"),
//!     ];
//!
//!     fn get_id(&self) -> Option<Uuid> {
//!         self.id
//!     }
//! }
//!
//! let store = Store::find(&client, id, None).await?;
//! let stores = Store::all(&client, None).await?;
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::clients::{HttpResponse, RestClient};
use crate::query::QueryParameters;
use crate::rest::{build_path, get_path, ApiError, ApiResponse, EntityList, ResourceOperation, ResourcePath};

/// An entity that can be fetched, listed, created, updated, and deleted.
///
/// # Associated Items
///
/// - `Query`: the query type accepted by `find()` and `all()`
/// - `NAME`: the resource name used in error messages
/// - `PATHS`: available paths for the supported operations
/// - `PREFIX`: optional path prefix
///
/// Request bodies are the serialized entity itself; the service does not wrap
/// them in a key. Responses decode into the entity, or into an
/// [`EntityList`] for collections.
#[allow(async_fn_in_trait)]
pub trait RestResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// Query parameters for `find()` and `all()`.
    type Query: QueryParameters + Send + Sync;

    /// The singular name of the resource (e.g., "Product").
    const NAME: &'static str;

    /// Available paths for this resource.
    const PATHS: &'static [ResourcePath];

    /// Optional path prefix.
    const PREFIX: Option<&'static str> = None;

    /// Returns the entity's ID, or `None` for an entity not yet created.
    fn get_id(&self) -> Option<Uuid>;

    /// Finds a single entity by ID.
    ///
    /// Only the `expand` part of a query is meaningful here, but the whole
    /// query is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the entity doesn't exist.
    /// Returns [`ApiError::PathResolutionFailed`] if no valid path matches.
    async fn find(
        client: &RestClient,
        id: Uuid,
        query: Option<&Self::Query>,
    ) -> Result<ApiResponse<Self>, ApiError> {
        let id = id.to_string();
        let mut ids: HashMap<&str, &str> = HashMap::new();
        ids.insert("id", &id);

        let path = resolve_path::<Self>(ResourceOperation::Find, &ids)?;
        fetch(client, &path, query, Self::NAME, Some(&id)).await
    }

    /// Lists the entities matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PathResolutionFailed`] if no valid path matches.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut query = ApiParameterBuilder::<Product>::new();
    /// query.filter(Product::ARCHIVED)?.be(false)?;
    /// query.limit(100)?;
    ///
    /// let page = Product::all(&client, Some(&query)).await?;
    /// if let Some(offset) = page.next_offset() {
    ///     // Fetch next page...
    /// }
    /// ```
    async fn all(
        client: &RestClient,
        query: Option<&Self::Query>,
    ) -> Result<ApiResponse<EntityList<Self>>, ApiError> {
        let path = resolve_path::<Self>(ResourceOperation::All, &HashMap::new())?;
        fetch(client, &path, query, Self::NAME, None).await
    }

    /// Lists entities nested under a parent entity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PathResolutionFailed`] if no valid path matches.
    async fn all_with_parent<ParentId: Display + Send>(
        client: &RestClient,
        parent_id_name: &str,
        parent_id: ParentId,
        query: Option<&Self::Query>,
    ) -> Result<ApiResponse<EntityList<Self>>, ApiError> {
        let parent_id = parent_id.to_string();
        let mut ids: HashMap<&str, &str> = HashMap::new();
        ids.insert(parent_id_name, &parent_id);

        let path = resolve_path::<Self>(ResourceOperation::All, &ids)?;
        fetch(client, &path, query, Self::NAME, None).await
    }

    /// Saves the entity: POST when it has no ID, PUT otherwise.
    ///
    /// Returns the entity as stored by the service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the service rejects the entity.
    /// Returns [`ApiError::NotFound`] if updating a non-existent entity.
    async fn save(&self, client: &RestClient) -> Result<Self, ApiError> {
        let body = serde_json::to_value(self).map_err(|source| ApiError::Deserialize {
            resource: Self::NAME,
            source,
        })?;

        let (response, id) = if let Some(id) = self.get_id() {
            let id = id.to_string();
            let mut ids: HashMap<&str, &str> = HashMap::new();
            ids.insert("id", &id);

            let path = resolve_path::<Self>(ResourceOperation::Update, &ids)?;
            (client.put(&path, body, None).await?, Some(id))
        } else {
            let path = resolve_path::<Self>(ResourceOperation::Create, &HashMap::new())?;
            (client.post(&path, body, None).await?, None)
        };

        let response = ensure_success(response, Self::NAME, id.as_deref())?;
        ApiResponse::from_http_response(response, Self::NAME).map(ApiResponse::into_inner)
    }

    /// Deletes the entity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the entity doesn't exist.
    /// Returns [`ApiError::PathResolutionFailed`] if the entity has no ID or
    /// the resource has no delete path.
    async fn delete(&self, client: &RestClient) -> Result<(), ApiError> {
        let id = self
            .get_id()
            .ok_or(ApiError::PathResolutionFailed {
                resource: Self::NAME,
                operation: "delete",
            })?
            .to_string();
        let mut ids: HashMap<&str, &str> = HashMap::new();
        ids.insert("id", &id);

        let path = resolve_path::<Self>(ResourceOperation::Delete, &ids)?;
        let response = client.delete(&path, None).await?;
        ensure_success(response, Self::NAME, Some(&id))?;
        Ok(())
    }

    /// Builds the full path including any prefix.
    #[must_use]
    fn build_full_path(path: &str) -> String {
        Self::PREFIX.map_or_else(|| path.to_string(), |prefix| format!("{prefix}/{path}"))
    }
}

/// Marker for resources that only support read operations.
///
/// Read-only resources declare no Create, Update, or Delete paths; calling
/// `save()` or `delete()` on them fails with
/// [`ApiError::PathResolutionFailed`].
pub trait ReadOnlyResource: RestResource {}

fn resolve_path<R: RestResource>(
    operation: ResourceOperation,
    ids: &HashMap<&str, &str>,
) -> Result<String, ApiError> {
    let available_ids: Vec<&str> = ids.keys().copied().collect();
    let path = get_path(R::PATHS, operation, &available_ids).ok_or(
        ApiError::PathResolutionFailed {
            resource: R::NAME,
            operation: operation.as_str(),
        },
    )?;
    Ok(R::build_full_path(&build_path(path.template, ids)))
}

/// Sends a GET request and decodes a successful body into `T`.
pub(crate) async fn fetch<T, Q>(
    client: &RestClient,
    path: &str,
    query: Option<&Q>,
    resource: &'static str,
    id: Option<&str>,
) -> Result<ApiResponse<T>, ApiError>
where
    T: DeserializeOwned,
    Q: QueryParameters + ?Sized,
{
    let params = query.map(QueryParameters::build).filter(|q| !q.is_empty());
    let response = client.get(path, params).await?;
    let response = ensure_success(response, resource, id)?;
    ApiResponse::from_http_response(response, resource)
}

fn ensure_success(
    response: HttpResponse,
    resource: &'static str,
    id: Option<&str>,
) -> Result<HttpResponse, ApiError> {
    if response.is_ok() {
        Ok(response)
    } else {
        Err(ApiError::from_http_response(&response, resource, id))
    }
}
