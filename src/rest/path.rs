//! Path templates for MoySklad resources.
//!
//! A resource can be reachable through more than one path. Order positions,
//! for instance, live under their order:
//! - `entity/customerorder/{order_id}/positions/{id}` (a single position)
//! - `entity/customerorder/{order_id}/positions` (all positions of an order)
//!
//! [`get_path`] selects the most specific template whose IDs are all
//! available and [`build_path`] interpolates them.
//!
//! # Example
//!
//! ```rust
//! use moysklad_api::rest::{ResourcePath, ResourceOperation, get_path, build_path};
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(
//!         ResourceOperation::Find,
//!         &["order_id", "id"],
//!         "entity/customerorder/{order_id}/positions/{id}",
//!     ),
//!     ResourcePath::new(ResourceOperation::Find, &["id"], "entity/customerorder/{id}"),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Find, &["order_id", "id"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("order_id", "o-1");
//! ids.insert("id", "p-2");
//! assert_eq!(
//!     build_path(path.template, &ids),
//!     "entity/customerorder/o-1/positions/p-2"
//! );
//! ```

use std::collections::HashMap;
use std::fmt::Display;

/// Operations that can be performed on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single entity by ID.
    Find,
    /// List entities, or fetch a report.
    All,
    /// Create an entity (POST).
    Create,
    /// Update an entity (PUT).
    Update,
    /// Delete an entity.
    Delete,
}

impl ResourceOperation {
    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::All => "all",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A path template for one resource operation.
///
/// Templates use `{name}` placeholders, for example `entity/product/{id}`.
///
/// ```rust
/// use moysklad_api::rest::{ResourcePath, ResourceOperation};
///
/// const PRODUCT_FIND: ResourcePath = ResourcePath::new(
///     ResourceOperation::Find,
///     &["id"],
///     "entity/product/{id}",
/// );
/// assert_eq!(PRODUCT_FIND.id_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required ID parameters in order (e.g., `["order_id", "id"]`).
    pub ids: &'static [&'static str],
    /// The path template with `{id}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    #[must_use]
    pub const fn new(
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required IDs for this path.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks if all required IDs are available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the best matching path for an operation.
///
/// Among the paths for `operation` whose IDs are all available, the one with
/// the most IDs wins. Returns `None` when nothing matches.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Replaces `{name}` placeholders in `template` with values from `ids`.
///
/// Placeholders without a value are left untouched.
///
/// ```rust
/// use moysklad_api::rest::build_path;
/// use std::collections::HashMap;
///
/// let mut ids = HashMap::new();
/// ids.insert("id", "6f3c1e2a");
/// assert_eq!(build_path("entity/counterparty/{id}", &ids), "entity/counterparty/6f3c1e2a");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &value.to_string());
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
