//! Error types for resource operations.
//!
//! [`ApiError`] extends the transport errors with the semantics of the
//! MoySklad JSON API. Non-2xx responses are translated by status code:
//!
//! - **404**: [`ApiError::NotFound`]
//! - **400, 412, 422**: [`ApiError::Rejected`] with the service's error list
//! - **401, 403**: [`ApiError::Unauthorized`]
//! - **429**: [`ApiError::RateLimited`] with the `X-Lognex-Retry-After` hint
//! - **Other 4xx/5xx**: [`ApiError::Api`]
//!
//! The service reports failures as
//!
//! ```json
//! {"errors": [{"error": "...", "code": 1021, "parameter": "name", "moreInfo": "..."}]}
//! ```
//!
//! and each entry becomes an [`ApiErrorDetail`].
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::rest::{ApiError, RestResource};
//! use moysklad_api::rest::resources::Product;
//!
//! match Product::find(&client, id, None).await {
//!     Ok(product) => println!("Found: {}", product.name),
//!     Err(ApiError::NotFound { resource, id }) => println!("{resource} {id} is gone"),
//!     Err(ApiError::Rejected { errors, .. }) => {
//!         for error in errors {
//!             println!("{}: {}", error.parameter.unwrap_or_default(), error.error);
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::clients::{HttpError, HttpResponse, RestError};
use crate::query::ValidationError;

/// One entry of the service's `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    /// Human-readable message.
    #[serde(default)]
    pub error: String,
    /// Numeric error code assigned by the service.
    pub code: Option<i64>,
    /// The request parameter or field the error refers to.
    pub parameter: Option<String>,
    /// Link to the documentation of the error code.
    pub more_info: Option<String>,
}

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use moysklad_api::rest::{ApiError, ApiErrorDetail};
///
/// let error = ApiError::NotFound {
///     resource: "Product",
///     id: "7944ef04-f831-11e5-7a69-971500188b19".to_string(),
/// };
/// assert!(error.to_string().contains("Product"));
///
/// let error = ApiError::Rejected {
///     status: 412,
///     errors: vec![ApiErrorDetail {
///         error: "Field 'name' is required".to_string(),
///         code: Some(3000),
///         ..Default::default()
///     }],
///     request_id: None,
/// };
/// assert!(error.to_string().contains("Field 'name' is required"));
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The entity does not exist (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Product").
        resource: &'static str,
        /// The ID that was requested.
        id: String,
    },

    /// The service rejected the request as invalid (HTTP 400, 412, 422).
    #[error("Request rejected ({status}): {}", join_messages(.errors))]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The errors reported by the service.
        errors: Vec<ApiErrorDetail>,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// The credentials were refused (HTTP 401, 403).
    #[error("Unauthorized ({status}): {}", join_messages(.errors))]
    Unauthorized {
        /// The HTTP status code.
        status: u16,
        /// The errors reported by the service.
        errors: Vec<ApiErrorDetail>,
    },

    /// Too many requests (HTTP 429).
    #[error("Rate limit exceeded, retry after {retry_after_ms:?} ms")]
    RateLimited {
        /// Milliseconds until the next request is accepted, when reported.
        retry_after_ms: Option<u64>,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// Any other non-2xx response.
    #[error("API error ({status}): {}", join_messages(.errors))]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The errors reported by the service.
        errors: Vec<ApiErrorDetail>,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// The query was built incorrectly.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No path matches the provided IDs and operation.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "find", "all", "delete").
        operation: &'static str,
    },

    /// A body could not be converted to or from the resource type.
    #[error("Failed to convert {resource}: {source}")]
    Deserialize {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ApiError {
    /// Translates a non-2xx response into an `ApiError`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use moysklad_api::clients::HttpResponse;
    /// use moysklad_api::rest::ApiError;
    /// use serde_json::json;
    /// use std::collections::HashMap;
    ///
    /// let response = HttpResponse::new(404, HashMap::new(), json!({}));
    /// let error = ApiError::from_http_response(&response, "Product", Some("42"));
    /// assert!(matches!(error, ApiError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_http_response(
        response: &HttpResponse,
        resource: &'static str,
        id: Option<&str>,
    ) -> Self {
        let request_id = response.request_id().map(ToString::to_string);

        match response.code {
            404 => Self::NotFound {
                resource,
                id: id.unwrap_or("unknown").to_string(),
            },
            400 | 412 | 422 => Self::Rejected {
                status: response.code,
                errors: parse_error_details(&response.body),
                request_id,
            },
            401 | 403 => Self::Unauthorized {
                status: response.code,
                errors: parse_error_details(&response.body),
            },
            429 => Self::RateLimited {
                retry_after_ms: response.retry_after_ms(),
                request_id,
            },
            status => Self::Api {
                status,
                errors: parse_error_details(&response.body),
                request_id,
            },
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Rejected { request_id, .. }
            | Self::RateLimited { request_id, .. }
            | Self::Api { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the error details reported by the service, if any.
    #[must_use]
    pub fn details(&self) -> &[ApiErrorDetail] {
        match self {
            Self::Rejected { errors, .. }
            | Self::Unauthorized { errors, .. }
            | Self::Api { errors, .. } => errors,
            _ => &[],
        }
    }
}

/// Parses the `errors` array of an error body.
///
/// Entries that do not decode are skipped. A body kept verbatim by the
/// transport under `raw_body` becomes a single detail carrying that text.
fn parse_error_details(body: &serde_json::Value) -> Vec<ApiErrorDetail> {
    if let Some(serde_json::Value::Array(entries)) = body.get("errors") {
        return entries
            .iter()
            .filter_map(|entry| ApiErrorDetail::deserialize(entry).ok())
            .collect();
    }

    body.get("raw_body")
        .and_then(serde_json::Value::as_str)
        .map(|text| {
            vec![ApiErrorDetail {
                error: text.to_string(),
                ..ApiErrorDetail::default()
            }]
        })
        .unwrap_or_default()
}

fn join_messages(errors: &[ApiErrorDetail]) -> String {
    if errors.is_empty() {
        return "no details".to_string();
    }
    errors
        .iter()
        .map(|e| e.error.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(code: u16, body: serde_json::Value) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-1".to_string()]);
        HttpResponse::new(code, headers, body)
    }

    #[test]
    fn test_not_found_error_formats_message_with_resource_and_id() {
        let error = ApiError::from_http_response(&response(404, json!({})), "Product", Some("abc"));
        assert_eq!(error.to_string(), "Product with id abc not found");
    }

    #[test]
    fn test_rejected_statuses_parse_error_details() {
        let body = json!({
            "errors": [
                {
                    "error": "Field 'name' is required",
                    "code": 3000,
                    "parameter": "name",
                    "moreInfo": "https://dev.moysklad.ru/doc/api/remap/1.2/#error_3000"
                },
                {"error": "Unknown field 'foo'", "code": 1002}
            ]
        });

        for status in [400, 412, 422] {
            let error = ApiError::from_http_response(&response(status, body.clone()), "Product", None);
            let ApiError::Rejected { status: s, errors, request_id } = error else {
                panic!("Expected Rejected for {status}");
            };
            assert_eq!(s, status);
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].code, Some(3000));
            assert_eq!(errors[0].parameter.as_deref(), Some("name"));
            assert!(errors[0].more_info.is_some());
            assert_eq!(request_id.as_deref(), Some("req-1"));
        }
    }

    #[test]
    fn test_unauthorized_statuses() {
        let body = json!({"errors": [{"error": "Authentication failed", "code": 1056}]});
        let error = ApiError::from_http_response(&response(401, body), "Product", None);
        assert!(matches!(error, ApiError::Unauthorized { status: 401, .. }));
        assert!(error.to_string().contains("Authentication failed"));

        let error = ApiError::from_http_response(&response(403, json!({})), "Product", None);
        assert!(matches!(error, ApiError::Unauthorized { status: 403, .. }));
    }

    #[test]
    fn test_rate_limited_carries_retry_hint() {
        let mut headers = HashMap::new();
        headers.insert("x-lognex-retry-after".to_string(), vec!["1500".to_string()]);
        let response = HttpResponse::new(429, headers, json!({}));

        let error = ApiError::from_http_response(&response, "Product", None);
        assert!(matches!(
            error,
            ApiError::RateLimited { retry_after_ms: Some(1500), .. }
        ));
    }

    #[test]
    fn test_other_status_maps_to_api_with_raw_body() {
        let body = json!({"raw_body": "<html>Bad Gateway</html>"});
        let error = ApiError::from_http_response(&response(502, body), "Product", None);

        assert!(matches!(error, ApiError::Api { status: 502, .. }));
        assert_eq!(error.details()[0].error, "<html>Bad Gateway</html>");
        assert_eq!(error.request_id(), Some("req-1"));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let body = json!({"errors": ["not an object", {"error": "kept"}]});
        let details = parse_error_details(&body);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].error, "kept");
    }

    #[test]
    fn test_message_without_details() {
        let error = ApiError::Api {
            status: 500,
            errors: Vec::new(),
            request_id: None,
        };
        assert_eq!(error.to_string(), "API error (500): no details");
    }

    #[test]
    fn test_conversions_from_lower_layers() {
        let error: ApiError = ValidationError::LimitOutOfRange { limit: 0 }.into();
        assert!(matches!(error, ApiError::Validation(_)));

        let error: ApiError = RestError::InvalidPath {
            path: String::new(),
        }
        .into();
        assert!(matches!(error, ApiError::Rest(_)));
    }

    #[test]
    fn test_path_resolution_failed_includes_operation_context() {
        let error = ApiError::PathResolutionFailed {
            resource: "CustomerOrderPosition",
            operation: "find",
        };
        let message = error.to_string();
        assert!(message.contains("CustomerOrderPosition"));
        assert!(message.contains("find"));
    }
}
