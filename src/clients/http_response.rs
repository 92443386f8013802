//! HTTP response types for the MoySklad API client.

use std::collections::HashMap;

/// `X-RateLimit-Remaining` value at or below which a warning is logged.
pub const RATE_LIMIT_LOW_WATERMARK: u32 = 5;

/// Rate limit information parsed from the `X-RateLimit-*` and
/// `X-Lognex-*` response headers.
///
/// All durations are in milliseconds, as sent by the service.
///
/// # Example
///
/// ```rust
/// use moysklad_api::clients::RateLimit;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ratelimit-limit".to_string(), vec!["45".to_string()]);
/// headers.insert("x-ratelimit-remaining".to_string(), vec!["44".to_string()]);
///
/// let limit = RateLimit::from_headers(&headers).unwrap();
/// assert_eq!(limit.limit, Some(45));
/// assert_eq!(limit.remaining, Some(44));
/// assert!(!limit.is_low());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests allowed per window (`X-RateLimit-Limit`).
    pub limit: Option<u32>,
    /// Requests left in the current window (`X-RateLimit-Remaining`).
    pub remaining: Option<u32>,
    /// Window length (`X-Lognex-Retry-TimeInterval`).
    pub interval_ms: Option<u64>,
    /// Time until the window resets (`X-Lognex-Reset`).
    pub reset_ms: Option<u64>,
    /// Time to wait before retrying a rejected request (`X-Lognex-Retry-After`).
    pub retry_after_ms: Option<u64>,
}

impl RateLimit {
    /// Parses the rate limit headers, `None` when none of them is present.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Option<Self> {
        fn header<T: std::str::FromStr>(
            headers: &HashMap<String, Vec<String>>,
            name: &str,
        ) -> Option<T> {
            headers
                .get(name)
                .and_then(|values| values.first())
                .and_then(|value| value.trim().parse().ok())
        }

        let limit = Self {
            limit: header(headers, "x-ratelimit-limit"),
            remaining: header(headers, "x-ratelimit-remaining"),
            interval_ms: header(headers, "x-lognex-retry-timeinterval"),
            reset_ms: header(headers, "x-lognex-reset"),
            retry_after_ms: header(headers, "x-lognex-retry-after"),
        };

        if limit == Self::default() {
            None
        } else {
            Some(limit)
        }
    }

    /// Returns `true` when the remaining budget is at or below
    /// [`RATE_LIMIT_LOW_WATERMARK`].
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining
            .is_some_and(|remaining| remaining <= RATE_LIMIT_LOW_WATERMARK)
    }
}

/// An HTTP response from the JSON API.
///
/// Responses are returned for every status code; use [`HttpResponse::is_ok`]
/// to tell success from failure.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body (`{}` for empty bodies).
    pub body: serde_json::Value,
    /// Rate limit information, if the service sent any.
    pub rate_limit: Option<RateLimit>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the rate limit headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let rate_limit = RateLimit::from_headers(&headers);
        Self {
            code,
            headers,
            body,
            rate_limit,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Lognex-Retry-After` value in milliseconds, if present.
    #[must_use]
    pub fn retry_after_ms(&self) -> Option<u64> {
        self.rate_limit.and_then(|limit| limit.retry_after_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_rate_limit_parses_all_headers() {
        let limit = RateLimit::from_headers(&headers(&[
            ("x-ratelimit-limit", "45"),
            ("x-ratelimit-remaining", "3"),
            ("x-lognex-retry-timeinterval", "3000"),
            ("x-lognex-reset", "1200"),
            ("x-lognex-retry-after", "850"),
        ]))
        .unwrap();

        assert_eq!(limit.limit, Some(45));
        assert_eq!(limit.remaining, Some(3));
        assert_eq!(limit.interval_ms, Some(3000));
        assert_eq!(limit.reset_ms, Some(1200));
        assert_eq!(limit.retry_after_ms, Some(850));
        assert!(limit.is_low());
    }

    #[test]
    fn test_rate_limit_absent_without_headers() {
        assert!(RateLimit::from_headers(&HashMap::new()).is_none());
        assert!(RateLimit::from_headers(&headers(&[("x-ratelimit-limit", "n/a")])).is_none());
    }

    #[test]
    fn test_is_ok_for_2xx_range() {
        assert!(HttpResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(HttpResponse::new(204, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(412, HashMap::new(), json!({})).is_ok());
        assert!(!HttpResponse::new(500, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_request_id_and_retry_after() {
        let response = HttpResponse::new(
            429,
            headers(&[("x-request-id", "req-1"), ("x-lognex-retry-after", "500")]),
            json!({}),
        );
        assert_eq!(response.request_id(), Some("req-1"));
        assert_eq!(response.retry_after_ms(), Some(500));
    }
}
