//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type and the pagination
//! metadata parsed from GitLab's list headers.

use std::collections::HashMap;

use serde_json::Value;

/// Pagination metadata from `X-*` list headers and the `Link` header.
///
/// GitLab omits `X-Total` and `X-Total-Pages` for very large collections,
/// and keyset pagination only provides the `Link` next URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Current page number (`X-Page`).
    pub page: Option<u64>,
    /// Next page number (`X-Next-Page`).
    pub next_page: Option<u64>,
    /// Previous page number (`X-Prev-Page`).
    pub prev_page: Option<u64>,
    /// Page size (`X-Per-Page`).
    pub per_page: Option<u64>,
    /// Number of pages (`X-Total-Pages`).
    pub total_pages: Option<u64>,
    /// Number of records (`X-Total`).
    pub total: Option<u64>,
    /// URL of the next page (`Link: <…>; rel="next"`).
    pub next_url: Option<String>,
    /// URL of the previous page (`Link: <…>; rel="prev"`).
    pub prev_url: Option<String>,
}

impl PaginationInfo {
    /// Parses pagination metadata from lower-cased response headers.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Self {
        let number = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .and_then(|value| value.trim().parse::<u64>().ok())
        };

        let mut info = headers
            .get("link")
            .map(|values| Self::parse_link_header(&values.join(",")))
            .unwrap_or_default();

        info.page = number("x-page");
        info.next_page = number("x-next-page");
        info.prev_page = number("x-prev-page");
        info.per_page = number("x-per-page");
        info.total_pages = number("x-total-pages");
        info.total = number("x-total");
        info
    }

    /// Parses the `next` and `prev` URLs from a Link header value.
    ///
    /// The Link header format is:
    /// `<url>; rel="next", <url>; rel="prev"`
    ///
    /// URLs are read between `<` and `>`, so commas inside a URL are kept.
    #[must_use]
    pub fn parse_link_header(header_value: &str) -> Self {
        let mut result = Self::default();
        let mut rest = header_value;

        while let Some(start) = rest.find('<') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('>') else {
                break;
            };
            let url = after[..end].trim();
            let tail = &after[end + 1..];
            let params = &tail[..tail.find('<').unwrap_or(tail.len())];
            rest = &tail[params.len()..];

            let rel = params.split(';').find_map(|part| {
                part.trim().strip_prefix("rel=").map(|rel| {
                    rel.trim_matches(|c: char| c == '"' || c == ',' || c.is_whitespace())
                })
            });

            if url.is_empty() {
                continue;
            }
            match rel {
                Some("next") => result.next_url = Some(url.to_string()),
                Some("prev" | "previous") => result.prev_url = Some(url.to_string()),
                _ => {}
            }
        }

        result
    }

    /// Returns the number of the following offset page.
    ///
    /// `X-Next-Page` when sent, otherwise `X-Page + 1` while
    /// `X-Page < X-Total-Pages`.
    #[must_use]
    pub const fn following_page(&self) -> Option<u64> {
        if let Some(next) = self.next_page {
            return Some(next);
        }
        match (self.page, self.total_pages) {
            (Some(page), Some(total)) if page < total => Some(page + 1),
            _ => None,
        }
    }

    /// Returns `true` if the server advertised another page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.following_page().is_some() || self.next_url.is_some()
    }
}

/// An HTTP response from the GitLab API.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keys lower-cased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed body; `Null` when empty, a `String` when not JSON.
    pub body: Value,
    /// Parsed pagination headers.
    pub pagination: PaginationInfo,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing pagination headers.
    ///
    /// Header names are lower-cased on the way in.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        let headers: HashMap<String, Vec<String>> = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        let pagination = PaginationInfo::from_headers(&headers);
        Self {
            code,
            headers,
            body,
            pagination,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `Retry-After` header in seconds, if present.
    #[must_use]
    pub fn retry_after(&self) -> Option<f64> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
    }
}
