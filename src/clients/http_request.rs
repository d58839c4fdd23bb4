//! HTTP request types.
//!
//! This module provides [`HttpMethod`] with its accepted-status table and
//! [`HttpRequest`], which knows how to resolve its URL against a
//! [`BaseUrl`] and which headers go out with it.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;

use crate::config::{AdditionalHeaders, BaseUrl};

/// User-Agent sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("Websupport Rust Library v", env!("CARGO_PKG_VERSION"));

/// Total time allowed for one request, from connect to the last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP methods supported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if `status` is a non-error outcome for this method.
    ///
    /// POST and PUT also accept 400 and 422: validation failures come back
    /// as ordinary decoded bodies that the caller has to inspect.
    ///
    /// # Example
    ///
    /// ```rust
    /// use websupport_rest::HttpMethod;
    ///
    /// assert!(HttpMethod::Post.accepts(422));
    /// assert!(!HttpMethod::Get.accepts(201));
    /// ```
    #[must_use]
    pub const fn accepts(self, status: u16) -> bool {
        match self {
            Self::Get | Self::Delete => status == 200,
            Self::Post | Self::Put => matches!(status, 200 | 201 | 400 | 422),
        }
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single request: method, path and optional JSON body.
///
/// # Example
///
/// ```rust
/// use websupport_rest::{BaseUrl, HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let base = BaseUrl::new("https://rest.example.com").unwrap();
/// let request = HttpRequest::new(HttpMethod::Post, "/v1/user/self/zone")
///     .body(Some(json!({"name": "example.com"})));
///
/// assert_eq!(request.url(&base), "https://rest.example.com/v1/user/self/zone");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method.
    pub http_method: HttpMethod,
    /// Path relative to the base URL, or an absolute URL starting with it.
    pub path: String,
    /// JSON body; `None` is sent as `null` for POST and PUT and omitted otherwise.
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Creates a request without a body.
    #[must_use]
    pub fn new(http_method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method,
            path: path.into(),
            body: None,
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Resolves the request URL.
    ///
    /// A path that already starts with the base URL (for example a link
    /// copied from an earlier response) has that prefix stripped before the
    /// remainder is appended, so the base URL never appears twice.
    #[must_use]
    pub fn url(&self, base_url: &BaseUrl) -> String {
        let base = base_url.as_ref();
        let path = self.path.strip_prefix(base).unwrap_or(&self.path);
        format!("{base}{path}")
    }

    /// Returns the serialized JSON body, if any.
    ///
    /// POST and PUT always carry a body: a missing one is sent as `null`.
    /// GET and DELETE send no body when none is set.
    #[must_use]
    pub fn serialized_body(&self) -> Option<String> {
        match (&self.body, self.http_method) {
            (Some(body), _) => Some(body.to_string()),
            (None, HttpMethod::Post | HttpMethod::Put) => Some(Value::Null.to_string()),
            (None, HttpMethod::Get | HttpMethod::Delete) => None,
        }
    }
}

/// Builds the header map for a request.
///
/// The fixed `Accept`, `Content-Type` and `User-Agent` headers come first;
/// additional headers are appended after them and never replace them.
#[must_use]
pub fn request_headers(additional: &AdditionalHeaders) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    for (name, value) in additional.iter() {
        headers.append(name.clone(), value.clone());
    }
    headers
}
