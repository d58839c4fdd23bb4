//! Error types returned by [`crate::RestClient`] requests.
//!
//! Every failing call returns exactly one [`RestError`]:
//!
//! - [`RestError::Transport`]: no HTTP response was obtained at all
//! - [`RestError::Api`]: a response arrived but was classified as a failure,
//!   see [`ErrorKind`] for the possible classifications
//!
//! # Example
//!
//! ```rust,ignore
//! use websupport_rest::{ErrorKind, RestError};
//!
//! match client.get("/v1/user/self", None) {
//!     Ok(user) => println!("user: {user}"),
//!     Err(RestError::Api(e)) if e.kind == ErrorKind::NotFound => println!("no such user"),
//!     Err(RestError::Api(e)) => println!("API error {}: {}", e.status, e.message),
//!     Err(RestError::Transport { message }) => println!("network: {message}"),
//! }
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Classification of a failed response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Any non-accepted status without a dedicated kind.
    Generic,
    /// HTTP 403.
    AccessDenied,
    /// HTTP 401.
    Authentication,
    /// HTTP 404.
    NotFound,
    /// HTTP 500.
    ServerError,
    /// HTTP 501.
    NotImplemented,
    /// The response body was not valid JSON.
    JsonParse,
}

impl ErrorKind {
    /// Maps a non-accepted HTTP status to its error kind.
    ///
    /// # Example
    ///
    /// ```rust
    /// use websupport_rest::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
    /// assert_eq!(ErrorKind::from_status(418), ErrorKind::Generic);
    /// ```
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            500 => Self::ServerError,
            501 => Self::NotImplemented,
            _ => Self::Generic,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generic => "API error",
            Self::AccessDenied => "access denied",
            Self::Authentication => "authentication failed",
            Self::NotFound => "not found",
            Self::ServerError => "server error",
            Self::NotImplemented => "not implemented",
            Self::JsonParse => "JSON parse error",
        };
        f.write_str(name)
    }
}

/// Response body carried by an [`ApiError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorBody {
    /// The decoded JSON body of a failed response.
    Json(Value),
    /// The undecoded body of a response that was not valid JSON.
    Raw(String),
}

impl ErrorBody {
    /// Returns the decoded body, if the response was valid JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Returns the raw body, if the response was not valid JSON.
    #[must_use]
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Raw(raw) => Some(raw),
        }
    }
}

/// A response the client could not treat as a success.
///
/// All kinds share one payload shape: message, status and body. For
/// [`ErrorKind::JsonParse`] the status is always 200 and the body is the raw
/// response text, whatever status the server actually sent.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind} (status {status}): {message}")]
pub struct ApiError {
    /// The classification of the failure.
    pub kind: ErrorKind,
    /// Human-readable error text.
    pub message: String,
    /// The HTTP status code, or 200 for JSON parse failures.
    pub status: u16,
    /// The response body.
    pub body: ErrorBody,
}

impl ApiError {
    /// Builds the error for a non-accepted status and its decoded body.
    ///
    /// The message is taken from a string `message` field of the body when
    /// present, and falls back to the status reason phrase otherwise.
    #[must_use]
    pub fn from_status(status: u16, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| fallback_message(status), str::to_string);

        Self {
            kind: ErrorKind::from_status(status),
            message,
            status,
            body: ErrorBody::Json(body),
        }
    }

    /// Builds the error for a body that could not be decoded as JSON.
    #[must_use]
    pub fn json_parse(raw: String, snippet_chars: usize) -> Self {
        let snippet: String = raw.chars().take(snippet_chars).collect();

        Self {
            kind: ErrorKind::JsonParse,
            message: format!("Error while parsing json: {snippet}"),
            status: 200,
            body: ErrorBody::Raw(raw),
        }
    }
}

fn fallback_message(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), str::to_string)
}

/// Error type for all request operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// No HTTP response was obtained (connection, DNS, TLS setup or timeout).
    #[error("Transport error: {message}")]
    Transport {
        /// The low-level error text.
        message: String,
    },

    /// A response was received and classified as a failure.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl RestError {
    /// Returns the error kind, or `None` for transport failures.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Transport { .. } => None,
            Self::Api(e) => Some(e.kind),
        }
    }

    /// Returns the status code, or `None` for transport failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } => None,
            Self::Api(e) => Some(e.status),
        }
    }

    /// Returns the response body, or `None` for transport failures.
    #[must_use]
    pub const fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Transport { .. } => None,
            Self::Api(e) => Some(&e.body),
        }
    }

    /// Returns the error text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message } => message,
            Self::Api(e) => &e.message,
        }
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display already renders the cause chain.
        Self::Transport {
            message: err.to_string(),
        }
    }
}
