//! HTTP client types for the REST API.
//!
//! # Overview
//!
//! - [`RestClient`]: `get`, `post`, `put` and `delete` returning decoded JSON
//! - [`HttpClient`]: the blocking transport that owns the connection handle
//! - [`HttpRequest`] and [`HttpMethod`]: request construction and the
//!   accepted-status table
//! - [`HttpResponse`]: raw status and body, decoded and classified per method
//! - [`RestError`], [`ApiError`], [`ErrorKind`], [`ErrorBody`]: the error taxonomy

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod rest_client;

pub use errors::{ApiError, ErrorBody, ErrorKind, RestError};
pub use http_client::HttpClient;
pub use http_request::{request_headers, HttpMethod, HttpRequest, REQUEST_TIMEOUT, USER_AGENT_VALUE};
pub use http_response::{HttpResponse, JSON_ERROR_SNIPPET_CHARS};
pub use rest_client::RestClient;
