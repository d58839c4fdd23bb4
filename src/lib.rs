//! # websupport-rest
//!
//! A small blocking REST client: it sends GET, POST, PUT and DELETE requests
//! to a configured base URL with JSON headers and optional HTTP Basic
//! credentials, decodes JSON responses and maps failed responses to typed
//! errors.
//!
//! ## Overview
//!
//! - [`RestClient`]: the client, configured through [`ClientConfig`] or
//!   [`RestClient::new`] and the setters
//! - [`RestError`]: every failing call returns exactly one error; transport
//!   failures have no status, everything else carries an [`ApiError`]
//! - [`ConfigError`]: invalid base URLs or headers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use websupport_rest::{Credentials, ErrorKind, RestClient, RestError};
//! use serde_json::json;
//!
//! let mut client = RestClient::new(
//!     "https://rest.example.com",
//!     Some(Credentials::new("api-key", "s3cr3t")),
//! )?;
//! client.set_additional_headers([("Accept-Language", "en")])?;
//!
//! match client.get("/v1/user/self", None) {
//!     Ok(user) => println!("logged in as {}", user["login"]),
//!     Err(RestError::Api(e)) if e.kind == ErrorKind::Authentication => {
//!         eprintln!("bad credentials: {}", e.message);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//!
//! // 400 and 422 come back as values for writes.
//! let result = client.post("/v1/user/self/zone", Some(json!({"name": "example.com"})))?;
//! if result["status"] == "error" {
//!     eprintln!("validation failed: {}", result["errors"]);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Connection reuse
//!
//! By default one connection handle is opened on the first request and
//! reused for the client's lifetime. With
//! [`RestClient::set_persistent_connection`]`(false)` every request opens
//! and releases its own handle.
//!
//! ## TLS
//!
//! Certificates are verified for `https` base URLs, against the bundle set
//! with [`RestClient::set_ca_file`] when one is configured. For other base
//! URLs certificate verification is disabled.
//!
//! ## Logging
//!
//! Requests and responses are reported as `tracing` debug events. The crate
//! installs no subscriber.

pub mod clients;
pub mod config;
pub mod error;

pub use clients::{
    ApiError, ErrorBody, ErrorKind, HttpClient, HttpMethod, HttpRequest, HttpResponse, RestClient,
    RestError,
};
pub use config::{
    AdditionalHeaders, BaseUrl, ClientConfig, ClientConfigBuilder, ConnectionPolicy, Credentials,
    TlsPolicy,
};
pub use error::ConfigError;
