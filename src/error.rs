//! Configuration error types for the REST client.
//!
//! Everything that can go wrong before a request is sent is reported as a
//! [`ConfigError`]. Failures that happen while talking to the server live in
//! [`crate::clients::RestError`].
//!
//! # Example
//!
//! ```rust
//! use websupport_rest::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyBaseUrl)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a [`crate::RestClient`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL cannot be empty.
    #[error("Base URL cannot be empty. Please provide the API root, e.g. 'https://rest.example.com'.")]
    EmptyBaseUrl,

    /// Base URL is not an absolute URL.
    #[error("Invalid base URL '{url}'. Expected an absolute URL with scheme (e.g., 'https://rest.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// An additional header has an invalid name or value.
    #[error("Wrong headers format: '{header}' is not a valid HTTP header.")]
    InvalidHeader {
        /// The offending header, rendered as `name: value`.
        header: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
