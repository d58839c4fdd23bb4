//! Configuration types for the REST client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: everything a [`crate::RestClient`] needs to issue requests
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`TlsPolicy`]: certificate verification derived from the base URL and CA bundle
//! - [`ConnectionPolicy`]: whether one connection handle is reused across calls
//! - [`BaseUrl`], [`Credentials`], [`AdditionalHeaders`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use websupport_rest::{ClientConfig, ConnectionPolicy, Credentials};
//!
//! let config = ClientConfig::builder()
//!     .base_url("https://rest.example.com")
//!     .credentials(Credentials::new("api-key", "s3cr3t"))
//!     .persistent_connection(false)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.connection_policy(), ConnectionPolicy::PerRequest);
//! ```

mod newtypes;

pub use newtypes::{AdditionalHeaders, BaseUrl, Credentials};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// How the server certificate is checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TlsPolicy {
    /// Verify the peer certificate and host name.
    ///
    /// When `ca_file` is set, its PEM bundle replaces the built-in roots.
    Verify {
        /// Optional CA bundle used for verification.
        ca_file: Option<PathBuf>,
    },
    /// Accept any certificate. Used for base URLs that are not `https`.
    AcceptInvalidCerts,
}

/// Lifecycle of the underlying connection handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionPolicy {
    /// One handle, created on the first request and kept for the client's lifetime.
    Persistent,
    /// A fresh handle per request, released when the request finishes.
    PerRequest,
}

impl From<bool> for ConnectionPolicy {
    fn from(persistent: bool) -> Self {
        if persistent {
            Self::Persistent
        } else {
            Self::PerRequest
        }
    }
}

/// Configuration for a [`crate::RestClient`].
///
/// Values are fixed at construction and may be changed afterwards through
/// the setters; a request always observes one consistent configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: BaseUrl,
    credentials: Option<Credentials>,
    ca_file: Option<PathBuf>,
    connection_policy: ConnectionPolicy,
    additional_headers: AdditionalHeaders,
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Creates a configuration with default settings for `base_url`.
    #[must_use]
    pub fn new(base_url: BaseUrl, credentials: Option<Credentials>) -> Self {
        Self {
            base_url,
            credentials,
            ca_file: None,
            connection_policy: ConnectionPolicy::Persistent,
            additional_headers: AdditionalHeaders::default(),
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the Basic auth credentials, if both keys were supplied.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns the CA bundle path, if configured.
    #[must_use]
    pub fn ca_file(&self) -> Option<&Path> {
        self.ca_file.as_deref()
    }

    /// Returns the additional headers.
    #[must_use]
    pub const fn additional_headers(&self) -> &AdditionalHeaders {
        &self.additional_headers
    }

    /// Returns the connection reuse policy.
    #[must_use]
    pub const fn connection_policy(&self) -> ConnectionPolicy {
        self.connection_policy
    }

    /// Returns the TLS policy.
    ///
    /// Verification is on for `https` base URLs and whenever a CA bundle has
    /// been configured; otherwise certificates are not checked.
    #[must_use]
    pub fn tls_policy(&self) -> TlsPolicy {
        if self.base_url.is_https() || self.ca_file.is_some() {
            TlsPolicy::Verify {
                ca_file: self.ca_file.clone(),
            }
        } else {
            TlsPolicy::AcceptInvalidCerts
        }
    }

    /// Sets the CA bundle path. This also turns certificate verification on.
    pub fn set_ca_file(&mut self, path: impl Into<PathBuf>) {
        self.ca_file = Some(path.into());
    }

    /// Enables or disables connection reuse.
    pub fn set_persistent_connection(&mut self, persistent: bool) {
        self.connection_policy = persistent.into();
    }

    /// Replaces the additional header list.
    pub fn set_additional_headers(&mut self, headers: AdditionalHeaders) {
        self.additional_headers = headers;
    }
}

/// Builder for constructing [`ClientConfig`] instances.
///
/// `base_url` is required. Credentials are attached only when both the
/// public and the private key are set.
///
/// # Defaults
///
/// - `persistent_connection`: `true`
/// - `ca_file`: `None`
/// - `additional_headers`: empty
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    public_key: Option<String>,
    private_key: Option<String>,
    ca_file: Option<PathBuf>,
    persistent: Option<bool>,
    additional_headers: Option<AdditionalHeaders>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the public key (Basic auth username).
    #[must_use]
    pub fn public_key(mut self, key: impl Into<String>) -> Self {
        self.public_key = Some(key.into());
        self
    }

    /// Sets the private key (Basic auth password).
    #[must_use]
    pub fn private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// Sets both keys at once.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.public_key = Some(credentials.public_key().to_string());
        self.private_key = Some(credentials.private_key().to_string());
        self
    }

    /// Sets the CA bundle used to verify the server certificate.
    #[must_use]
    pub fn ca_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_file = Some(path.into());
        self
    }

    /// Sets whether one connection handle is reused across requests.
    #[must_use]
    pub const fn persistent_connection(mut self, persistent: bool) -> Self {
        self.persistent = Some(persistent);
        self
    }

    /// Sets the additional headers.
    #[must_use]
    pub fn additional_headers(mut self, headers: AdditionalHeaders) -> Self {
        self.additional_headers = Some(headers);
        self
    }

    /// Builds the [`ClientConfig`], validating the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// or the [`BaseUrl`] validation error if it is malformed.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;
        let base_url = BaseUrl::new(base_url)?;

        let credentials = match (self.public_key, self.private_key) {
            (Some(public_key), Some(private_key)) => Some(Credentials::new(public_key, private_key)),
            _ => None,
        };

        Ok(ClientConfig {
            base_url,
            credentials,
            ca_file: self.ca_file,
            connection_policy: self.persistent.unwrap_or(true).into(),
            additional_headers: self.additional_headers.unwrap_or_default(),
        })
    }
}
