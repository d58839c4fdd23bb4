//! REST client with `get`, `post`, `put` and `delete` methods.

use std::path::PathBuf;

use serde_json::Value;

use crate::clients::errors::RestError;
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::config::{AdditionalHeaders, BaseUrl, ClientConfig, ConnectionPolicy, Credentials, TlsPolicy};
use crate::error::ConfigError;

/// Blocking JSON REST client.
///
/// Each call performs one HTTP round trip, decodes the JSON response and
/// either returns it or converts it into a [`RestError`]. Nothing is retried.
///
/// # Accepted statuses
///
/// | Method | Returned as `Ok` |
/// |---|---|
/// | `get`, `delete` | 200 |
/// | `post`, `put` | 200, 201, 400, 422 |
///
/// For `post` and `put`, 400 and 422 carry validation errors in the
/// returned body; check it before assuming the write succeeded.
///
/// # Thread Safety
///
/// All requests take `&mut self`. Concurrent use of one client from several
/// threads needs external synchronisation.
///
/// # Example
///
/// ```rust,no_run
/// use websupport_rest::{Credentials, RestClient};
/// use serde_json::json;
///
/// let mut client = RestClient::new(
///     "https://rest.example.com",
///     Some(Credentials::new("api-key", "s3cr3t")),
/// )?;
///
/// let user = client.get("/v1/user/self", None)?;
/// let zone = client.post("/v1/user/self/zone", Some(json!({"name": "example.com"})))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
}

impl RestClient {
    /// Creates a client for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `base_url` is empty or not an absolute URL.
    pub fn new(base_url: impl Into<String>, credentials: Option<Credentials>) -> Result<Self, ConfigError> {
        let base_url = BaseUrl::new(base_url)?;
        Ok(Self::with_config(ClientConfig::new(base_url, credentials)))
    }

    /// Creates a client from a full configuration.
    #[must_use]
    pub const fn with_config(config: ClientConfig) -> Self {
        Self {
            http_client: HttpClient::new(config),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        self.http_client.config()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        self.config().base_url()
    }

    /// Returns `true` if one connection handle is reused across requests.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.config().connection_policy() == ConnectionPolicy::Persistent
    }

    /// Returns the TLS policy requests are sent with.
    #[must_use]
    pub fn tls_policy(&self) -> TlsPolicy {
        self.config().tls_policy()
    }

    /// Returns the additional headers.
    #[must_use]
    pub const fn additional_headers(&self) -> &AdditionalHeaders {
        self.config().additional_headers()
    }

    /// Sets the CA bundle used for verification and turns verification on.
    pub fn set_ca_file(&mut self, path: impl Into<PathBuf>) {
        self.http_client.set_ca_file(path);
    }

    /// Enables or disables connection reuse.
    pub fn set_persistent_connection(&mut self, persistent: bool) {
        self.http_client.set_persistent_connection(persistent);
    }

    /// Replaces the additional headers with `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if a name or value is not a
    /// valid HTTP header. The previous headers are kept in that case.
    pub fn set_additional_headers<I, K, V>(&mut self, headers: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let headers = AdditionalHeaders::new(headers)?;
        self.http_client.set_additional_headers(headers);
        Ok(())
    }

    /// Sends a GET request. `params`, when given, is sent as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] for transport failures, an unparsable body,
    /// or any status other than 200.
    pub fn get(&mut self, path: &str, params: Option<Value>) -> Result<Value, RestError> {
        self.request(HttpMethod::Get, path, params)
    }

    /// Sends a POST request with `params` as the JSON body. `None` is sent as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] for transport failures, an unparsable body,
    /// or any status other than 200, 201, 400 and 422.
    pub fn post(&mut self, path: &str, params: Option<Value>) -> Result<Value, RestError> {
        self.request(HttpMethod::Post, path, params)
    }

    /// Sends a PUT request with `params` as the JSON body. `None` is sent as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] for transport failures, an unparsable body,
    /// or any status other than 200, 201, 400 and 422.
    pub fn put(&mut self, path: &str, params: Option<Value>) -> Result<Value, RestError> {
        self.request(HttpMethod::Put, path, params)
    }

    /// Sends a DELETE request. `params`, when given, is sent as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError`] for transport failures, an unparsable body,
    /// or any status other than 200.
    pub fn delete(&mut self, path: &str, params: Option<Value>) -> Result<Value, RestError> {
        self.request(HttpMethod::Delete, path, params)
    }

    /// Sends a request with an explicit method.
    ///
    /// # Errors
    ///
    /// See [`RestClient::get`] and [`RestClient::post`] for the statuses
    /// treated as errors per method.
    pub fn request(
        &mut self,
        method: HttpMethod,
        path: &str,
        params: Option<Value>,
    ) -> Result<Value, RestError> {
        let request = HttpRequest::new(method, path).body(params);
        let response = self.http_client.request(&request)?;
        Ok(response.into_json(method)?)
    }
}
