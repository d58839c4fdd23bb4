//! Blocking HTTP transport.
//!
//! [`HttpClient`] owns the [`ClientConfig`] and the connection handle. It
//! performs exactly one round trip per call and returns the raw
//! [`HttpResponse`]; deciding what the response means is left to
//! [`crate::RestClient`].

use std::ops::Deref;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::Certificate;

use crate::clients::errors::RestError;
use crate::clients::http_request::{request_headers, HttpRequest, REQUEST_TIMEOUT};
use crate::clients::http_response::HttpResponse;
use crate::config::{AdditionalHeaders, ClientConfig, ConnectionPolicy, TlsPolicy};

/// A connection handle for one request.
///
/// `Shared` borrows the client's persistent handle; `Scoped` is built for
/// this request alone and released when it is dropped.
enum Connection<'a> {
    Shared(&'a Client),
    Scoped(Client),
}

impl Deref for Connection<'_> {
    type Target = Client;

    fn deref(&self) -> &Client {
        match self {
            Self::Shared(client) => client,
            Self::Scoped(client) => client,
        }
    }
}

/// Blocking HTTP client with a single optionally-reused connection handle.
///
/// # Thread Safety
///
/// Requests take `&mut self`. Sharing one instance between threads requires
/// external synchronisation, which is the caller's responsibility.
#[derive(Debug)]
pub struct HttpClient {
    config: ClientConfig,
    /// Populated only under [`ConnectionPolicy::Persistent`].
    connection: Option<Client>,
}

// Verify HttpClient can be moved to another thread at compile time
const _: fn() = || {
    const fn assert_send<T: Send>() {}
    assert_send::<HttpClient>();
};

impl HttpClient {
    /// Creates a client. No connection is opened until the first request.
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns `true` if a persistent connection handle is currently open.
    #[must_use]
    pub const fn has_open_connection(&self) -> bool {
        self.connection.is_some()
    }

    /// Sets the CA bundle and turns certificate verification on.
    ///
    /// An open persistent handle is discarded so the next request picks up
    /// the new trust roots.
    pub fn set_ca_file(&mut self, path: impl Into<PathBuf>) {
        self.config.set_ca_file(path);
        self.discard_connection();
    }

    /// Enables or disables connection reuse.
    pub fn set_persistent_connection(&mut self, persistent: bool) {
        let policy = ConnectionPolicy::from(persistent);
        if policy != self.config.connection_policy() {
            self.config.set_persistent_connection(persistent);
            self.discard_connection();
        }
    }

    /// Replaces the additional headers.
    pub fn set_additional_headers(&mut self, headers: AdditionalHeaders) {
        self.config.set_additional_headers(headers);
    }

    fn discard_connection(&mut self) {
        if self.connection.take().is_some() {
            tracing::debug!("Discarded persistent connection handle");
        }
    }

    /// Sends `request` and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Transport`] if no response could be obtained:
    /// the CA bundle could not be loaded, the connection or TLS handshake
    /// failed, or the request timed out before a status line arrived. A body
    /// that cannot be read or decompressed is returned as an empty body.
    pub fn request(&mut self, request: &HttpRequest) -> Result<HttpResponse, RestError> {
        let url = request.url(self.config.base_url());
        let headers = request_headers(self.config.additional_headers());
        let connection = acquire(&mut self.connection, &self.config)?;

        tracing::debug!(method = %request.http_method, url = %url, "Sending request");

        let mut builder = connection
            .request(request.http_method.as_reqwest(), &url)
            .headers(headers);
        if let Some(credentials) = self.config.credentials() {
            builder = builder.basic_auth(credentials.public_key(), Some(credentials.private_key()));
        }
        if let Some(body) = request.serialized_body() {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let code = response.status().as_u16();
        // A status line arrived, so an unreadable body is decoded as empty.
        let body = response.text().unwrap_or_else(|e| {
            tracing::debug!(status = code, url = %url, error = %e, "Failed to read response body");
            String::new()
        });

        tracing::debug!(status = code, url = %url, "Received response");

        Ok(HttpResponse::new(code, body))
    }
}

/// Returns the handle for one request according to the connection policy.
fn acquire<'a>(
    slot: &'a mut Option<Client>,
    config: &ClientConfig,
) -> Result<Connection<'a>, RestError> {
    match config.connection_policy() {
        ConnectionPolicy::Persistent => {
            let client = match slot.take() {
                Some(client) => client,
                None => {
                    let client = build_connection(&config.tls_policy())?;
                    tracing::debug!("Opened persistent connection handle");
                    client
                }
            };
            Ok(Connection::Shared(slot.insert(client)))
        }
        ConnectionPolicy::PerRequest => {
            *slot = None;
            Ok(Connection::Scoped(build_connection(&config.tls_policy())?))
        }
    }
}

fn build_connection(tls: &TlsPolicy) -> Result<Client, RestError> {
    let mut builder = Client::builder()
        .use_rustls_tls()
        .timeout(REQUEST_TIMEOUT)
        .gzip(true);

    match tls {
        TlsPolicy::Verify { ca_file: None } => {}
        TlsPolicy::Verify {
            ca_file: Some(path),
        } => {
            let certificate = load_ca_bundle(path)?;
            builder = builder
                .tls_built_in_root_certs(false)
                .add_root_certificate(certificate);
        }
        TlsPolicy::AcceptInvalidCerts => {
            builder = builder.danger_accept_invalid_certs(true);
        }
    }

    Ok(builder.build()?)
}

fn load_ca_bundle(path: &Path) -> Result<Certificate, RestError> {
    let pem = std::fs::read(path).map_err(|e| RestError::Transport {
        message: format!(
            "error setting certificate verify locations: CAfile: {}: {e}",
            path.display()
        ),
    })?;
    Ok(Certificate::from_pem(&pem)?)
}
