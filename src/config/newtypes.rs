//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction so that a
//! [`crate::RestClient`] never sees a malformed base URL or header.

use crate::error::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use std::fmt;

/// The root endpoint every request path is resolved against.
///
/// The original string is kept verbatim; request paths are appended to it
/// without normalisation, so `https://api.example.com/v1` and
/// `https://api.example.com/v1/` resolve paths differently.
///
/// # Example
///
/// ```rust
/// use websupport_rest::BaseUrl;
///
/// let url = BaseUrl::new("https://rest.example.com").unwrap();
/// assert!(url.is_https());
/// assert_eq!(url.as_ref(), "https://rest.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if the URL is empty, or
    /// [`ConfigError::InvalidBaseUrl`] if it does not parse as an absolute URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        if url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if reqwest::Url::parse(&url).is_err() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }
        Ok(Self(url))
    }

    /// Returns `true` if the URL string starts with `https`.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.0.starts_with("https")
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A public/private key pair sent as HTTP Basic credentials.
///
/// The private key is masked in `Debug` output so credentials do not leak
/// into logs.
///
/// # Example
///
/// ```rust
/// use websupport_rest::Credentials;
///
/// let credentials = Credentials::new("api-key", "s3cr3t");
/// assert_eq!(credentials.public_key(), "api-key");
/// assert!(!format!("{credentials:?}").contains("s3cr3t"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    public_key: String,
    private_key: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Returns the public key (Basic auth username).
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Returns the private key (Basic auth password).
    #[must_use]
    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"*****")
            .finish()
    }
}

/// An ordered list of extra headers sent with every request.
///
/// Entries are appended after the fixed `Accept`, `Content-Type` and
/// `User-Agent` headers, so they never remove them.
///
/// # Example
///
/// ```rust
/// use websupport_rest::AdditionalHeaders;
///
/// let headers = AdditionalHeaders::new([("X-Request-Source", "billing")]).unwrap();
/// assert_eq!(headers.len(), 1);
///
/// let headers = AdditionalHeaders::from_lines(["Accept-Language: sk"]).unwrap();
/// assert_eq!(headers.iter().next().unwrap().0.as_str(), "accept-language");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdditionalHeaders(Vec<(HeaderName, HeaderValue)>);

impl AdditionalHeaders {
    /// Builds the list from name/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] for the first pair whose name
    /// or value is not a valid HTTP header.
    pub fn new<I, K, V>(headers: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        headers
            .into_iter()
            .map(|(name, value)| Self::parse_pair(name.as_ref(), value.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Builds the list from raw `Name: value` lines.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if a line has no `:` separator
    /// or its name or value is invalid.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| {
                let line = line.as_ref();
                let (name, value) = line.split_once(':').ok_or_else(|| ConfigError::InvalidHeader {
                    header: line.to_string(),
                })?;
                Self::parse_pair(name.trim(), value.trim())
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    fn parse_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
        let invalid = || ConfigError::InvalidHeader {
            header: format!("{name}: {value}"),
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        Ok((name, value))
    }

    /// Iterates the headers in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &(HeaderName, HeaderValue)> {
        self.0.iter()
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no headers are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
