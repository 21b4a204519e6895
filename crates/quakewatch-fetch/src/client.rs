//! HTTP client for fetching feed documents.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use quakewatch_types::{NetworkError, NetworkErrorKind};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Performs one bounded GET and returns the raw response body.
///
/// Implementations never retry; retry policy belongs to the caller.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    /// Fetches `url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns a classified [`NetworkError`] on any transport problem or
    /// non-2xx status.
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Bytes, NetworkError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Bytes, NetworkError> {
        (**self).fetch(url, timeout).await
    }
}

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Default request timeout, used when building the client.
    pub timeout: Duration,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// Largest response body accepted, in bytes.
    pub max_body_bytes: usize,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(10),
            max_body_bytes: 4 * 1024 * 1024,
            user_agent: format!("quakewatch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// reqwest-backed [`Fetcher`].
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    config: ClientConfig,
}

impl FetchClient {
    /// Creates a new fetch client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn too_large(&self) -> NetworkError {
        NetworkError::new(
            NetworkErrorKind::Io,
            format!("response body exceeds {} bytes", self.config.max_body_bytes),
        )
    }
}

#[async_trait]
impl Fetcher for FetchClient {
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Bytes, NetworkError> {
        debug!(%url, ?timeout, "sending request");

        let mut response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::new(
                NetworkErrorKind::NonSuccessStatus(status.as_u16()),
                format!("{url} answered {status}"),
            ));
        }

        let max = self.config.max_body_bytes;
        if response
            .content_length()
            .is_some_and(|len| len > max as u64)
        {
            return Err(self.too_large());
        }

        // Dropping `response` on any early return releases the connection.
        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(classify)? {
            if body.len() + chunk.len() > max {
                return Err(self.too_large());
            }
            body.extend_from_slice(&chunk);
        }

        debug!(%url, %status, bytes = body.len(), "response received");
        Ok(body.freeze())
    }
}

/// Maps a reqwest error onto the transport taxonomy.
fn classify(error: reqwest::Error) -> NetworkError {
    let kind = if error.is_timeout() {
        NetworkErrorKind::Timeout
    } else if error.is_connect() {
        NetworkErrorKind::ConnectionRefused
    } else if let Some(status) = error.status() {
        NetworkErrorKind::NonSuccessStatus(status.as_u16())
    } else {
        NetworkErrorKind::Io
    };
    NetworkError::new(kind, error.to_string())
}
