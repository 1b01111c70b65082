//! HTTP client for fetching and decoding response bodies
//!
//! Provides a small HTTP client that handles:
//! - Base URL resolution and default headers
//! - `Accept` negotiation for XML or JSON
//! - Content format selection from the response `Content-Type`
//! - Status classification (`expect_success`)
//!
//! Each call makes exactly one request; retry policy is left to the caller.

use crate::decode::{DecodedRecord, StructuredDecoder};
use crate::error::{Error, Result};
use crate::pet::Pet;
use crate::shape::Shape;
use crate::types::ContentFormat;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative paths
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
    /// Fail on non-2xx statuses instead of returning the body
    pub expect_success: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("bodymap/{}", env!("CARGO_PKG_VERSION")),
            expect_success: true,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Return non-2xx bodies instead of failing
    pub fn expect_success(mut self, expect: bool) -> Self {
        self.config.expect_success = expect;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// A fully materialized response body
#[derive(Debug, Clone)]
pub struct FetchedBody {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` header, if any
    pub content_type: Option<String>,
    /// Raw body
    pub body: Bytes,
}

impl FetchedBody {
    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Pick the content format: `Content-Type` first, then `fallback`,
    /// then a look at the first byte of the body.
    pub fn format(&self, fallback: Option<ContentFormat>) -> Result<ContentFormat> {
        if let Some(format) = self
            .content_type
            .as_deref()
            .and_then(ContentFormat::from_content_type)
        {
            return Ok(format);
        }

        let content_type = self.content_type.clone().unwrap_or_default();
        if let Some(format) = fallback.or_else(|| ContentFormat::sniff(&self.body)) {
            warn!(
                "Content-Type '{}' is not XML or JSON, decoding as {}",
                content_type, format
            );
            return Ok(format);
        }

        Err(Error::UnknownContentType { content_type })
    }
}

/// HTTP client that fetches bodies and decodes them against a shape
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    decoder: StructuredDecoder,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            decoder: StructuredDecoder::new(),
        })
    }

    /// GET a body without an `Accept` preference
    pub async fn get(&self, path: &str) -> Result<FetchedBody> {
        self.fetch(path, None).await
    }

    /// GET a body, asking for `accept` when given
    pub async fn fetch(&self, path: &str, accept: Option<ContentFormat>) -> Result<FetchedBody> {
        let url = self.build_url(path)?;

        let mut req = self.client.get(url.clone());
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let Some(format) = accept {
            req = req.header(ACCEPT, format.mime_type());
        }

        let response = req.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        debug!(
            "GET {} -> {} ({} bytes, content-type {:?})",
            url,
            status.as_u16(),
            body.len(),
            content_type
        );

        if !status.is_success() && self.config.expect_success {
            return Err(Error::http_status(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        Ok(FetchedBody {
            status: status.as_u16(),
            content_type,
            body,
        })
    }

    /// GET a body and decode it against `shape`
    pub async fn get_decoded(
        &self,
        path: &str,
        shape: &Shape,
        accept: Option<ContentFormat>,
    ) -> Result<DecodedRecord> {
        let fetched = self.fetch(path, accept).await?;
        let format = fetched.format(accept)?;
        self.decoder.decode(&fetched.body, format, shape)
    }

    /// GET a body and decode it as a [`Pet`]
    pub async fn get_pet(&self, path: &str, accept: Option<ContentFormat>) -> Result<Pet> {
        let record = self.get_decoded(path, &Pet::shape(), accept).await?;
        Pet::try_from(record)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                Ok(Url::parse(&format!("{base}/{path}"))?)
            }
            None => Err(Error::config(format!(
                "Relative path '{path}' requires a base URL"
            ))),
        }
    }

    fn classify(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(e)
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
