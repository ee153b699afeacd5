//! HTTP client for the fixed upstream.

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::config::UpstreamConfig;
use crate::upstream::UpstreamError;

/// Type alias for the pooled HTTP client.
pub type HttpClient = Client<HttpConnector, Body>;

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Issues requests to `base_url + path`.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    base_url: String,
    client: HttpClient,
    timeout: Option<Duration>,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            timeout: config.timeout(),
        }
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute upstream URI for an inbound request target.
    pub fn target_uri(&self, path_and_query: &str) -> Result<Uri, UpstreamError> {
        Ok(format!("{}{}", self.base_url, path_and_query).parse::<Uri>()?)
    }

    /// Perform one round trip.
    ///
    /// `headers` are sent exactly as given; `Host` is only filled in by the
    /// client when absent. Redirects are not followed, and any non-2xx
    /// response comes back as [`UpstreamError::Status`].
    pub async fn send(
        &self,
        method: Method,
        path_and_query: &str,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let uri = self.target_uri(path_and_query)?;
        tracing::debug!(method = %method, uri = %uri, "Forwarding to upstream");

        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body))?;
        *request.headers_mut() = headers;

        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange(request))
                .await
                .map_err(|_| UpstreamError::Timeout(limit))??,
            None => self.exchange(request).await?,
        };

        if !response.status.is_success() {
            return Err(UpstreamError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    async fn exchange(&self, request: Request<Body>) -> Result<UpstreamResponse, UpstreamError> {
        let response = self.client.request(request).await?;
        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(Body::new(body), usize::MAX)
            .await
            .map_err(UpstreamError::Body)?;

        Ok(UpstreamResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}
