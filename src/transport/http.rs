//! HTTP transport backed by `reqwest`.

use super::{JSON_CONTENT_TYPE, Transport, TransportResponse};
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};

/// Default transport: one `reqwest` POST per call.
///
/// Connection reuse is whatever `reqwest::Client` pools on its own. No timeout
/// is set beyond the client's defaults; pass a configured client through
/// [`ReqwestTransport::with_client`] to add one.
///
/// # Examples
///
/// ```rust
/// use centralconfig_client::transport::ReqwestTransport;
/// use std::time::Duration;
///
/// let client = reqwest::Client::builder()
///     .timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
/// let transport = ReqwestTransport::with_client(client);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        let client = Client::builder().build().map_err(ClientError::transport)?;
        Ok(Self { client })
    }

    /// Use an existing `reqwest` client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .body(body)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let status = response.status().as_u16();

        // Reading to the end hands the connection back to the pool; the
        // response is dropped here on every path.
        let body = response.bytes().await.map_err(ClientError::transport)?;

        tracing::debug!(url, status, bytes = body.len(), "received response");

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
