//! Transport abstraction over the HTTP exchange.

mod http;

pub use http::ReqwestTransport;

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Content type of every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A fully read HTTP response.
///
/// By the time a transport hands this back the body has been consumed and the
/// connection released to the underlying HTTP stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

/// Sends one JSON request and returns the complete response.
///
/// A non-2xx HTTP status is a normal response, not an error; the service
/// reports application outcomes inside the JSON envelope. Errors are reserved
/// for exchanges that could not be completed.
///
/// Implement this trait to plug in a different HTTP stack or a test double.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` with `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`](crate::error::ClientError::Transport)
    /// if the request could not be sent or the body could not be read.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
        (**self).post_json(url, body).await
    }
}
