use async_trait::async_trait;
use bytes::Bytes;

use crate::error::HttpError;

/// Fully built outbound request: method, absolute URI, headers and body.
pub type TransportRequest = http::Request<Bytes>;

/// Buffered inbound response: status, headers and body.
pub type TransportResponse = http::Response<Bytes>;

/// Capability to send one HTTP request and receive its response.
///
/// Implementations must return `Ok` for every HTTP status the server sends
/// back (4xx/5xx included); `Err` is reserved for failures where no response
/// was received at all. Interpreting the body is the caller's job.
///
/// The client core only ever sees `Arc<dyn Transport>`, so any HTTP stack can
/// be plugged in, and tests can substitute a recording implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and buffer the full response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on connection, TLS, timeout or body-limit
    /// failures.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, HttpError>;
}
