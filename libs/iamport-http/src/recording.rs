use crate::error::HttpError;
use crate::transport::{Transport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, Response, StatusCode, Uri};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Envelope returned when no scripted response is queued.
const EMPTY_SUCCESS_ENVELOPE: &str = r#"{"code":0,"message":null,"response":null}"#;

/// Snapshot of one request that went through a [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Request body decoded as JSON, or `Null` for an empty body.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        if self.body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&self.body)
    }
}

/// In-memory [`Transport`] that performs no network I/O
///
/// Every request is recorded in send order. Responses are taken from a FIFO
/// queue filled with [`push_response`](Self::push_response) /
/// [`push_json`](Self::push_json) / [`push_error`](Self::push_error); when the
/// queue is empty the transport answers `200` with an empty success
/// envelope.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    responses: Mutex<VecDeque<Result<TransportResponse, HttpError>>>,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn push_response(&self, response: TransportResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queue a JSON response with the given status.
    pub fn push_json(&self, status: StatusCode, body: &serde_json::Value) {
        let mut response = Response::new(Bytes::from(body.to_string()));
        *response.status_mut() = status;
        self.push_response(response);
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: HttpError) {
        self.responses.lock().push_back(Err(error));
    }

    /// All requests sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests sent so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, HttpError> {
        let (parts, body) = request.into_parts();
        self.requests.lock().push(RecordedRequest {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        });

        let scripted = self.responses.lock().pop_front();
        scripted.unwrap_or_else(|| {
            Ok(Response::new(Bytes::from_static(
                EMPTY_SUCCESS_ENVELOPE.as_bytes(),
            )))
        })
    }
}
