//! HTTP transport seam and client resolution.
//!
//! [`HttpTransport`] is the only thing the request invoker talks to. The
//! default implementation wraps a keep-alive `reqwest::Client` shared by every
//! call in the process; callers can swap in their own transport through
//! [`AdvancedSettings::http_client`](crate::config::AdvancedSettings).

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures_util::StreamExt;
use http::HeaderMap;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};
use tracing::{debug, warn};

use crate::config::SdkSettings;
use crate::utils::http::keep_alive_client;

/// Body of a successful response, delivered chunk by chunk.
pub type ByteStream = BoxStream<'static, Result<Bytes, TransportFailure>>;

// =============================================================================
// Request / Response
// =============================================================================

/// A fully built streaming POST, ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct StreamRequest {
    /// Absolute endpoint URL
    pub url: String,

    /// Request headers
    pub headers: HeaderMap,

    /// Serialized JSON body
    pub body: Bytes,
}

/// Head of a successful response plus its streaming body.
pub struct StreamResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers, names lowercased
    pub headers: HashMap<String, String>,

    /// Audio body
    pub body: ByteStream,
}

impl std::fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Transport Failure
// =============================================================================

/// Broad category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureKind {
    /// DNS or TCP/TLS connection failure
    Connect,
    /// Transport-level timeout
    Timeout,
    /// The server answered with a non-success status
    Status,
    /// The caller's cancellation token fired
    Cancelled,
    /// Reading the response body failed
    Body,
    /// Anything else, including request construction failures
    #[default]
    Other,
}

/// The response half of a failure, in whichever shape the transport produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureResponse {
    /// A structured response; any part may be missing
    Object {
        status: Option<i32>,
        headers: Option<HashMap<String, String>>,
        data: Option<Bytes>,
    },
    /// A bare textual response
    Text(String),
}

/// A failed transport call.
///
/// Every field is optional: custom transports report whatever they know and
/// [`extract_diagnostics`](super::extract_diagnostics) fills the gaps.
#[derive(Debug, Clone, Default, thiserror::Error)]
#[error("{}", self.message.as_deref().unwrap_or("transport failure"))]
pub struct TransportFailure {
    pub kind: FailureKind,
    pub message: Option<String>,
    pub response: Option<FailureResponse>,
}

impl TransportFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            response: None,
        }
    }

    /// Failure produced when the caller cancels a pending request.
    pub fn cancelled() -> Self {
        Self::new(FailureKind::Cancelled, "Request cancelled")
    }

    /// Failure for a non-success HTTP status.
    pub fn status(status: u16, headers: HashMap<String, String>, data: Option<Bytes>) -> Self {
        Self {
            kind: FailureKind::Status,
            message: Some(format!("Request failed with status code {status}")),
            response: Some(FailureResponse::Object {
                status: Some(i32::from(status)),
                headers: Some(headers),
                data,
            }),
        }
    }

    pub fn with_response(mut self, response: FailureResponse) -> Self {
        self.response = Some(response);
        self
    }

    /// Maps a `reqwest` error, keeping its status when it has one.
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            FailureKind::Timeout
        } else if error.is_connect() {
            FailureKind::Connect
        } else if error.is_body() || error.is_decode() {
            FailureKind::Body
        } else if error.is_status() {
            FailureKind::Status
        } else {
            FailureKind::Other
        };

        Self {
            kind,
            message: Some(error.to_string()),
            response: error.status().map(|s| FailureResponse::Object {
                status: Some(i32::from(s.as_u16())),
                headers: None,
                data: None,
            }),
        }
    }

    /// Response body bytes, when the failure carried any.
    pub fn data(&self) -> Option<&Bytes> {
        match &self.response {
            Some(FailureResponse::Object { data, .. }) => data.as_ref(),
            _ => None,
        }
    }
}

// =============================================================================
// Transport Trait
// =============================================================================

/// Dispatches a streaming request.
///
/// Implementations must honor `cancel`: once it fires, a pending call should
/// resolve to [`TransportFailure::cancelled`], and a body already streaming
/// should end with that failure (see [`cancellable_body`]).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(
        &self,
        request: StreamRequest,
        cancel: CancellationToken,
    ) -> Result<StreamResponse, TransportFailure>;

    /// Short label used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// `reqwest`-backed transport with connection reuse.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport on a fresh keep-alive client.
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: keep_alive_client()?,
        })
    }

    /// Wraps an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: StreamRequest,
        cancel: CancellationToken,
    ) -> Result<StreamResponse, TransportFailure> {
        let pending = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .body(request.body)
            .send();

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TransportFailure::cancelled()),
            result = pending => result.map_err(TransportFailure::from_reqwest)?,
        };

        let status = response.status();
        let headers = header_map_to_hash(response.headers());

        if !status.is_success() {
            // Error bodies are small JSON documents; read them for the translator.
            let data = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                body = response.bytes() => body.ok(),
            };
            return Err(TransportFailure::status(status.as_u16(), headers, data));
        }

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportFailure::from_reqwest))
            .boxed();

        Ok(StreamResponse {
            status: status.as_u16(),
            headers,
            body: cancellable_body(body, cancel),
        })
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}

/// Ends `body` when `cancel` fires, yielding [`TransportFailure::cancelled`]
/// as the last item so a cut-off stream never looks complete.
pub fn cancellable_body(body: ByteStream, cancel: CancellationToken) -> ByteStream {
    type State = Option<(ByteStream, Pin<Box<WaitForCancellationFutureOwned>>)>;

    let initial: State = Some((body, Box::pin(cancel.cancelled_owned())));
    futures::stream::unfold(initial, |state| async move {
        let (mut body, mut cancelled) = state?;
        tokio::select! {
            biased;
            _ = &mut cancelled => Some((Err(TransportFailure::cancelled()), None)),
            chunk = body.next() => chunk.map(|item| (item, Some((body, cancelled)))),
        }
    })
    .boxed()
}

// =============================================================================
// Client Resolution
// =============================================================================

static DEFAULT_TRANSPORT: LazyLock<Arc<dyn HttpTransport>> = LazyLock::new(|| {
    let transport = ReqwestTransport::new().unwrap_or_else(|e| {
        warn!(error = %e, "Keep-alive client build failed, using reqwest defaults");
        ReqwestTransport::with_client(reqwest::Client::new())
    });
    Arc::new(transport)
});

/// Returns the process-wide default transport.
pub fn default_transport() -> Arc<dyn HttpTransport> {
    Arc::clone(&DEFAULT_TRANSPORT)
}

/// Picks the transport for a call: the caller's override, else the default.
pub fn resolve_client(settings: &SdkSettings) -> Arc<dyn HttpTransport> {
    match settings.advanced.http_client.as_ref() {
        Some(custom) => {
            debug!(transport = custom.name(), "Using caller-supplied transport");
            Arc::clone(custom)
        }
        None => default_transport(),
    }
}

/// Flattens response headers into a lowercase-keyed map.
pub fn header_map_to_hash(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdvancedSettings;
    use http::HeaderValue;

    struct NullTransport;

    #[async_trait]
    impl HttpTransport for NullTransport {
        async fn send(
            &self,
            _request: StreamRequest,
            _cancel: CancellationToken,
        ) -> Result<StreamResponse, TransportFailure> {
            Err(TransportFailure::default())
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn test_resolve_client_prefers_override() {
        let custom: Arc<dyn HttpTransport> = Arc::new(NullTransport);
        let settings = SdkSettings {
            advanced: AdvancedSettings {
                http_client: Some(Arc::clone(&custom)),
            },
            ..SdkSettings::new("key", "user")
        };

        let resolved = resolve_client(&settings);
        assert!(Arc::ptr_eq(&resolved, &custom));
        assert_eq!(resolved.name(), "null");
    }

    #[test]
    fn test_resolve_client_falls_back_to_shared_default() {
        let settings = SdkSettings::new("key", "user");

        let first = resolve_client(&settings);
        let second = resolve_client(&settings);

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &default_transport()));
        assert_eq!(first.name(), "reqwest");
    }

    #[test]
    fn test_status_failure_shape() {
        let mut headers = HashMap::new();
        headers.insert("x-play-request-id".to_string(), "abc".to_string());

        let failure = TransportFailure::status(402, headers, Some(Bytes::from_static(b"{}")));

        assert_eq!(failure.kind, FailureKind::Status);
        assert_eq!(failure.to_string(), "Request failed with status code 402");
        assert_eq!(failure.data().map(|d| d.as_ref()), Some(&b"{}"[..]));
        match failure.response {
            Some(FailureResponse::Object {
                status, headers, ..
            }) => {
                assert_eq!(status, Some(402));
                assert_eq!(headers.unwrap()["x-play-request-id"], "abc");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_default_failure_displays_placeholder() {
        assert_eq!(TransportFailure::default().to_string(), "transport failure");
        assert_eq!(TransportFailure::cancelled().kind, FailureKind::Cancelled);
    }

    #[test]
    fn test_header_map_to_hash_lowercases_and_keeps_values() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Play-Request-Id", HeaderValue::from_static("req-1"));
        headers.insert("content-type", HeaderValue::from_static("audio/mpeg"));

        let map = header_map_to_hash(&headers);

        assert_eq!(map["x-play-request-id"], "req-1");
        assert_eq!(map["content-type"], "audio/mpeg");
    }

    #[tokio::test]
    async fn test_cancellable_body_passes_chunks_through() {
        let body = futures::stream::iter(vec![
            Ok(Bytes::from_static(b"ab")),
            Ok(Bytes::from_static(b"cd")),
        ])
        .boxed();

        let chunks: Vec<_> = cancellable_body(body, CancellationToken::new())
            .map(|c| c.unwrap())
            .collect()
            .await;

        assert_eq!(chunks, vec![Bytes::from_static(b"ab"), Bytes::from_static(b"cd")]);
    }

    #[tokio::test]
    async fn test_cancellable_body_ends_with_cancelled_error() {
        let body = futures::stream::iter(vec![Ok(Bytes::from_static(b"ID3x"))])
            .chain(futures::stream::pending())
            .boxed();
        let cancel = CancellationToken::new();
        let mut audio = cancellable_body(body, cancel.clone());

        assert_eq!(audio.next().await.unwrap().unwrap().len(), 4);

        cancel.cancel();
        let failure = audio.next().await.unwrap().unwrap_err();
        assert_eq!(failure.kind, FailureKind::Cancelled);
        assert!(audio.next().await.is_none());
    }

    #[tokio::test]
    async fn test_reqwest_transport_honors_pre_cancelled_token() {
        let transport = ReqwestTransport::with_client(reqwest::Client::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let request = StreamRequest {
            url: "http://127.0.0.1:9/never".to_string(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        };

        let failure = transport.send(request, cancel).await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::Cancelled);
        assert_eq!(failure.message.as_deref(), Some("Request cancelled"));
    }
}
