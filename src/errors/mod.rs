//! Normalized error type surfaced by every public call.
//!
//! Whatever shape a transport failure has, callers get a [`PlayHtError`] with
//! a best-effort `status` (`-1` when unknown), the response `headers` (empty
//! when unknown) and a message.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use crate::core::tts::playht::transport::{FailureKind, TransportFailure};
use crate::core::tts::playht::{PlayHtApiError, REQUEST_ID_HEADER, extract_diagnostics};

/// Result type for Play.ht operations.
pub type PlayHtResult<T> = Result<T, PlayHtError>;

/// Coarse classification of a [`PlayHtError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayHtErrorKind {
    /// 401: bad API key or user ID
    Authentication,
    /// 402/403: plan or permission problem
    Forbidden,
    /// 404: unknown voice or resource
    NotFound,
    /// 429
    RateLimited,
    /// 5xx
    Server,
    /// Any other non-success status
    Api,
    /// No response at all (DNS, connect, timeout, broken body)
    Network,
    /// The caller cancelled the request
    Cancelled,
}

/// Error returned by the SDK regardless of the underlying failure's shape.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PlayHtError {
    kind: PlayHtErrorKind,
    status: i32,
    headers: HashMap<String, String>,
    message: String,
    api_error: Option<PlayHtApiError>,
}

impl PlayHtError {
    pub fn kind(&self) -> PlayHtErrorKind {
        self.kind
    }

    /// HTTP status, or `-1` when the request never got a response.
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Response headers, empty when unknown.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Parsed Play.ht error body, when the server sent one.
    pub fn api_error(&self) -> Option<&PlayHtApiError> {
        self.api_error.as_ref()
    }

    /// The `x-play-request-id` response header, useful for support tickets.
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get(REQUEST_ID_HEADER).map(String::as_str)
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == PlayHtErrorKind::Cancelled
    }
}

/// Converts a transport failure into the SDK's public error.
///
/// Status and headers are probed defensively; a JSON error body, when
/// present, contributes the server's own message.
pub fn convert_error(failure: TransportFailure) -> PlayHtError {
    let diagnostics = extract_diagnostics(Some(&failure));
    let status = diagnostics.status;
    let api_error = failure.data().and_then(|d| PlayHtApiError::parse(d));

    let kind = classify(failure.kind, status);
    let message = describe(status, api_error.as_ref(), &failure);

    if let Some(err) = &api_error {
        warn!(
            status = status,
            error_message = ?err.message,
            error_code = ?err.code,
            "Play.ht API error"
        );
    }

    PlayHtError {
        kind,
        status,
        headers: diagnostics.headers,
        message,
        api_error,
    }
}

impl From<TransportFailure> for PlayHtError {
    fn from(failure: TransportFailure) -> Self {
        convert_error(failure)
    }
}

fn classify(kind: FailureKind, status: i32) -> PlayHtErrorKind {
    if kind == FailureKind::Cancelled {
        return PlayHtErrorKind::Cancelled;
    }
    match status {
        401 => PlayHtErrorKind::Authentication,
        402 | 403 => PlayHtErrorKind::Forbidden,
        404 => PlayHtErrorKind::NotFound,
        429 => PlayHtErrorKind::RateLimited,
        500..=599 => PlayHtErrorKind::Server,
        s if s > 0 => PlayHtErrorKind::Api,
        _ => PlayHtErrorKind::Network,
    }
}

fn describe(status: i32, api_error: Option<&PlayHtApiError>, failure: &TransportFailure) -> String {
    match (status, api_error) {
        (401, Some(err)) => format!(
            "Play.ht authentication failed: {}. Verify your API key and user ID.",
            err
        ),
        (401, None) => "Play.ht authentication failed. Verify your API key (AUTHORIZATION header) and user ID (X-USER-ID header).".to_string(),

        (402, Some(err)) => format!("Play.ht payment required: {}", err),
        (402, None) => {
            "Play.ht payment required. Check your plan's remaining character quota.".to_string()
        }

        (403, Some(err)) => format!(
            "Play.ht access denied: {}. Check your subscription and voice permissions.",
            err
        ),
        (403, None) => {
            "Play.ht access denied. Check your subscription tier and voice permissions."
                .to_string()
        }

        (404, Some(err)) => format!("Play.ht resource not found: {}", err),
        (404, None) => "Play.ht voice not found. Verify the voice ID is correct.".to_string(),

        (429, Some(err)) => format!("Play.ht rate limit exceeded: {}", err),
        (429, None) => "Play.ht rate limit exceeded.".to_string(),

        (500..=599, Some(err)) => format!("Play.ht server error ({}): {}", status, err),
        (500..=599, None) => format!("Play.ht server error ({}).", status),

        (s, Some(err)) if s > 0 => format!("Play.ht API error ({}): {}", status, err),
        (s, None) if s > 0 => format!("Play.ht API request failed with status {}", status),

        _ => match &failure.message {
            Some(message) => format!("Play.ht request failed: {}", message),
            None => "Play.ht request failed".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tts::playht::transport::FailureResponse;
    use bytes::Bytes;

    fn status_failure(status: u16, body: Option<&'static str>) -> TransportFailure {
        let mut headers = HashMap::new();
        headers.insert("x-play-request-id".to_string(), "req-42".to_string());
        TransportFailure::status(status, headers, body.map(|s| Bytes::from_static(s.as_bytes())))
    }

    #[test]
    fn test_status_and_headers_are_carried() {
        let error = convert_error(status_failure(402, None));

        assert_eq!(error.status(), 402);
        assert_eq!(error.kind(), PlayHtErrorKind::Forbidden);
        assert_eq!(error.request_id(), Some("req-42"));
        assert!(error.message().contains("payment required"));
    }

    #[test]
    fn test_api_error_body_is_used_in_message() {
        let error = convert_error(status_failure(
            401,
            Some(r#"{"error_message": "Invalid API key", "error_code": "UNAUTHORIZED"}"#),
        ));

        assert_eq!(error.kind(), PlayHtErrorKind::Authentication);
        assert!(error.message().contains("Invalid API key"));
        assert_eq!(
            error.api_error().and_then(|e| e.code.as_deref()),
            Some("UNAUTHORIZED")
        );
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(convert_error(status_failure(404, None)).kind(), PlayHtErrorKind::NotFound);
        assert_eq!(
            convert_error(status_failure(429, None)).kind(),
            PlayHtErrorKind::RateLimited
        );
        assert_eq!(convert_error(status_failure(503, None)).kind(), PlayHtErrorKind::Server);
        assert_eq!(convert_error(status_failure(400, None)).kind(), PlayHtErrorKind::Api);
    }

    #[test]
    fn test_network_failure_defaults() {
        let error = convert_error(TransportFailure::new(
            FailureKind::Connect,
            "connection refused",
        ));

        assert_eq!(error.kind(), PlayHtErrorKind::Network);
        assert_eq!(error.status(), -1);
        assert!(error.headers().is_empty());
        assert_eq!(error.to_string(), "Play.ht request failed: connection refused");
    }

    #[test]
    fn test_empty_failure_defaults() {
        let error = convert_error(TransportFailure::default());

        assert_eq!(error.status(), -1);
        assert!(error.headers().is_empty());
        assert_eq!(error.message(), "Play.ht request failed");
    }

    #[test]
    fn test_text_response_has_no_status() {
        let failure = TransportFailure::new(FailureKind::Other, "bad gateway")
            .with_response(FailureResponse::Text("<html>".to_string()));
        let error = PlayHtError::from(failure);

        assert_eq!(error.status(), -1);
        assert_eq!(error.kind(), PlayHtErrorKind::Network);
    }

    #[test]
    fn test_cancelled() {
        let error = convert_error(TransportFailure::cancelled());

        assert!(error.is_cancelled());
        assert_eq!(error.status(), -1);
        assert!(error.message().contains("Request cancelled"));
    }
}
