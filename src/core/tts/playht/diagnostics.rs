//! Best-effort extraction of status, headers and message from a failure.

use std::collections::HashMap;

use super::transport::{FailureResponse, TransportFailure};
use super::{REQUEST_ID_HEADER, UNKNOWN_STATUS};

/// Diagnostic fields reported for a request, successful or not.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDiagnostics {
    pub error_message: Option<String>,
    pub headers: HashMap<String, String>,
    pub status: i32,
}

impl Default for ErrorDiagnostics {
    fn default() -> Self {
        Self {
            error_message: None,
            headers: HashMap::new(),
            status: UNKNOWN_STATUS,
        }
    }
}

impl ErrorDiagnostics {
    /// Diagnostics for a response that made it back.
    pub fn from_response(status: u16, headers: &HashMap<String, String>) -> Self {
        Self {
            error_message: None,
            headers: headers.clone(),
            status: i32::from(status),
        }
    }

    /// The `x-play-request-id` header, if the server sent one.
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get(REQUEST_ID_HEADER).map(String::as_str)
    }
}

/// Probes a failure for diagnostic fields without assuming its shape.
///
/// - `status` comes from a structured response, else `-1`.
/// - `headers` come from a structured response, else empty.
/// - `error_message` is only reported when the failure carries a message
///   *and* its response is a bare string.
///
/// Never panics, whatever the input.
pub fn extract_diagnostics(error: Option<&TransportFailure>) -> ErrorDiagnostics {
    let Some(error) = error else {
        return ErrorDiagnostics::default();
    };

    let (status, headers) = match &error.response {
        Some(FailureResponse::Object {
            status, headers, ..
        }) => (
            status.unwrap_or(UNKNOWN_STATUS),
            headers.clone().unwrap_or_default(),
        ),
        _ => (UNKNOWN_STATUS, HashMap::new()),
    };

    let error_message = match (&error.message, &error.response) {
        (Some(message), Some(FailureResponse::Text(_))) => Some(message.clone()),
        _ => None,
    };

    ErrorDiagnostics {
        error_message,
        headers,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tts::playht::transport::FailureKind;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_error_yields_defaults() {
        let diagnostics = extract_diagnostics(None);

        assert_eq!(diagnostics.status, -1);
        assert!(diagnostics.headers.is_empty());
        assert!(diagnostics.error_message.is_none());
    }

    #[test]
    fn test_empty_error_yields_defaults() {
        let diagnostics = extract_diagnostics(Some(&TransportFailure::default()));
        assert_eq!(diagnostics, ErrorDiagnostics::default());
    }

    #[test]
    fn test_structured_response_fields_are_extracted() {
        let failure = TransportFailure::status(
            402,
            headers(&[("x-play-request-id", "abc")]),
            None,
        );

        let diagnostics = extract_diagnostics(Some(&failure));

        assert_eq!(diagnostics.status, 402);
        assert_eq!(diagnostics.request_id(), Some("abc"));
        // The response is an object, so the message is not reported.
        assert!(diagnostics.error_message.is_none());
    }

    #[test]
    fn test_partial_response_object_defaults_missing_parts() {
        let only_headers = TransportFailure::default().with_response(FailureResponse::Object {
            status: None,
            headers: Some(headers(&[("a", "b")])),
            data: None,
        });
        let diagnostics = extract_diagnostics(Some(&only_headers));
        assert_eq!(diagnostics.status, -1);
        assert_eq!(diagnostics.headers["a"], "b");

        let only_status = TransportFailure::default().with_response(FailureResponse::Object {
            status: Some(503),
            headers: None,
            data: None,
        });
        let diagnostics = extract_diagnostics(Some(&only_status));
        assert_eq!(diagnostics.status, 503);
        assert!(diagnostics.headers.is_empty());
    }

    #[test]
    fn test_message_reported_only_with_text_response() {
        let with_text = TransportFailure::new(FailureKind::Other, "socket hang up")
            .with_response(FailureResponse::Text("upstream closed".to_string()));
        let diagnostics = extract_diagnostics(Some(&with_text));
        assert_eq!(diagnostics.error_message.as_deref(), Some("socket hang up"));
        assert_eq!(diagnostics.status, -1);
        assert!(diagnostics.headers.is_empty());

        let without_response = TransportFailure::new(FailureKind::Connect, "connection refused");
        assert!(
            extract_diagnostics(Some(&without_response))
                .error_message
                .is_none()
        );

        let text_without_message = TransportFailure::default()
            .with_response(FailureResponse::Text("body".to_string()));
        assert!(
            extract_diagnostics(Some(&text_without_message))
                .error_message
                .is_none()
        );
    }

    #[test]
    fn test_from_response() {
        let diagnostics =
            ErrorDiagnostics::from_response(200, &headers(&[("x-play-request-id", "ok-1")]));

        assert_eq!(diagnostics.status, 200);
        assert_eq!(diagnostics.request_id(), Some("ok-1"));
        assert!(diagnostics.error_message.is_none());
    }
}
