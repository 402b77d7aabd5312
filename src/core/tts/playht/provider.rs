//! Play.ht streaming request builder and invoker.
//!
//! [`generate_stream`] turns text, a voice and [`StreamOptions`] into a POST
//! against `https://api.play.ht/api/v2/tts/stream` and returns the audio body as
//! an [`AudioStream`].
//!
//! # Request Format
//!
//! | Header | Value |
//! |--------|-------|
//! | accept | `audio/mpeg` for mp3, `audio/basic` otherwise |
//! | content-type | `application/json` |
//! | AUTHORIZATION | API key |
//! | X-USER-ID | user ID |
//!
//! **Body** (standard engines):
//! ```json
//! {
//!   "text": "Hello, world!",
//!   "voice": "s3://voice-cloning-zero-shot/.../manifest.json",
//!   "quality": "medium",
//!   "output_format": "mp3",
//!   "speed": 1.0,
//!   "sample_rate": 24000
//! }
//! ```
//!
//! **Body** (`PlayDialog-turbo`):
//! ```json
//! { "text": "Hello", "voice_engine": "PlayDialog-turbo", "voice": "Atlas-PlayAI", "language": "english" }
//! ```

use bytes::Bytes;
use futures_util::StreamExt;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::config::{PlayHtModel, StreamOptions};
use super::diagnostics::{ErrorDiagnostics, extract_diagnostics};
use super::messages::{DialogTurboPayload, StandardPayload, StreamPayload};
use super::transport::{FailureKind, StreamRequest, TransportFailure, resolve_client};
use super::voices::map_play_dialog_turbo_voice;
use super::{INFERENCE_BACKEND, PLAYHT_TTS_URL, REQUEST_ID_HEADER};
use crate::config::SdkSettings;
use crate::core::tts::AudioStream;
use crate::errors::{PlayHtResult, convert_error};
use crate::utils::debug_log;

/// Carries the API key.
const AUTHORIZATION: HeaderName = HeaderName::from_static("authorization");
/// Carries the user ID.
const X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");

/// Per-call request configuration.
#[derive(Debug, Clone, Default)]
pub struct PlayRequestConfig {
    /// Credentials, debug logging and transport override
    pub settings: SdkSettings,

    /// Fires to abort the request
    pub cancel: CancellationToken,
}

impl PlayRequestConfig {
    pub fn new(settings: SdkSettings) -> Self {
        Self {
            settings,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Builds the JSON body for `text` spoken by `voice`.
///
/// `PlayDialog-turbo` gets the reduced body with its voice taken from
/// `options.voice_id` through the turbo voice mapping; `voice` is not used
/// there. Every other engine gets the full parameter set with defaults applied.
pub fn build_payload(text: &str, voice: &str, options: &StreamOptions) -> StreamPayload {
    if options.is_dialog_turbo() {
        StreamPayload::DialogTurbo(DialogTurboPayload {
            text: text.to_string(),
            voice_engine: PlayHtModel::PlayDialogTurbo,
            voice: map_play_dialog_turbo_voice(options.voice_id.as_deref()),
            language: options.language.clone(),
        })
    } else {
        StreamPayload::Standard(StandardPayload {
            text: text.to_string(),
            voice_engine: options.voice_engine,
            voice: voice.to_string(),
            quality: options.resolved_quality(),
            output_format: options.resolved_output_format().as_str().to_string(),
            speed: options.resolved_speed(),
            sample_rate: options.resolved_sample_rate(),
            seed: options.seed,
            temperature: options.temperature,
            emotion: options.emotion.clone(),
            voice_guidance: options.voice_guidance,
            text_guidance: options.text_guidance,
            style_guidance: options.style_guidance,
        })
    }
}

/// Assembles headers and body for the streaming endpoint.
///
/// Credentials that are not valid header values fail here, before any
/// network I/O.
fn build_request(
    payload: &StreamPayload,
    options: &StreamOptions,
    settings: &SdkSettings,
) -> Result<StreamRequest, TransportFailure> {
    let body = serde_json::to_vec(payload)
        .map_err(|e| TransportFailure::new(FailureKind::Other, format!("Invalid payload: {e}")))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(options.resolved_output_format().accept()),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(AUTHORIZATION, header_value(&AUTHORIZATION, &settings.api_key)?);
    headers.insert(X_USER_ID, header_value(&X_USER_ID, &settings.user_id)?);

    Ok(StreamRequest {
        url: PLAYHT_TTS_URL.to_string(),
        headers,
        body: Bytes::from(body),
    })
}

fn header_value(name: &HeaderName, value: &str) -> Result<HeaderValue, TransportFailure> {
    HeaderValue::from_str(value).map_err(|_| {
        TransportFailure::new(
            FailureKind::Other,
            format!("{name} contains characters not allowed in an HTTP header"),
        )
    })
}

/// Formats the per-request debug line.
pub fn format_debug_line(payload: &StreamPayload, diagnostics: &ErrorDiagnostics) -> String {
    let mut line = format!(
        "Request - Inference Backend: {} - Params: {} - Request-ID: {} - Status: {}",
        INFERENCE_BACKEND,
        payload.to_log_string(),
        diagnostics.request_id().unwrap_or("undefined"),
        diagnostics.status,
    );
    if let Some(message) = &diagnostics.error_message {
        line.push_str(" - Error: ");
        line.push_str(message);
    }
    line
}

/// Streams synthesized speech for `text` in `voice`.
///
/// Resolves the transport from `config.settings`, sends one POST and hands
/// back the response body. A failed call is logged once through the debug
/// logger and returned as a [`PlayHtError`](crate::errors::PlayHtError);
/// nothing is retried. Errors while reading the body surface as items of the
/// returned stream. `options` is never modified.
pub async fn generate_stream(
    text: &str,
    voice: &str,
    options: &StreamOptions,
    config: &PlayRequestConfig,
) -> PlayHtResult<AudioStream> {
    let settings = &config.settings;
    let payload = build_payload(text, voice, options);
    let transport = resolve_client(settings);

    debug!(
        text_chars = payload.text().chars().count(),
        voice_engine = ?payload.voice_engine(),
        output_format = %options.resolved_output_format(),
        transport = transport.name(),
        "Sending Play.ht stream request"
    );

    let result = match build_request(&payload, options, settings) {
        Ok(request) => transport.send(request, config.cancel.clone()).await,
        Err(failure) => Err(failure),
    };

    match result {
        Ok(response) => {
            let diagnostics = ErrorDiagnostics::from_response(response.status, &response.headers);
            debug_log(settings, &format_debug_line(&payload, &diagnostics));

            let request_id = response.headers.get(REQUEST_ID_HEADER).cloned();
            let audio = response
                .body
                .map(move |chunk| {
                    chunk.map_err(|failure| {
                        warn!(
                            request_id = ?request_id,
                            error = %failure,
                            "Play.ht audio stream interrupted"
                        );
                        convert_error(failure)
                    })
                })
                .boxed();
            Ok(audio)
        }
        Err(failure) => {
            let diagnostics = extract_diagnostics(Some(&failure));
            debug_log(settings, &format_debug_line(&payload, &diagnostics));
            Err(convert_error(failure))
        }
    }
}
