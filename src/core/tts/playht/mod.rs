//! Play.ht v2 streaming TTS client.
//!
//! This module issues single-shot streaming synthesis requests against the
//! Play.ht Text-to-Speech API and hands the audio body back to the caller as a
//! lazy byte stream.
//!
//! # Request flow
//!
//! 1. [`StreamOptions`] are turned into one of two [`StreamPayload`] shapes,
//!    keyed on the voice engine (`PlayDialog-turbo` gets its own reduced body).
//! 2. The transport is resolved from the settings ([`resolve_client`]): a
//!    caller-supplied [`HttpTransport`] or the shared keep-alive client.
//! 3. The POST is dispatched with the caller's cancellation token.
//! 4. Failures are probed with [`extract_diagnostics`], logged once, and
//!    converted into a [`PlayHtError`](crate::errors::PlayHtError).
//!
//! # Example
//!
//! ```rust,ignore
//! use playht_stream::core::tts::playht::{generate_stream, PlayHtAudioFormat, PlayRequestConfig, StreamOptions};
//! use playht_stream::config::SdkSettings;
//!
//! let settings = SdkSettings::new("your-api-key", "your-user-id");
//! let config = PlayRequestConfig::new(settings);
//! let options = StreamOptions::default().with_output_format(PlayHtAudioFormat::Wav);
//!
//! let mut audio = generate_stream("Hello, world!", "s3://voice/manifest.json", &options, &config).await?;
//! while let Some(chunk) = audio.next().await {
//!     sink.write_all(&chunk?)?;
//! }
//! ```
//!
//! # Authentication
//!
//! Play.ht uses dual-header authentication:
//! - `X-USER-ID`: Your Play.ht user ID
//! - `AUTHORIZATION`: Your Play.ht API key

pub mod config;
pub mod diagnostics;
pub mod messages;
pub mod provider;
pub mod transport;
pub mod voices;

pub use config::{PlayHtAudioFormat, PlayHtModel, StreamOptions};
pub use diagnostics::{ErrorDiagnostics, extract_diagnostics};
pub use messages::{DialogTurboPayload, PlayHtApiError, StandardPayload, StreamPayload};
pub use provider::{PlayRequestConfig, build_payload, generate_stream};
pub use transport::{
    FailureResponse, HttpTransport, ReqwestTransport, StreamRequest, StreamResponse,
    TransportFailure, default_transport, resolve_client,
};
pub use voices::map_play_dialog_turbo_voice;

// =============================================================================
// API Constants
// =============================================================================

/// Play.ht TTS HTTP streaming endpoint.
pub const PLAYHT_TTS_URL: &str = "https://api.play.ht/api/v2/tts/stream";

/// Response header carrying the Play.ht request identifier.
pub const REQUEST_ID_HEADER: &str = "x-play-request-id";

/// Backend label used in debug log lines.
pub const INFERENCE_BACKEND: &str = "v2-tts-stream";

// =============================================================================
// Defaults
// =============================================================================

/// Default output format.
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3";

/// Default quality tier.
pub const DEFAULT_QUALITY: &str = "medium";

/// Default speed multiplier.
pub const DEFAULT_SPEED: f32 = 1.0;

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 24000;

/// Sentinel status used when no HTTP status is known.
pub const UNKNOWN_STATUS: i32 = -1;
