//! Play.ht API message types.
//!
//! This module defines the JSON bodies sent to the streaming endpoint and the
//! error body Play.ht returns on failure.

use serde::{Deserialize, Serialize};

use super::PlayHtModel;

// =============================================================================
// Request Payloads
// =============================================================================

/// Body of a streaming synthesis request.
///
/// Each engine family owns its field set, so turbo-only fields can never leak
/// into a standard request and vice versa. Serializes as the inner object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StreamPayload {
    /// Full parameter set used by every engine except `PlayDialog-turbo`
    Standard(StandardPayload),
    /// Reduced body used by `PlayDialog-turbo`
    DialogTurbo(DialogTurboPayload),
}

impl StreamPayload {
    /// Returns the text being synthesized.
    pub fn text(&self) -> &str {
        match self {
            Self::Standard(p) => &p.text,
            Self::DialogTurbo(p) => &p.text,
        }
    }

    /// Returns the engine the payload targets, if one was set.
    pub fn voice_engine(&self) -> Option<PlayHtModel> {
        match self {
            Self::Standard(p) => p.voice_engine,
            Self::DialogTurbo(p) => Some(p.voice_engine),
        }
    }

    /// Serializes the payload for log output. Never fails.
    pub fn to_log_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Standard streaming request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardPayload {
    /// Text to synthesize
    pub text: String,

    /// Voice engine; omitted when the caller did not pick one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_engine: Option<PlayHtModel>,

    /// Voice identifier (typically an S3 manifest URL)
    pub voice: String,

    /// Audio quality tier
    pub quality: String,

    /// Output audio format
    pub output_format: String,

    /// Playback speed
    pub speed: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_guidance: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_guidance: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_guidance: Option<f32>,
}

/// `PlayDialog-turbo` request body: `{text, voice_engine, voice, language}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogTurboPayload {
    /// Text to synthesize
    pub text: String,

    /// Always `PlayDialog-turbo`
    pub voice_engine: PlayHtModel,

    /// Turbo voice identifier (e.g. `Atlas-PlayAI`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Language of the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

// =============================================================================
// API Error Response
// =============================================================================

/// Play.ht API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayHtApiError {
    /// Error message
    #[serde(alias = "error_message")]
    pub message: Option<String>,

    /// Error code
    #[serde(alias = "error_code")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: Option<u16>,

    /// Additional error details
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl PlayHtApiError {
    /// Parses an error body. Returns `None` unless it carries a message or code.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .filter(|e| e.message.is_some() || e.code.is_some())
    }
}

impl std::fmt::Display for PlayHtApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(msg) = &self.message {
            write!(f, "{}", msg)
        } else if let Some(code) = &self.code {
            write!(f, "Error code: {}", code)
        } else {
            write!(f, "Unknown Play.ht API error")
        }
    }
}

impl std::error::Error for PlayHtApiError {}
