//! Play.ht request option types.
//!
//! This module defines the voice engine discriminator, the output format, and
//! the per-call [`StreamOptions`] value used to build a streaming request.

use serde::{Deserialize, Serialize};

use super::{DEFAULT_QUALITY, DEFAULT_SAMPLE_RATE, DEFAULT_SPEED};

// =============================================================================
// Voice Engine / Model
// =============================================================================

/// Play.ht voice engine (model).
///
/// Maps to Play.ht's `voice_engine` parameter in the API request. The engine
/// also selects the request body shape: [`PlayHtModel::PlayDialogTurbo`] uses
/// a reduced payload, every other engine uses the full parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlayHtModel {
    /// Play 3.0 mini - fast, multilingual (default)
    #[default]
    #[serde(rename = "Play3.0-mini")]
    Play30Mini,
    /// PlayHT 2.0 Turbo - English only, low latency
    #[serde(rename = "PlayHT2.0-turbo")]
    PlayHt20Turbo,
    /// PlayHT 2.0
    #[serde(rename = "PlayHT2.0")]
    PlayHt20,
    /// PlayHT 1.0 - legacy engine
    #[serde(rename = "PlayHT1.0")]
    PlayHt10,
    /// PlayDialog - expressive, dialogue support
    #[serde(rename = "PlayDialog")]
    PlayDialog,
    /// PlayDialog Multilingual
    #[serde(rename = "PlayDialogMultilingual")]
    PlayDialogMultilingual,
    /// PlayDialog Arabic
    #[serde(rename = "PlayDialogArabic")]
    PlayDialogArabic,
    /// PlayDialog turbo - takes the reduced `{text, voice_engine, voice, language}` body
    #[serde(rename = "PlayDialog-turbo")]
    PlayDialogTurbo,
}

impl PlayHtModel {
    /// Returns the Play.ht API string for this model.
    ///
    /// # Example
    ///
    /// ```rust
    /// use playht_stream::core::tts::playht::PlayHtModel;
    ///
    /// assert_eq!(PlayHtModel::Play30Mini.as_str(), "Play3.0-mini");
    /// assert_eq!(PlayHtModel::PlayDialogTurbo.as_str(), "PlayDialog-turbo");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Play30Mini => "Play3.0-mini",
            Self::PlayHt20Turbo => "PlayHT2.0-turbo",
            Self::PlayHt20 => "PlayHT2.0",
            Self::PlayHt10 => "PlayHT1.0",
            Self::PlayDialog => "PlayDialog",
            Self::PlayDialogMultilingual => "PlayDialogMultilingual",
            Self::PlayDialogArabic => "PlayDialogArabic",
            Self::PlayDialogTurbo => "PlayDialog-turbo",
        }
    }

    /// Returns whether requests for this engine use the reduced turbo body.
    #[inline]
    pub const fn is_dialog_turbo(&self) -> bool {
        matches!(self, Self::PlayDialogTurbo)
    }

    /// Returns all available models.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Play30Mini,
            Self::PlayHt20Turbo,
            Self::PlayHt20,
            Self::PlayHt10,
            Self::PlayDialog,
            Self::PlayDialogMultilingual,
            Self::PlayDialogArabic,
            Self::PlayDialogTurbo,
        ]
    }

    /// Creates a model from its API string (case-insensitive) or a short alias.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "play3.0-mini" | "play3.0" | "mini" => Some(Self::Play30Mini),
            "playht2.0-turbo" | "turbo" => Some(Self::PlayHt20Turbo),
            "playht2.0" => Some(Self::PlayHt20),
            "playht1.0" => Some(Self::PlayHt10),
            "playdialog" | "dialog" => Some(Self::PlayDialog),
            "playdialogmultilingual" => Some(Self::PlayDialogMultilingual),
            "playdialogarabic" => Some(Self::PlayDialogArabic),
            "playdialog-turbo" | "dialog-turbo" => Some(Self::PlayDialogTurbo),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayHtModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Audio Format
// =============================================================================

/// Play.ht audio output format.
///
/// Maps to Play.ht's `output_format` parameter in the API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayHtAudioFormat {
    /// MP3 format (default)
    #[default]
    Mp3,
    /// WAV container
    Wav,
    /// G.711 mu-law
    Mulaw,
    /// FLAC lossless
    Flac,
    /// OGG container
    Ogg,
    /// Raw PCM data
    Raw,
}

impl PlayHtAudioFormat {
    /// Returns the Play.ht API format string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Mulaw => "mulaw",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Raw => "raw",
        }
    }

    /// Returns the value of the `Accept` header for this format.
    ///
    /// The streaming endpoint only distinguishes MP3 from everything else.
    ///
    /// ```rust
    /// use playht_stream::core::tts::playht::PlayHtAudioFormat;
    ///
    /// assert_eq!(PlayHtAudioFormat::Mp3.accept(), "audio/mpeg");
    /// assert_eq!(PlayHtAudioFormat::Wav.accept(), "audio/basic");
    /// ```
    #[inline]
    pub const fn accept(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            _ => "audio/basic",
        }
    }

    /// Parses a format string. Returns `None` for unknown formats.
    pub fn parse(format: &str) -> Option<Self> {
        match format.trim().to_lowercase().as_str() {
            "mp3" | "mpeg" => Some(Self::Mp3),
            "wav" | "wave" => Some(Self::Wav),
            "mulaw" | "ulaw" => Some(Self::Mulaw),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            "raw" | "pcm" => Some(Self::Raw),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayHtAudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Stream Options
// =============================================================================

/// Options for a single streaming synthesis call.
///
/// Every field is optional. Defaults are applied when the request body is
/// built, not here, so a value of `None` means "let the builder decide".
/// Zero speeds and sample rates and empty quality strings are treated the same
/// as unset values.
///
/// # Example
///
/// ```rust
/// use playht_stream::core::tts::playht::{PlayHtAudioFormat, PlayHtModel, StreamOptions};
///
/// let options = StreamOptions::default()
///     .with_voice_engine(PlayHtModel::Play30Mini)
///     .with_output_format(PlayHtAudioFormat::Wav)
///     .with_speed(1.2);
/// assert_eq!(options.resolved_speed(), 1.2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamOptions {
    /// Voice engine; also selects the request body shape
    pub voice_engine: Option<PlayHtModel>,

    /// Output audio format
    pub output_format: Option<PlayHtAudioFormat>,

    /// Audio quality tier (draft/low/medium/high/premium)
    pub quality: Option<String>,

    /// Playback speed multiplier
    pub speed: Option<f32>,

    /// Sample rate in Hz
    pub sample_rate: Option<u32>,

    /// Random seed for deterministic output
    pub seed: Option<i64>,

    /// Randomness control
    pub temperature: Option<f32>,

    /// Emotion tag (e.g. `female_happy`)
    pub emotion: Option<String>,

    /// Voice adherence control
    pub voice_guidance: Option<f32>,

    /// Text adherence control
    pub text_guidance: Option<f32>,

    /// Style adherence control
    pub style_guidance: Option<f32>,

    /// Language, only sent for `PlayDialog-turbo`
    pub language: Option<String>,

    /// Voice identifier, only used for `PlayDialog-turbo`
    pub voice_id: Option<String>,
}

impl StreamOptions {
    pub fn with_voice_engine(mut self, engine: PlayHtModel) -> Self {
        self.voice_engine = Some(engine);
        self
    }

    pub fn with_output_format(mut self, format: PlayHtAudioFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }

    pub fn with_voice_guidance(mut self, guidance: f32) -> Self {
        self.voice_guidance = Some(guidance);
        self
    }

    pub fn with_text_guidance(mut self, guidance: f32) -> Self {
        self.text_guidance = Some(guidance);
        self
    }

    pub fn with_style_guidance(mut self, guidance: f32) -> Self {
        self.style_guidance = Some(guidance);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    /// Returns whether the reduced `PlayDialog-turbo` body applies.
    #[inline]
    pub fn is_dialog_turbo(&self) -> bool {
        self.voice_engine.is_some_and(|e| e.is_dialog_turbo())
    }

    /// Output format with the MP3 default applied.
    #[inline]
    pub fn resolved_output_format(&self) -> PlayHtAudioFormat {
        self.output_format.unwrap_or_default()
    }

    /// Quality with the `medium` default applied.
    pub fn resolved_quality(&self) -> String {
        self.quality
            .as_deref()
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_QUALITY)
            .to_string()
    }

    /// Speed with the default applied. Zero and NaN count as unset.
    pub fn resolved_speed(&self) -> f32 {
        self.speed
            .filter(|s| *s != 0.0 && !s.is_nan())
            .unwrap_or(DEFAULT_SPEED)
    }

    /// Sample rate with the default applied. Zero counts as unset.
    pub fn resolved_sample_rate(&self) -> u32 {
        self.sample_rate
            .filter(|r| *r != 0)
            .unwrap_or(DEFAULT_SAMPLE_RATE)
    }
}
