//! Convenience client that owns its settings.

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::SdkSettings;
use crate::core::tts::AudioStream;
use crate::core::tts::playht::{PlayRequestConfig, StreamOptions, generate_stream};
use crate::errors::PlayHtResult;

/// Play.ht client bound to one set of [`SdkSettings`].
///
/// Cloning is cheap enough to hand a client to each task; the underlying
/// transport is shared.
#[derive(Debug, Clone)]
pub struct PlayHtClient {
    settings: SdkSettings,
}

impl PlayHtClient {
    pub fn new(settings: SdkSettings) -> Self {
        info!(
            default_voice_engine = ?settings.default_voice_engine,
            debug = settings.debug.enabled,
            custom_transport = settings.advanced.http_client.is_some(),
            "Play.ht client created"
        );
        Self { settings }
    }

    pub fn settings(&self) -> &SdkSettings {
        &self.settings
    }

    /// Streams `text` spoken by `voice`.
    pub async fn stream(
        &self,
        text: &str,
        voice: &str,
        options: &StreamOptions,
    ) -> PlayHtResult<AudioStream> {
        self.stream_with_cancel(text, voice, options, CancellationToken::new())
            .await
    }

    /// Like [`stream`](Self::stream), aborting when `cancel` fires.
    pub async fn stream_with_cancel(
        &self,
        text: &str,
        voice: &str,
        options: &StreamOptions,
        cancel: CancellationToken,
    ) -> PlayHtResult<AudioStream> {
        let config = PlayRequestConfig::new(self.settings.clone()).with_cancel(cancel);

        match (options.voice_engine, self.settings.default_voice_engine) {
            (None, Some(engine)) => {
                let options = options.clone().with_voice_engine(engine);
                generate_stream(text, voice, &options, &config).await
            }
            _ => generate_stream(text, voice, options, &config).await,
        }
    }
}
