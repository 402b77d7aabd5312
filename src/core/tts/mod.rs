//! Text-to-speech streaming.

pub mod playht;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::errors::PlayHtError;

/// Synthesized audio delivered chunk by chunk, in server order.
///
/// The stream is finite; a read failure is yielded as an `Err` item.
pub type AudioStream = BoxStream<'static, Result<Bytes, PlayHtError>>;

pub use playht::{
    PLAYHT_TTS_URL, PlayHtAudioFormat, PlayHtModel, PlayRequestConfig, StreamOptions,
    generate_stream,
};
