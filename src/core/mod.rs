pub mod tts;

// Re-export commonly used types for convenience
pub use tts::{
    AudioStream, PlayHtAudioFormat, PlayHtModel, PlayRequestConfig, StreamOptions,
    generate_stream,
};
