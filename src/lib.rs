pub mod client;
pub mod config;
pub mod core;
pub mod errors;
pub mod utils;

// Re-export commonly used items for convenience
pub use client::PlayHtClient;
pub use config::{ConfigError, DebugSettings, SdkSettings};
pub use crate::core::*;
pub use errors::{PlayHtError, PlayHtErrorKind, PlayHtResult};
