pub mod debug_log;
pub use debug_log::debug_log;
pub mod http;
pub use http::keep_alive_client;
