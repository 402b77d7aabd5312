//! Shared HTTP client construction.
//!
//! The default transport keeps connections to `api.play.ht` alive between
//! calls so back-to-back synthesis requests skip the TLS handshake.

use std::time::Duration;

/// How long an idle pooled connection is kept.
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Idle connections kept per host.
pub const POOL_MAX_IDLE_PER_HOST: usize = 16;

/// TCP keep-alive probe interval.
pub const TCP_KEEPALIVE: Duration = Duration::from_secs(60);

/// Builds a `reqwest::Client` tuned for connection reuse.
///
/// No request timeout is set: streamed audio can legitimately take a long
/// time to drain, and timeout policy belongs to the caller.
pub fn keep_alive_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
        .tcp_keepalive(TCP_KEEPALIVE)
        .tcp_nodelay(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_alive_client_builds() {
        assert!(keep_alive_client().is_ok());
    }
}
