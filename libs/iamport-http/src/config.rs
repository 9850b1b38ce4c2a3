use std::time::Duration;

/// Default User-Agent string for outbound gateway requests
pub const DEFAULT_USER_AGENT: &str = concat!("iamport-http/", env!("CARGO_PKG_VERSION"));

/// Transport security mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportSecurity {
    /// Only `https://` URLs are accepted (default)
    #[default]
    TlsOnly,
    /// Plain `http://` URLs are accepted as well
    ///
    /// Meant for sandboxes and local mock servers. Never point a production
    /// account at a plain-HTTP endpoint.
    AllowInsecureHttp,
}

/// Configuration for [`HyperTransport`](crate::HyperTransport)
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout (default: 30 seconds)
    pub request_timeout: Duration,

    /// Maximum buffered response body size in bytes (default: 2 MB)
    pub max_body_size: usize,

    /// User-Agent header value, applied when the request carries none
    pub user_agent: String,

    /// Transport security mode (default: `TlsOnly`)
    pub security: TransportSecurity,

    /// Idle timeout for pooled connections (default: 90 seconds)
    pub pool_idle_timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_body_size: 2 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            security: TransportSecurity::TlsOnly,
            pool_idle_timeout: Some(Duration::from_secs(90)),
        }
    }
}

impl TransportConfig {
    /// Configuration for tests against local mock servers
    ///
    /// Allows plain HTTP and uses a short timeout.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            security: TransportSecurity::AllowInsecureHttp,
            ..Self::default()
        }
    }
}
