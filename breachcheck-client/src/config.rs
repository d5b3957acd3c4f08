use std::time::Duration;

/// Default public range endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.pwnedpasswords.com/range/";

/// Default identifying header value sent with every range request.
pub const DEFAULT_USER_AGENT: &str = "breachcheck-rs";

/// Default round-trip budget for a single range query.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Checker configuration. Built once, immutable for the checker's lifetime.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the 5-character digest prefix is appended to.
    pub endpoint: String,

    /// How long a single range round-trip may take before it is abandoned.
    pub timeout: Duration,

    /// Value for the identifying `User-Agent` header.
    pub user_agent: String,

    /// Treat a timed-out query as "no breach found" instead of an error.
    /// Off by default: a timeout is a failure unless explicitly relaxed.
    pub resolve_on_timeout: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            resolve_on_timeout: false,
        }
    }
}
