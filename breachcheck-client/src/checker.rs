use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::range::{PREFIX_LEN, RangeQueryClient};
use crate::transport::{HttpTransport, RangeTransport};

/// Verdict of a single breach check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// The digest remainder matched no candidate record.
    Clean,
    /// The password appeared in known breaches `count` times in total.
    Breached { count: u64 },
}

/// Checks passwords against the range endpoint without revealing them.
///
/// Only the first [`PREFIX_LEN`] characters of the digest ever leave the
/// process; the remainder is matched locally against the returned candidate
/// set. The checker holds no mutable state, so concurrent checks on a single
/// instance are independent.
pub struct BreachChecker<T = HttpTransport> {
    range_client: RangeQueryClient<T>,
}

impl BreachChecker<HttpTransport> {
    /// Creates a checker backed by a real HTTP transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(HttpTransport::new(), config)
    }
}

impl Default for BreachChecker<HttpTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: RangeTransport> BreachChecker<T> {
    /// Creates a checker over an injected transport capability.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self { range_client: RangeQueryClient::new(transport, config) }
    }

    /// Returns the uppercase hex digest of `password`, with the same
    /// validation as [`check`](Self::check) but no network activity.
    pub fn hash_password(&self, password: &str) -> Result<String, Error> {
        if password.is_empty() {
            return Err(Error::InvalidPassword);
        }

        Ok(breachcheck_sha1::hex_digest(password))
    }

    /// Checks whether `password` appears in the breach corpus.
    ///
    /// Validation happens before any hashing or network work. Transport
    /// failures propagate unchanged; a timed-out query only turns into
    /// [`CheckResult::Clean`] when the configuration opts into that
    /// degradation.
    #[instrument(skip_all)]
    pub async fn check(&self, password: &str) -> Result<CheckResult, Error> {
        let digest = self.hash_password(password)?;
        let (prefix, remainder) = digest.split_at(PREFIX_LEN);

        let candidates = self.range_client.query(prefix).await?;
        debug!(candidates = candidates.len(), "matching digest remainder");

        // Suffixes are expected unique, but summing tolerates a provider
        // returning duplicate lines.
        let count: u64 = candidates
            .iter()
            .filter(|record| record.suffix == remainder)
            .map(|record| record.count)
            .sum();

        if count > 0 {
            return Ok(CheckResult::Breached { count });
        }

        Ok(CheckResult::Clean)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::transport::RangeResponse;

    // Range body for prefix 5BAA6, shaped like a live provider response.
    // "password" hashes to 5BAA6 + 1E4C9B93F3F0682250B6CF8331B7EE68FD8.
    const RANGE_BODY: &str = "1D2DA4053E34E76F6576ED1DA63134B5E2A:2\n\
        1D72CD07550416C216D8AD296BF5C0AE8E0:10\n\
        1E2AAA439972480CEC7F16C795BBB429372:1\n\
        1E3687A61BFCE35F69B7408158101C8E414:1\n\
        1E4C9B93F3F0682250B6CF8331B7EE68FD8:12345\n\
        1F2B668E8AABEF1C59E9EC6F82E3F3CD786:1\n\
        20597F5AC10A2F67701B4AD1D3A09F72250:3";

    /// Serves one canned response for every request, recording each call.
    struct CannedTransport {
        status: u16,
        status_text: &'static str,
        body: &'static str,
        calls: AtomicUsize,
        last_url: Mutex<Option<String>>,
    }

    impl CannedTransport {
        fn ok(body: &'static str) -> Self {
            Self::with_status(200, "200 OK", body)
        }

        fn with_status(status: u16, status_text: &'static str, body: &'static str) -> Self {
            Self {
                status,
                status_text,
                body,
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(None),
            }
        }
    }

    impl RangeTransport for &CannedTransport {
        async fn fetch_range(&self, url: &str, _user_agent: &str) -> Result<RangeResponse, Error> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            *self.last_url.lock().unwrap() = Some(url.to_string());

            Ok(RangeResponse {
                status: self.status,
                status_text: self.status_text.to_string(),
                body: self.body.to_string(),
            })
        }
    }

    /// Never resolves; forces the timeout arm of the race.
    struct StalledTransport;

    impl RangeTransport for StalledTransport {
        async fn fetch_range(&self, _url: &str, _user_agent: &str) -> Result<RangeResponse, Error> {
            std::future::pending().await
        }
    }

    /// Panics if the checker reaches the network at all.
    struct UnreachableTransport;

    impl RangeTransport for UnreachableTransport {
        async fn fetch_range(&self, _url: &str, _user_agent: &str) -> Result<RangeResponse, Error> {
            panic!("validation must reject the password before any network activity");
        }
    }

    #[test]
    fn test_hash_password() {
        let checker = BreachChecker::with_transport(UnreachableTransport, ClientConfig::default());

        assert_eq!(
            checker.hash_password("password").unwrap(),
            "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8"
        );
        assert!(matches!(checker.hash_password(""), Err(Error::InvalidPassword)));
    }

    #[tokio::test]
    async fn test_empty_password_rejected_before_any_network() {
        let checker = BreachChecker::with_transport(UnreachableTransport, ClientConfig::default());

        assert!(matches!(checker.check("").await, Err(Error::InvalidPassword)));
    }

    #[tokio::test]
    async fn test_breached_password_reports_count() {
        let transport = CannedTransport::ok(RANGE_BODY);
        let checker = BreachChecker::with_transport(&transport, ClientConfig::default());

        let result = checker.check("password").await.unwrap();

        assert_eq!(result, CheckResult::Breached { count: 12345 });
    }

    #[tokio::test]
    async fn test_clean_password_against_same_body() {
        let transport = CannedTransport::ok(RANGE_BODY);
        let checker = BreachChecker::with_transport(&transport, ClientConfig::default());

        let result = checker.check("blah blah blah").await.unwrap();

        assert_eq!(result, CheckResult::Clean);
    }

    #[tokio::test]
    async fn test_duplicate_suffix_lines_are_summed() {
        let body = "1E4C9B93F3F0682250B6CF8331B7EE68FD8:40\n\
            1E4C9B93F3F0682250B6CF8331B7EE68FD8:2";
        let transport = CannedTransport::ok(body);
        let checker = BreachChecker::with_transport(&transport, ClientConfig::default());

        let result = checker.check("password").await.unwrap();

        assert_eq!(result, CheckResult::Breached { count: 42 });
    }

    #[tokio::test]
    async fn test_only_prefix_leaves_the_process() {
        let transport = CannedTransport::ok(RANGE_BODY);
        let checker = BreachChecker::with_transport(&transport, ClientConfig::default());

        checker.check("password").await.unwrap();

        let url = transport.last_url.lock().unwrap().take().unwrap();
        assert_eq!(url, "https://api.pwnedpasswords.com/range/5BAA6");
        assert!(!url.contains("1E4C9B93F3F0682250B6CF8331B7EE68FD8"));
    }

    #[tokio::test]
    async fn test_zero_timeout_times_out() {
        let config = ClientConfig { timeout: Duration::ZERO, ..ClientConfig::default() };
        let checker = BreachChecker::with_transport(StalledTransport, config);

        assert!(matches!(checker.check("hunter2").await, Err(Error::TimedOut)));
    }

    #[tokio::test]
    async fn test_timeout_resolves_clean_when_opted_in() {
        let config = ClientConfig {
            timeout: Duration::ZERO,
            resolve_on_timeout: true,
            ..ClientConfig::default()
        };
        let checker = BreachChecker::with_transport(StalledTransport, config);

        assert_eq!(checker.check("hunter2").await.unwrap(), CheckResult::Clean);
    }

    #[tokio::test]
    async fn test_non_success_status_is_surfaced() {
        let transport = CannedTransport::with_status(503, "503 Service Unavailable", "");
        let checker = BreachChecker::with_transport(&transport, ClientConfig::default());

        match checker.check("hunter2").await {
            Err(Error::UnexpectedResponse { status }) => {
                assert_eq!(status, "503 Service Unavailable");
            }
            other => panic!("expected UnexpectedResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_range_body_is_clean() {
        let transport = CannedTransport::ok("");
        let checker = BreachChecker::with_transport(&transport, ClientConfig::default());

        assert_eq!(checker.check("hunter2").await.unwrap(), CheckResult::Clean);
    }

    #[tokio::test]
    async fn test_repeated_checks_are_idempotent() {
        let transport = CannedTransport::ok(RANGE_BODY);
        let checker = BreachChecker::with_transport(&transport, ClientConfig::default());

        let first = checker.check("password").await.unwrap();
        let second = checker.check("password").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.calls.load(Ordering::Relaxed), 2);
    }
}
