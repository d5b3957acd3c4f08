use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::transport::RangeTransport;

/// The k-anonymity split point: 5 hex characters go over the wire, the
/// remaining 35 stay local.
pub const PREFIX_LEN: usize = 5;

/// Length of the digest suffix each well-formed response line starts with.
pub const SUFFIX_LEN: usize = 35;

/// One `SUFFIX:COUNT` record parsed from a range response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub suffix: String,
    pub count: u64,
}

/// Issues range queries and parses the line-oriented response format.
pub struct RangeQueryClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: RangeTransport> RangeQueryClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Fetches all candidate records sharing `prefix`.
    ///
    /// A single attempt, raced against the configured timeout. When the
    /// timer wins, the in-flight request future is dropped (best-effort
    /// cancellation); the query then fails with [`Error::TimedOut`] unless
    /// `resolve_on_timeout` is set, in which case it degrades to an empty
    /// candidate list. An empty list is also what a valid response with no
    /// records yields, so the two are indistinguishable downstream, which is
    /// exactly the opt-in contract.
    pub async fn query(&self, prefix: &str) -> Result<Vec<CandidateRecord>, Error> {
        let url = format!("{}{}", self.config.endpoint, prefix);
        debug!(%url, "querying range endpoint");

        let request = self.transport.fetch_range(&url, &self.config.user_agent);
        let response = match tokio::time::timeout(self.config.timeout, request).await {
            Ok(response) => response?,
            Err(_) if self.config.resolve_on_timeout => {
                debug!(%prefix, "range query timed out, resolving as no records");
                return Ok(Vec::new());
            }
            Err(_) => return Err(Error::TimedOut),
        };

        if response.status != 200 {
            return Err(Error::UnexpectedResponse { status: response.status_text });
        }

        Ok(parse_range_body(&response.body))
    }
}

/// Parses a newline-separated `SUFFIX:COUNT` range body.
///
/// The format is produced by an external system, so malformed lines are
/// skipped rather than escalated. A body with zero well-formed lines parses
/// to an empty list, which is a valid "prefix known, no records" response.
/// Suffixes are normalized to uppercase.
pub fn parse_range_body(body: &str) -> Vec<CandidateRecord> {
    let mut records = Vec::new();

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((suffix, count)) = line.split_once(':') else {
            warn!(line, "skipping range record without a separator");
            continue;
        };

        let suffix = suffix.trim();
        if suffix.len() != SUFFIX_LEN || !suffix.bytes().all(|b| b.is_ascii_hexdigit()) {
            warn!(line, "skipping range record with a malformed suffix");
            continue;
        }

        let Ok(count) = count.trim().parse::<u64>() else {
            warn!(line, "skipping range record with a malformed count");
            continue;
        };

        records.push(CandidateRecord { suffix: suffix.to_ascii_uppercase(), count });
    }

    records
}
