use std::future::Future;

use crate::error::Error;

/// A raw range-API response: the transport round-trip succeeded, the status
/// has not been interpreted yet.
#[derive(Debug, Clone)]
pub struct RangeResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// The request-issuing capability the checker needs from its environment.
///
/// Production code uses [`HttpTransport`]; tests inject canned responses so
/// no network or runtime environment is assumed. A transport makes exactly
/// one attempt per call and carries no timeout policy of its own; the caller
/// cancels by dropping the returned future.
pub trait RangeTransport {
    fn fetch_range(
        &self,
        url: &str,
        user_agent: &str,
    ) -> impl Future<Output = Result<RangeResponse, Error>> + Send;
}

/// Transport backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl RangeTransport for HttpTransport {
    async fn fetch_range(&self, url: &str, user_agent: &str) -> Result<RangeResponse, Error> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        Ok(RangeResponse {
            status: status.as_u16(),
            status_text: status.to_string(),
            body,
        })
    }
}
