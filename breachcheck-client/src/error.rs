#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("received an invalid or empty password")]
    InvalidPassword,

    #[error("timed out while querying the range endpoint")]
    TimedOut,

    #[error("unexpected HTTP response from the range endpoint: {status}")]
    UnexpectedResponse { status: String },

    #[error("range request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
