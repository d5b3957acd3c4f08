//! k-anonymity password breach checking against the Have I Been Pwned
//! range API.
//!
//! A password never leaves the process. It is hashed locally with the
//! provider-compatible legacy SHA-1 from [`breachcheck_sha1`], the first
//! five hex characters of the digest select a range of candidate suffixes
//! from the provider, and the remaining thirty-five are matched locally
//! against that candidate set. The prefix alone places the password in a
//! large equivalence class, which is the whole privacy argument.
//!
//! ```no_run
//! use breachcheck_client::{BreachChecker, CheckResult, ClientConfig};
//!
//! # async fn example() -> Result<(), breachcheck_client::Error> {
//! let checker = BreachChecker::new(ClientConfig::default());
//! match checker.check("hunter2").await? {
//!     CheckResult::Clean => println!("no known breach"),
//!     CheckResult::Breached { count } => println!("seen {count} times"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The network seam is the [`RangeTransport`] trait, so the checker runs
//! against canned responses in tests and against [`HttpTransport`] in
//! production. A single attempt with a timeout is the whole failure
//! contract; there are no retries anywhere.

pub mod checker;
pub mod config;
pub mod error;
pub mod range;
pub mod transport;

pub use checker::{BreachChecker, CheckResult};
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use error::Error;
pub use range::{CandidateRecord, PREFIX_LEN, RangeQueryClient, SUFFIX_LEN, parse_range_body};
pub use transport::{HttpTransport, RangeResponse, RangeTransport};
