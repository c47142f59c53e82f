//! HTTP transport: one blocking GET, body returned as text.
//!
//! A request either completes within the configured deadline with a
//! `200 OK` and a non-empty body, or fails. There are no retries.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{debug, info};

/// The open-notify "ISS now" endpoint.
pub const DEFAULT_URL: &str = "http://api.open-notify.org/iss-now.json";

/// Deadline for a whole request: connect, send, and read the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest accepted request deadline, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while fetching a document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response body was empty")]
    EmptyBody,

    #[error("timeout of {0:?} exceeds the {max}s limit", max = MAX_TIMEOUT_SECS)]
    TimeoutTooLong(Duration),
}

pub type Result<T> = core::result::Result<T, FetchError>;

/// Blocking HTTP client for fetching raw JSON documents.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    ///
    /// Deadlines above [`MAX_TIMEOUT_SECS`] are refused.
    pub fn new(timeout: Duration) -> Result<Self> {
        if timeout > Duration::from_secs(MAX_TIMEOUT_SECS) {
            return Err(FetchError::TimeoutTooLong(timeout));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the response body.
    ///
    /// Anything other than `200 OK` is an error, as is a body that is
    /// empty or only whitespace.
    pub fn fetch(&self, url: &str) -> Result<String> {
        debug!(%url, "sending request");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        info!(%url, status = status.as_u16(), bytes = body.len(), "fetched document");
        Ok(body)
    }
}
