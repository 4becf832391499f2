//! Error types for herald-github.

use herald_core::ValidationError;
use thiserror::Error;

/// All errors that can arise from GitHub API calls.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The resource `source` is incomplete or malformed.
    #[error("invalid source: {0}")]
    InvalidSource(#[from] ValidationError),

    /// The version's pull-request id is not a positive integer.
    #[error("invalid pull request number '{0}'")]
    InvalidPullRequest(String),

    /// The API answered with a non-2xx status.
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// Connection, TLS or timeout failure.
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// The response body was not the JSON we expected.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn from_ureq(method: &'static str, url: &str, err: ureq::Error) -> GithubError {
    match err {
        ureq::Error::Status(status, response) => GithubError::Status {
            method,
            url: url.to_owned(),
            status,
            body: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => GithubError::Transport {
            method,
            url: url.to_owned(),
            source: Box::new(transport),
        },
    }
}
