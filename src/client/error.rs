use thiserror::Error;

/// Failures of a single API call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid URL '{url}'")]
    InvalidUrl { url: String },

    #[error("Request to '{url}' timed out")]
    Timeout { url: String },

    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("'{url}' returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    pub(crate) fn transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_decode() {
            ClientError::Decode {
                url: url.to_string(),
                source: err,
            }
        } else {
            ClientError::Connection {
                url: url.to_string(),
                source: err,
            }
        }
    }

    /// True when the server answered with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}
