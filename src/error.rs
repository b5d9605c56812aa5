use derive_builder::UninitializedFieldError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response at `{path}`: {source} (body: {body})")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("API returned an error: status {status}, body {body}")]
    Status {
        status: StatusCode,
        body: String,
    },

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl From<UninitializedFieldError> for ClientError {
    fn from(error: UninitializedFieldError) -> Self {
        ClientError::Config(error.to_string())
    }
}

impl ClientError {
    /// HTTP status of the response, when the server answered with a non-success code.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(error) => error.status(),
            _ => None,
        }
    }
}
