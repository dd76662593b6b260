use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum RemoteError {
    #[error("Failed to connect to board API server")]
    #[diagnostic(
        code(taskboard::remote::connection_failed),
        help(
            "Is the board server reachable? Set TASKBOARD_API_URL to point at it,\nor pass --offline to work against the local cache."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from board API server: {message}")]
    #[diagnostic(
        code(taskboard::remote::invalid_response),
        help(
            "The server returned data in an unexpected format. This might indicate a version mismatch."
        )
    )]
    InvalidResponse { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(taskboard::remote::api_error))]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            RemoteError::ConnectionFailed { source: e }
        } else {
            RemoteError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(e: serde_json::Error) -> Self {
        RemoteError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
