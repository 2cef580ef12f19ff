use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Bad credentials or a rejected signup. Carries the server-supplied
    /// detail message; callers surface this to the user.
    #[error("{0}")]
    Authentication(String),

    /// The access token was rejected by the service. Handled by clearing
    /// the session locally; never shown as an error.
    #[error("session expired or invalid")]
    SessionInvalid,

    /// A required field was empty. Raised before any network call.
    #[error("{0} must not be empty")]
    Validation(&'static str),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
