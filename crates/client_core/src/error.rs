use shared::error::ContractViolation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("analysis service unreachable: {0}")]
    Transport(String),
    #[error("analysis service responded with status {status}: {message}")]
    Service { status: u16, message: String },
    #[error("analysis service broke its response contract: {0}")]
    Contract(#[from] ContractViolation),
}

impl FetchError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Transport("request timed out".to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceSetupError {
    #[error("invalid analysis service url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("analysis service url must use http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
