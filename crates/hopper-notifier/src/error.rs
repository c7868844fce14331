use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("invalid log endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("log api token is empty")]
    MissingToken,
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}
