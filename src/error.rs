use thiserror::Error;

#[derive(Debug, Error)]
pub enum PressgenError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Search timed out: {0}")]
    SearchTimeout(String),
    #[error("Publish error: {0}")]
    PublishError(String),
}

pub type Result<T> = std::result::Result<T, PressgenError>;
