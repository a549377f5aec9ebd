//! DigitalOcean provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigitalOceanError {
    #[error("Environment variable not set: {0}")]
    MissingEnvVar(String),

    #[error("DigitalOcean API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A create response carried no action to follow
    #[error("No action reported for {0}")]
    MissingAction(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<DigitalOceanError> for snapshooter_cloud::CloudError {
    fn from(err: DigitalOceanError) -> Self {
        use snapshooter_cloud::CloudError;

        match err {
            DigitalOceanError::NotFound(what) => CloudError::ResourceNotFound(what),
            DigitalOceanError::ApiError { status: 401, message } => {
                CloudError::AuthenticationFailed(message)
            }
            DigitalOceanError::ApiError { status, message } => {
                CloudError::ApiError { status, message }
            }
            DigitalOceanError::MissingAction(what) => CloudError::MissingAction(what),
            DigitalOceanError::JsonError(e) => CloudError::Json(e),
            other => CloudError::RequestFailed(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DigitalOceanError>;
