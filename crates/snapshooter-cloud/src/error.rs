//! Cloud provider error types

use crate::model::ActionStatus;
use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// A polled action settled in a non-successful state.
    #[error("{operation} failed: {status}")]
    ActionFailed {
        operation: String,
        status: ActionStatus,
    },

    /// The provider reported a create without an action to follow.
    #[error("No action reported for {0}")]
    MissingAction(String),

    #[error("No size with at least {min_disk} GB disk is available in region {region}")]
    NoSuitableSize { min_disk: u64, region: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Name of the operation whose action errored, if this is an action failure.
    pub fn failed_operation(&self) -> Option<&str> {
        match self {
            CloudError::ActionFailed { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
