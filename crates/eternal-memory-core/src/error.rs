use std::time::Duration;
use thiserror::Error;

/// Failure of a single request against the memory API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
