use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// Keyword extraction and intent classification are total functions and never
/// produce an error; everything that can fail lives behind a collaborator
/// (store, generative provider, conversation log).
#[derive(Debug, Error, Clone)]
pub enum AppError {
    /// Represents a failure reported by the domain store collaborator.
    #[error("Store query error: {0}")]
    StoreQuery(String),

    /// The generative provider is not configured (no API key).
    #[error("Generative provider is not available")]
    GenerativeUnavailable,

    /// The generative provider was reached but the call failed
    /// (network error, non-success status, unparseable body).
    #[error("Generative provider error: {0}")]
    GenerativeProvider(String),

    /// Represents data validation errors (e.g., empty message).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::GenerativeProvider(format!("HTTP error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
