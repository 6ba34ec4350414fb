//! Error types
//!
//! User-facing form errors and the transport errors they are built from.

use thiserror::Error;

/// Errors the form surfaces to the user.
///
/// The `Display` text of each variant is exactly what the screen shows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// At least one field is empty; nothing was sent
    #[error("Please fill in all fields.")]
    Validation,

    /// The request failed or its response could not be read
    #[error("Could not connect to the backend. Is it running?")]
    BackendUnavailable,
}

/// Errors from talking to the prediction backend
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Prediction backend unavailable: {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Body was not JSON, or lacked a numeric estimate
    #[error("Invalid response (status {status}): {message}")]
    InvalidResponse { status: u16, message: String },
}

impl From<PredictError> for FormError {
    fn from(_: PredictError) -> Self {
        FormError::BackendUnavailable
    }
}
