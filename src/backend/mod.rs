//! Prediction Backend
//!
//! The outbound side of the form: a [`Predictor`] turns a completed form
//! into a wait-time estimate. [`PredictionClient`] is the HTTP
//! implementation; tests substitute their own.

mod client;

pub use client::{BackendConfig, PredictRequest, PredictResponse, PredictionClient};

use async_trait::async_trait;

use crate::error::PredictError;

/// Anything that can estimate a wait time for a submitted form
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Human-readable name of the backend (used in logs)
    fn name(&self) -> &str;

    /// Estimate the wait, in minutes
    async fn predict(&self, request: &PredictRequest) -> Result<f64, PredictError>;
}
