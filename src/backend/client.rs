//! Prediction REST Client
//!
//! HTTP client for the wait-time prediction backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Predictor;
use crate::error::PredictError;
use crate::form::FormInput;

/// Configuration for the prediction client
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g., "http://127.0.0.1:8000")
    pub base_url: String,
    /// Path of the prediction endpoint
    pub predict_path: String,
    /// Request timeout; `None` waits for as long as the backend takes
    pub request_timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            predict_path: "/predict".to_string(),
            request_timeout: None,
        }
    }
}

impl BackendConfig {
    /// Full URL of the prediction endpoint
    pub fn predict_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.predict_path.trim_start_matches('/')
        )
    }
}

/// Request body: the form fields, sent as-is
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PredictRequest {
    pub form: FormInput,
}

impl From<FormInput> for PredictRequest {
    fn from(form: FormInput) -> Self {
        Self { form }
    }
}

/// Success body returned by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub predicted_wait_time_minutes: f64,
}

/// REST client for the prediction backend
pub struct PredictionClient {
    client: Client,
    config: BackendConfig,
}

impl PredictionClient {
    /// Create a new client with the given configuration
    pub fn new(config: BackendConfig) -> Result<Self, PredictError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Post a form to the prediction endpoint and read back the estimate.
    ///
    /// The HTTP status is not consulted: any body that decodes to a
    /// [`PredictResponse`] is accepted, and any body that does not is an
    /// [`PredictError::InvalidResponse`].
    pub async fn predict_wait(&self, request: &PredictRequest) -> Result<f64, PredictError> {
        let url = self.config.predict_url();

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        let text = response.text().await.map_err(classify_error)?;

        let body: PredictResponse =
            serde_json::from_str(&text).map_err(|e| PredictError::InvalidResponse {
                status: status.as_u16(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            status = status.as_u16(),
            minutes = body.predicted_wait_time_minutes,
            "Prediction received"
        );

        Ok(body.predicted_wait_time_minutes)
    }
}

#[async_trait]
impl Predictor for PredictionClient {
    fn name(&self) -> &str {
        &self.config.base_url
    }

    async fn predict(&self, request: &PredictRequest) -> Result<f64, PredictError> {
        self.predict_wait(request).await
    }
}

fn classify_error(e: reqwest::Error) -> PredictError {
    if e.is_timeout() {
        PredictError::Timeout
    } else if e.is_connect() {
        PredictError::Unavailable(e.to_string())
    } else {
        PredictError::Request(e)
    }
}
