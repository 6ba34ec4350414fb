//! # Wait Estimator
//!
//! Hospital wait-time estimator: a form that collects arrival hour, day of
//! week, doctor type and patient type, asks a prediction backend for the
//! expected wait, and keeps a running history of the answers.
//!
//! ## Modules
//!
//! - [`form`]: field values, option lists, peak-time classification
//! - [`controller`]: screen state and the submit round-trip
//! - [`backend`]: the [`Predictor`] seam and its HTTP client
//! - [`ticker`]: one-second clock task
//! - [`ui`]: text rendering of the screen and the reference chart
//! - [`session`]: interactive event loop
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wait_estimator::backend::{BackendConfig, PredictionClient};
//! use wait_estimator::controller::{FormController, SubmitOutcome};
//! use wait_estimator::form::FormField;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PredictionClient::new(BackendConfig::default())?;
//!     let mut form = FormController::new(chrono::Local::now());
//!
//!     form.update_field(FormField::ArrivalHour, "14");
//!     form.update_field(FormField::DayOfWeek, "Monday");
//!     form.update_field(FormField::DoctorType, "ANCHOR");
//!     form.update_field(FormField::PatientType, "OUTPATIENT");
//!
//!     match form.submit(&client).await {
//!         SubmitOutcome::Predicted(minutes) => println!("{} minutes", minutes),
//!         other => println!("{:?}", other),
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod session;
pub mod ticker;
pub mod ui;

// Re-export top-level types for convenience
pub use backend::{BackendConfig, PredictRequest, PredictResponse, PredictionClient, Predictor};

pub use controller::{FormController, SubmitOutcome};

pub use error::{FormError, PredictError};

pub use form::{
    classify_hour, DayOfWeek, DoctorType, FormField, FormInput, HistoryEntry, PatientType,
    PeakTier,
};

pub use config::{ClockConfig, Config, ConfigError, LoggingConfig};

pub use session::{Command, Session};

pub use ticker::ClockTicker;
