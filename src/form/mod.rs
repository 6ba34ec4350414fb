//! Form Model
//!
//! The estimator form: its four fields, the option values it offers,
//! the history snapshot type and the advisory peak-time classification.

mod peak;
mod types;

pub use peak::{classify_hour, PeakTier};
pub use types::{
    DayOfWeek, DoctorType, FormField, FormInput, HistoryEntry, PatientType, UnknownField,
};
