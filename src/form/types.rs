//! Form Types
//!
//! Field values, option lists and the snapshot recorded in history.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four form fields, stored exactly as the user typed or picked them.
///
/// Values are raw strings: the form performs no coercion, and the only
/// validation is the presence check done at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub arrival_hour: String,
    pub day_of_week: String,
    pub doctor_type: String,
    pub patient_type: String,
}

impl FormInput {
    /// Read a field
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ArrivalHour => &self.arrival_hour,
            FormField::DayOfWeek => &self.day_of_week,
            FormField::DoctorType => &self.doctor_type,
            FormField::PatientType => &self.patient_type,
        }
    }

    /// Overwrite a field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::ArrivalHour => self.arrival_hour = value,
            FormField::DayOfWeek => self.day_of_week = value,
            FormField::DoctorType => self.doctor_type = value,
            FormField::PatientType => self.patient_type = value,
        }
    }

    /// Fields that are still empty, in form order
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// True when every field has a value
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Names a field of [`FormInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ArrivalHour,
    DayOfWeek,
    DoctorType,
    PatientType,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::ArrivalHour,
        FormField::DayOfWeek,
        FormField::DoctorType,
        FormField::PatientType,
    ];

    /// Wire name, also the key in the request body
    pub fn name(&self) -> &'static str {
        match self {
            FormField::ArrivalHour => "arrival_hour",
            FormField::DayOfWeek => "day_of_week",
            FormField::DoctorType => "doctor_type",
            FormField::PatientType => "patient_type",
        }
    }

    /// Label shown above the input
    pub fn label(&self) -> &'static str {
        match self {
            FormField::ArrivalHour => "Arrival Hour (0–23)",
            FormField::DayOfWeek => "Day of Week",
            FormField::DoctorType => "Doctor Type",
            FormField::PatientType => "Patient Type",
        }
    }

    /// Placeholder shown while a select field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::ArrivalHour => "",
            FormField::DayOfWeek => "-- Select Day --",
            FormField::DoctorType => "-- Select Doctor Type --",
            FormField::PatientType => "-- Select Patient Type --",
        }
    }

    /// Option values offered for the field; empty for the free-form hour
    pub fn options(&self) -> Vec<&'static str> {
        match self {
            FormField::ArrivalHour => Vec::new(),
            FormField::DayOfWeek => DayOfWeek::ALL.iter().map(|d| d.as_str()).collect(),
            FormField::DoctorType => DoctorType::ALL.iter().map(|d| d.as_str()).collect(),
            FormField::PatientType => PatientType::ALL.iter().map(|p| p.as_str()).collect(),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrival_hour" | "hour" => Ok(FormField::ArrivalHour),
            "day_of_week" | "day" => Ok(FormField::DayOfWeek),
            "doctor_type" | "doctor" => Ok(FormField::DoctorType),
            "patient_type" | "patient" => Ok(FormField::PatientType),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Returned when a field name does not match any form field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: {0} (expected hour, day, doctor or patient)")]
pub struct UnknownField(pub String);

/// Day of the week as offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

/// Kind of doctor the patient will see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorType {
    Anchor,
    Floating,
    Locum,
}

impl DoctorType {
    pub const ALL: [DoctorType; 3] = [DoctorType::Anchor, DoctorType::Floating, DoctorType::Locum];

    pub fn as_str(&self) -> &'static str {
        match self {
            DoctorType::Anchor => "ANCHOR",
            DoctorType::Floating => "FLOATING",
            DoctorType::Locum => "LOCUM",
        }
    }
}

/// Admission kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientType {
    Outpatient,
    Inpatient,
}

impl PatientType {
    pub const ALL: [PatientType; 2] = [PatientType::Outpatient, PatientType::Inpatient];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatientType::Outpatient => "OUTPATIENT",
            PatientType::Inpatient => "INPATIENT",
        }
    }
}

/// One successful submission: the fields that were sent plus the estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub input: FormInput,
    pub result: f64,
}

impl HistoryEntry {
    pub fn new(input: FormInput, result: f64) -> Self {
        Self { input, result }
    }
}
