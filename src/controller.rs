//! Form Controller
//!
//! Owns every piece of screen state and the submit round-trip.
//!
//! The controller is a plain owned value with getters and mutation methods.
//! Submission comes in two shapes:
//!
//! - [`FormController::submit`] awaits the predictor directly, for one-shot
//!   callers.
//! - [`FormController::begin_submit`] / [`FormController::complete_submit`]
//!   split the round-trip so an event loop can keep ticking the clock while
//!   the request is in flight.
//!
//! A submit issued while another is in flight is rejected with
//! [`SubmitOutcome::Busy`] and leaves the state untouched.

use chrono::{DateTime, Local, Timelike};

use crate::backend::{PredictRequest, Predictor};
use crate::error::{FormError, PredictError};
use crate::form::{classify_hour, FormField, FormInput, HistoryEntry, PeakTier};

/// What became of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend answered; the estimate is in minutes
    Predicted(f64),
    /// Validation or backend failure; the message is on screen
    Failed(FormError),
    /// A request is already in flight; nothing was changed
    Busy,
}

/// Screen state of the estimator form
#[derive(Debug, Clone)]
pub struct FormController {
    form: FormInput,
    loading: bool,
    prediction: Option<f64>,
    error: Option<String>,
    history: Vec<HistoryEntry>,
    clock: DateTime<Local>,
}

impl FormController {
    /// Create a controller with an empty form
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            form: FormInput::default(),
            loading: false,
            prediction: None,
            error: None,
            history: Vec::new(),
            clock: now,
        }
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    /// True while a request is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last estimate, in minutes
    pub fn prediction(&self) -> Option<f64> {
        self.prediction
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Successful submissions, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn clock(&self) -> DateTime<Local> {
        self.clock
    }

    /// Advisory tier for the current arrival hour, if one is entered
    pub fn peak_advisory(&self) -> Option<PeakTier> {
        if self.form.arrival_hour.is_empty() {
            None
        } else {
            Some(classify_hour(&self.form.arrival_hour))
        }
    }

    /// Advance the clock, seeding an empty arrival hour with the current hour
    pub fn tick(&mut self, now: DateTime<Local>) {
        self.clock = now;

        if self.form.arrival_hour.is_empty() {
            self.form.arrival_hour = now.hour().to_string();
            tracing::debug!(hour = now.hour(), "Seeded arrival hour from clock");
        }
    }

    /// Store a raw field value
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Validate and enter the loading state.
    ///
    /// Returns the request to send on success. On failure the returned
    /// outcome says why; a validation failure also puts the message on
    /// screen.
    pub fn begin_submit(&mut self) -> Result<PredictRequest, SubmitOutcome> {
        if self.loading {
            tracing::debug!("Submit ignored, request already in flight");
            return Err(SubmitOutcome::Busy);
        }

        if !self.form.is_complete() {
            let missing: Vec<&str> = self
                .form
                .missing_fields()
                .iter()
                .map(|f| f.name())
                .collect();
            tracing::debug!(?missing, "Submit rejected, form incomplete");

            let err = FormError::Validation;
            self.error = Some(err.to_string());
            return Err(SubmitOutcome::Failed(err));
        }

        self.error = None;
        self.loading = true;
        self.prediction = None;

        Ok(PredictRequest::from(self.form.clone()))
    }

    /// Apply the result of a request started by [`Self::begin_submit`]
    pub fn complete_submit(
        &mut self,
        request: PredictRequest,
        result: Result<f64, PredictError>,
    ) -> SubmitOutcome {
        let outcome = match result {
            Ok(minutes) => {
                self.prediction = Some(minutes);
                self.history.push(HistoryEntry::new(request.form, minutes));
                tracing::info!(
                    minutes,
                    history_len = self.history.len(),
                    "Wait time predicted"
                );
                SubmitOutcome::Predicted(minutes)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prediction request failed");
                let err = FormError::from(e);
                self.error = Some(err.to_string());
                SubmitOutcome::Failed(err)
            }
        };

        self.loading = false;
        outcome
    }

    /// Run the whole submit round-trip against `predictor`
    pub async fn submit<P>(&mut self, predictor: &P) -> SubmitOutcome
    where
        P: Predictor + ?Sized,
    {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };

        let result = predictor.predict(&request).await;
        self.complete_submit(request, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Predictor that replays canned answers and counts calls
    struct FakePredictor {
        answers: Mutex<Vec<Result<f64, PredictError>>>,
        calls: AtomicUsize,
    }

    impl FakePredictor {
        fn new(answers: Vec<Result<f64, PredictError>>) -> Self {
            Self {
                answers: Mutex::new(answers.into_iter().rev().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Predictor for FakePredictor {
        fn name(&self) -> &str {
            "fake"
        }

        async fn predict(&self, _request: &PredictRequest) -> Result<f64, PredictError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answers
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(PredictError::Unavailable("no answer".to_string())))
        }
    }

    fn at_hour(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 4, hour, 15, 0).unwrap()
    }

    fn filled(hour: &str, day: &str) -> FormController {
        let mut controller = FormController::new(at_hour(8));
        controller.update_field(FormField::ArrivalHour, hour);
        controller.update_field(FormField::DayOfWeek, day);
        controller.update_field(FormField::DoctorType, "ANCHOR");
        controller.update_field(FormField::PatientType, "OUTPATIENT");
        controller
    }

    #[test]
    fn test_initial_state() {
        let controller = FormController::new(at_hour(8));
        assert_eq!(controller.form(), &FormInput::default());
        assert!(!controller.is_loading());
        assert!(controller.prediction().is_none());
        assert!(controller.error().is_none());
        assert!(controller.history().is_empty());
        assert!(controller.peak_advisory().is_none());
    }

    #[test]
    fn test_tick_seeds_empty_hour() {
        let mut controller = FormController::new(at_hour(8));
        controller.tick(at_hour(14));

        assert_eq!(controller.form().arrival_hour, "14");
        assert_eq!(controller.clock(), at_hour(14));
        assert_eq!(controller.peak_advisory(), Some(PeakTier::Orange));
    }

    #[test]
    fn test_tick_keeps_user_value() {
        let mut controller = FormController::new(at_hour(8));
        controller.update_field(FormField::ArrivalHour, "3");
        controller.tick(at_hour(14));

        assert_eq!(controller.form().arrival_hour, "3");
        assert_eq!(controller.clock(), at_hour(14));
    }

    #[test]
    fn test_tick_reseeds_after_clear() {
        let mut controller = FormController::new(at_hour(8));
        controller.tick(at_hour(9));
        controller.update_field(FormField::ArrivalHour, "");
        assert!(controller.peak_advisory().is_none());

        controller.tick(at_hour(18));
        assert_eq!(controller.form().arrival_hour, "18");
    }

    #[test]
    fn test_update_field_stores_raw_value() {
        let mut controller = FormController::new(at_hour(8));
        controller.update_field(FormField::ArrivalHour, "ten o'clock");
        assert_eq!(controller.form().arrival_hour, "ten o'clock");
        assert_eq!(controller.peak_advisory(), Some(PeakTier::Green));
    }

    #[tokio::test]
    async fn test_submit_incomplete_never_calls_backend() {
        for missing in FormField::ALL {
            let predictor = FakePredictor::new(vec![Ok(10.0)]);
            let mut controller = filled("14", "Monday");
            controller.update_field(missing, "");

            let outcome = controller.submit(&predictor).await;

            assert_eq!(outcome, SubmitOutcome::Failed(FormError::Validation));
            assert_eq!(predictor.calls(), 0);
            assert_eq!(controller.error(), Some("Please fill in all fields."));
            assert!(!controller.is_loading());
        }
    }

    #[tokio::test]
    async fn test_submit_success() {
        let predictor = FakePredictor::new(vec![Ok(27.0)]);
        let mut controller = filled("14", "Monday");

        let outcome = controller.submit(&predictor).await;

        assert_eq!(outcome, SubmitOutcome::Predicted(27.0));
        assert_eq!(controller.prediction(), Some(27.0));
        assert!(controller.error().is_none());
        assert!(!controller.is_loading());
        assert_eq!(controller.history().len(), 1);

        let entry = &controller.history()[0];
        assert_eq!(entry.input.arrival_hour, "14");
        assert_eq!(entry.input.day_of_week, "Monday");
        assert_eq!(entry.input.doctor_type, "ANCHOR");
        assert_eq!(entry.input.patient_type, "OUTPATIENT");
        assert_eq!(entry.result, 27.0);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_history() {
        let predictor = FakePredictor::new(vec![
            Ok(12.0),
            Err(PredictError::Unavailable("connection refused".to_string())),
        ]);
        let mut controller = filled("14", "Monday");

        controller.submit(&predictor).await;
        let outcome = controller.submit(&predictor).await;

        assert_eq!(outcome, SubmitOutcome::Failed(FormError::BackendUnavailable));
        assert_eq!(
            controller.error(),
            Some("Could not connect to the backend. Is it running?")
        );
        assert_eq!(controller.history().len(), 1);
        assert!(controller.prediction().is_none());
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let predictor = FakePredictor::new(vec![
            Err(PredictError::Timeout),
            Ok(40.5),
        ]);
        let mut controller = filled("11", "Friday");

        controller.submit(&predictor).await;
        assert!(controller.error().is_some());

        controller.submit(&predictor).await;
        assert!(controller.error().is_none());
        assert_eq!(controller.prediction(), Some(40.5));
    }

    #[test]
    fn test_loading_spans_the_request() {
        let mut controller = filled("14", "Monday");
        assert!(!controller.is_loading());

        let request = controller.begin_submit().unwrap();
        assert!(controller.is_loading());
        assert!(controller.prediction().is_none());

        controller.complete_submit(request, Ok(5.0));
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_submit_while_loading_is_rejected() {
        let mut controller = filled("14", "Monday");
        let request = controller.begin_submit().unwrap();

        assert_eq!(controller.begin_submit().unwrap_err(), SubmitOutcome::Busy);
        assert!(controller.is_loading());
        assert!(controller.error().is_none());

        controller.complete_submit(request, Ok(8.0));
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn test_history_records_submitted_snapshot() {
        let mut controller = filled("14", "Monday");
        let request = controller.begin_submit().unwrap();

        // Edits made while the request is in flight do not leak into history
        controller.update_field(FormField::DayOfWeek, "Sunday");
        controller.complete_submit(request, Ok(19.0));

        assert_eq!(controller.history()[0].input.day_of_week, "Monday");
        assert_eq!(controller.form().day_of_week, "Sunday");
    }

    #[tokio::test]
    async fn test_history_is_append_only_in_order() {
        let predictor = FakePredictor::new(vec![Ok(10.0), Ok(20.0), Ok(30.0)]);
        let mut controller = filled("9", "Tuesday");

        for day in ["Tuesday", "Wednesday", "Tuesday"] {
            controller.update_field(FormField::DayOfWeek, day);
            controller.submit(&predictor).await;
        }

        let results: Vec<f64> = controller.history().iter().map(|e| e.result).collect();
        let days: Vec<&str> = controller
            .history()
            .iter()
            .map(|e| e.input.day_of_week.as_str())
            .collect();
        assert_eq!(results, vec![10.0, 20.0, 30.0]);
        assert_eq!(days, vec!["Tuesday", "Wednesday", "Tuesday"]);
    }

    #[test]
    fn test_form_not_reset_after_submit() {
        let mut controller = filled("14", "Monday");
        let request = controller.begin_submit().unwrap();
        controller.complete_submit(request, Ok(3.0));

        assert!(controller.form().is_complete());
        assert_eq!(controller.form().arrival_hour, "14");
    }
}
