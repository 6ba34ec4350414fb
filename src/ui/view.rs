//! Screen Rendering
//!
//! Turns controller state into the text screen. Rendering is a pure
//! function of the controller, so it is cheap to call after every event.

use crate::controller::FormController;
use crate::form::{FormField, HistoryEntry};

use super::chart;

pub const TITLE: &str = "🏥 Hospital Wait Time Estimator";

/// Options for [`render`]
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Width of the longest chart bar, in cells
    pub chart_width: usize,
    /// Include the reference chart
    pub show_chart: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            chart_width: 30,
            show_chart: true,
        }
    }
}

/// Render the whole screen
pub fn render(controller: &FormController, options: &ViewOptions) -> String {
    let mut out = String::new();

    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&format!(
        "🕒 Current Time: {}\n\n",
        controller.clock().format("%H:%M:%S")
    ));

    out.push_str(&render_form(controller));
    out.push('\n');

    if let Some(minutes) = controller.prediction() {
        out.push_str(&render_result(minutes));
        out.push('\n');
    }

    if options.show_chart {
        out.push_str(&chart::reference_chart(options.chart_width));
        out.push('\n');
    }

    if !controller.history().is_empty() {
        out.push_str(&render_history(controller.history()));
    }

    out
}

/// Form fields, advisory, error line and submit button
pub fn render_form(controller: &FormController) -> String {
    let form = controller.form();
    let mut out = String::new();

    for field in FormField::ALL {
        let value = form.get(field);
        let shown = if value.is_empty() {
            field.placeholder()
        } else {
            value
        };
        out.push_str(&format!("{}\n  [{}]\n", field.label(), shown));

        if field == FormField::ArrivalHour {
            if let Some(tier) = controller.peak_advisory() {
                out.push_str(&format!("  {}\n", tier.label()));
            }
        }
    }

    if let Some(error) = controller.error() {
        out.push_str(&format!("\n❗ {}\n", error));
    }

    let button = if controller.is_loading() {
        "Predicting..."
    } else {
        "Predict Wait Time"
    };
    out.push_str(&format!("\n< {} >\n", button));

    out
}

/// Result panel for an estimate
pub fn render_result(minutes: f64) -> String {
    format!("⏱️ Estimated Wait Time:\n  {} minutes\n", minutes)
}

/// One history line
pub fn history_line(entry: &HistoryEntry) -> String {
    format!(
        "{}, {}:00 — {}, {} ➜ {} mins",
        entry.input.day_of_week,
        entry.input.arrival_hour,
        entry.input.doctor_type,
        entry.input.patient_type,
        entry.result
    )
}

/// History section, oldest entry first
pub fn render_history(history: &[HistoryEntry]) -> String {
    let mut out = String::from("📄 Prediction History\n");
    for entry in history {
        out.push_str(&format!("  • {}\n", history_line(entry)));
    }
    out
}
