//! Display Surface
//!
//! Text rendering of the estimator screen.

pub mod chart;
pub mod view;

pub use chart::{reference_chart, render_bar_chart, AVG_WAIT_BY_DAY};
pub use view::{history_line, render, ViewOptions};
