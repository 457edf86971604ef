//! Reusable UI widgets

mod spinner;
mod step_indicator;

pub use spinner::Spinner;
pub use step_indicator::{IndicatorStep, StepIndicator};
