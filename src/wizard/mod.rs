//! Wizard orchestration core
//!
//! Pure state machine with no UI dependency, split into:
//! - `registry.rs` - the ordered set of mounted steps
//! - `cursor.rs` - the active step index (owned or hosted)
//! - `aggregator.rs` - per-step values and the final merge
//! - `controller.rs` - navigation rules and the submission pipeline

mod aggregator;
mod controller;
mod cursor;
mod registry;

pub use aggregator::{DataAggregator, FieldValues};
pub use controller::{
    run_finisher, FinishDisposition, Finisher, FinisherFuture, NavButtons, SubmitSettlement,
    WizardController,
};
pub use cursor::{CursorMode, StepCursor};
pub use registry::{StepConfig, StepEntry, StepRegistry};
