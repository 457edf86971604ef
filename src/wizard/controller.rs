//! Wizard controller: navigation and the submission pipeline
//!
//! Ties the step registry, cursor, and aggregator into one single-owner
//! state object. The host injects it into each step at construction; step
//! forms hold only a reference, never a copy.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;

use super::aggregator::{DataAggregator, FieldValues};
use super::cursor::{CursorMode, StepCursor};
use super::registry::{StepConfig, StepEntry, StepRegistry};

/// Future returned by a finisher. `Ok(true)` accepts the submission.
pub type FinisherFuture = Pin<Box<dyn Future<Output = Result<bool>> + Send>>;

/// The final-merge completion handler, invoked with the merged payload.
pub type Finisher = Arc<dyn Fn(FieldValues) -> FinisherFuture + Send + Sync>;

/// What `finish_step` decided.
#[derive(Debug, Clone, PartialEq)]
pub enum FinishDisposition {
    /// Values stored; advancement stays with the caller's own flow.
    Stored,
    /// Last step with a configured finisher: the merged snapshot to submit.
    /// The submitting flag is now set.
    Submit(FieldValues),
    /// A submission is already outstanding; the report was ignored.
    Busy,
}

/// Settlement of an in-flight submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitSettlement {
    /// Finisher returned true.
    Accepted,
    /// Finisher returned false.
    Declined,
    /// Finisher errored (or panicked, contained at the task boundary).
    Failed(String),
}

/// Which navigation affordances the current position allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavButtons {
    pub previous: bool,
    pub next: bool,
    pub submit: bool,
}

/// The wizard state machine.
pub struct WizardController {
    registry: StepRegistry,
    cursor: StepCursor,
    aggregator: DataAggregator,
    finisher: Option<Finisher>,
    submitting: bool,
}

impl WizardController {
    pub fn new(mode: CursorMode) -> Self {
        Self {
            registry: StepRegistry::new(),
            cursor: StepCursor::new(mode),
            aggregator: DataAggregator::new(),
            finisher: None,
            submitting: false,
        }
    }

    /// Configure the final-merge completion handler.
    pub fn set_finisher(&mut self, finisher: Finisher) {
        self.finisher = Some(finisher);
    }

    pub fn finisher(&self) -> Option<Finisher> {
        self.finisher.clone()
    }

    // ---- step registry -----------------------------------------------------

    /// Mount a step. Duplicate names update config in place.
    pub fn register_step(&mut self, name: &str, config: StepConfig) -> bool {
        self.registry.register(name, config)
    }

    /// Unmount a step, purging its aggregated data. If the active step is
    /// removed the cursor clamps into the new bounds.
    pub fn deregister_step(&mut self, name: &str) -> bool {
        let removed = self.registry.deregister(name);
        if removed {
            self.aggregator.remove(name);
            self.cursor.clamp(self.registry.len());
        }
        removed
    }

    pub fn step_count(&self) -> usize {
        self.registry.len()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn step_entries(&self) -> &[StepEntry] {
        self.registry.entries()
    }

    pub fn step_values(&self, name: &str) -> Option<&FieldValues> {
        self.aggregator.get(name)
    }

    pub fn has_step_data(&self, name: &str) -> bool {
        self.aggregator.get(name).is_some()
    }

    // ---- cursor / navigation ----------------------------------------------

    pub fn current(&self) -> usize {
        self.cursor.index()
    }

    pub fn current_step(&self) -> Option<&StepEntry> {
        self.registry.entry_at(self.cursor.index())
    }

    pub fn is_last_step(&self) -> bool {
        self.cursor.is_last(self.registry.len())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Advance the cursor (or request the advance in hosted mode). Disabled
    /// while a submission is outstanding; a silent no-op at the boundary.
    pub fn go_next(&mut self) -> Option<usize> {
        if self.submitting {
            return None;
        }
        self.cursor.next(self.registry.len())
    }

    /// Step back (or request it in hosted mode). No-op at index 0.
    pub fn go_previous(&mut self) -> Option<usize> {
        if self.submitting {
            return None;
        }
        self.cursor.previous()
    }

    /// Hosted-mode application of an externally owned cursor value.
    pub fn set_current(&mut self, index: usize) {
        self.cursor.set(index, self.registry.len());
    }

    /// Drain the last owned-mode cursor change for the host's listener.
    pub fn take_cursor_change(&mut self) -> Option<usize> {
        self.cursor.take_change()
    }

    /// Buttons derive purely from cursor position and step count; everything
    /// is disabled while submitting.
    pub fn nav_buttons(&self) -> NavButtons {
        let count = self.registry.len();
        if self.submitting || count == 0 {
            return NavButtons::default();
        }
        let index = self.cursor.index();
        NavButtons {
            previous: index > 0,
            next: index < count - 1,
            submit: index == count - 1,
        }
    }

    // ---- aggregation / submission -----------------------------------------

    /// A step reports its validated values.
    ///
    /// Values are stored (overwriting any earlier report). Only when the
    /// cursor sits on the last step and a finisher is configured does this
    /// start a submission: the submitting flag goes up and the merged
    /// snapshot is returned for the host to run the finisher on.
    pub fn finish_step(&mut self, name: &str, values: FieldValues) -> FinishDisposition {
        if self.submitting {
            return FinishDisposition::Busy;
        }
        if self.registry.get(name).is_none() {
            tracing::warn!(step = name, "finish report from an unmounted step, ignored");
            return FinishDisposition::Stored;
        }
        self.aggregator.record(name, values);

        if !self.is_last_step() || self.finisher.is_none() {
            return FinishDisposition::Stored;
        }

        // Stable snapshot: merged in registry order before anything else can
        // mutate the aggregator, so a partially merged payload is impossible.
        let payload = self.aggregator.merged(&self.registry.names());
        self.submitting = true;
        tracing::info!(steps = self.registry.len(), "submitting merged wizard data");
        FinishDisposition::Submit(payload)
    }

    /// Apply the finisher's settlement. Returns true when the submission was
    /// accepted, in which case the wizard has been reset and the host should
    /// clear every sub-form's input fields.
    ///
    /// The submitting flag clears on every settlement kind.
    pub fn complete_submission(&mut self, settlement: SubmitSettlement) -> bool {
        if !self.submitting {
            tracing::debug!("settlement received with no submission outstanding");
        }
        self.submitting = false;

        match settlement {
            SubmitSettlement::Accepted => {
                self.cursor.reset();
                self.aggregator.clear();
                tracing::info!("submission accepted, wizard reset");
                true
            }
            SubmitSettlement::Declined => {
                tracing::error!("submission declined by the finisher, data preserved");
                false
            }
            SubmitSettlement::Failed(message) => {
                tracing::error!(error = %message, "submission failed, data preserved");
                false
            }
        }
    }

    /// Reset to the initial state: first step, no aggregated data.
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.aggregator.clear();
        self.submitting = false;
    }
}

/// Drive a finisher to settlement, mapping its result onto the pipeline's
/// settlement kinds. Panics are not contained here; hosts that need panic
/// containment run this inside a spawned task and map the join error.
pub async fn run_finisher(finisher: Finisher, payload: FieldValues) -> SubmitSettlement {
    match finisher(payload).await {
        Ok(true) => SubmitSettlement::Accepted,
        Ok(false) => SubmitSettlement::Declined,
        Err(e) => SubmitSettlement::Failed(format!("{e:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, serde_json::Value)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn three_step_controller() -> WizardController {
        let mut wizard = WizardController::new(CursorMode::Owned);
        wizard.register_step("one", StepConfig::new("One", 0));
        wizard.register_step("two", StepConfig::new("Two", 1));
        wizard.register_step("three", StepConfig::new("Three", 2));
        wizard
    }

    fn accepting_finisher() -> Finisher {
        Arc::new(|_payload| Box::pin(async { Ok(true) }))
    }

    #[test]
    fn test_nav_buttons_by_position() {
        let mut wizard = three_step_controller();

        // First step: next only.
        assert_eq!(
            wizard.nav_buttons(),
            NavButtons { previous: false, next: true, submit: false }
        );

        wizard.go_next();
        assert_eq!(
            wizard.nav_buttons(),
            NavButtons { previous: true, next: true, submit: false }
        );

        wizard.go_next();
        assert_eq!(
            wizard.nav_buttons(),
            NavButtons { previous: true, next: false, submit: true }
        );
    }

    #[test]
    fn test_cursor_bounded_and_step_size_one() {
        let mut wizard = three_step_controller();
        let mut previous = wizard.current();
        for _ in 0..10 {
            wizard.go_next();
            let now = wizard.current();
            assert!(now < wizard.step_count());
            assert!(now == previous || now == previous + 1);
            previous = now;
        }
        assert_eq!(wizard.current(), 2);
        for _ in 0..10 {
            wizard.go_previous();
            let now = wizard.current();
            assert!(now == previous || now + 1 == previous);
            previous = now;
        }
        assert_eq!(wizard.current(), 0);
    }

    #[test]
    fn test_finish_without_finisher_only_stores() {
        let mut wizard = three_step_controller();
        wizard.go_next();
        wizard.go_next();
        assert!(wizard.is_last_step());

        let disposition = wizard.finish_step("three", values(&[("c", json!(3))]));
        assert_eq!(disposition, FinishDisposition::Stored);
        assert!(!wizard.is_submitting());
        assert!(wizard.has_step_data("three"));
    }

    #[test]
    fn test_finish_before_last_does_not_move_cursor() {
        let mut wizard = three_step_controller();
        wizard.set_finisher(accepting_finisher());

        let disposition = wizard.finish_step("one", values(&[("a", json!(1))]));
        assert_eq!(disposition, FinishDisposition::Stored);
        // Advancement belongs to the caller's flow.
        assert_eq!(wizard.current(), 0);
    }

    #[test]
    fn test_full_run_accepted_resets_wizard() {
        let mut wizard = three_step_controller();
        wizard.set_finisher(accepting_finisher());

        wizard.finish_step("one", values(&[("a", json!(1))]));
        wizard.go_next();
        wizard.finish_step("two", values(&[("b", json!(2))]));
        wizard.go_next();

        let disposition = wizard.finish_step("three", values(&[("c", json!(3))]));
        let FinishDisposition::Submit(payload) = disposition else {
            panic!("expected a submission");
        };
        assert_eq!(
            payload,
            values(&[("a", json!(1)), ("b", json!(2)), ("c", json!(3))])
        );
        assert!(wizard.is_submitting());

        let accepted = wizard.complete_submission(SubmitSettlement::Accepted);
        assert!(accepted);
        assert_eq!(wizard.current(), 0);
        assert!(!wizard.is_submitting());
        assert!(!wizard.has_step_data("one"));
        assert!(!wizard.has_step_data("two"));
        assert!(!wizard.has_step_data("three"));
    }

    #[test]
    fn test_failed_submission_preserves_state() {
        let mut wizard = three_step_controller();
        wizard.set_finisher(accepting_finisher());

        wizard.finish_step("one", values(&[("a", json!(1))]));
        wizard.go_next();
        wizard.finish_step("two", values(&[("b", json!(2))]));
        wizard.go_next();
        wizard.finish_step("three", values(&[("c", json!(3))]));

        let accepted =
            wizard.complete_submission(SubmitSettlement::Failed("boom".to_string()));
        assert!(!accepted);
        assert_eq!(wizard.current(), 2);
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.step_values("one").unwrap()["a"], json!(1));
        assert_eq!(wizard.step_values("two").unwrap()["b"], json!(2));
        assert_eq!(wizard.step_values("three").unwrap()["c"], json!(3));
    }

    #[test]
    fn test_declined_submission_preserves_state() {
        let mut wizard = three_step_controller();
        wizard.set_finisher(accepting_finisher());
        wizard.go_next();
        wizard.go_next();
        wizard.finish_step("three", values(&[("c", json!(3))]));

        assert!(!wizard.complete_submission(SubmitSettlement::Declined));
        assert_eq!(wizard.current(), 2);
        assert!(wizard.has_step_data("three"));
    }

    #[test]
    fn test_reentrant_finish_rejected_while_submitting() {
        let mut wizard = three_step_controller();
        wizard.set_finisher(accepting_finisher());
        wizard.go_next();
        wizard.go_next();

        wizard.finish_step("three", values(&[("c", json!(3))]));
        assert!(wizard.is_submitting());

        let second = wizard.finish_step("three", values(&[("c", json!(4))]));
        assert_eq!(second, FinishDisposition::Busy);
        // Navigation is disabled during the in-flight submission.
        assert_eq!(wizard.go_next(), None);
        assert_eq!(wizard.go_previous(), None);
        assert_eq!(wizard.nav_buttons(), NavButtons::default());
        // The outstanding snapshot kept the original value.
        assert_eq!(wizard.step_values("three").unwrap()["c"], json!(3));
    }

    #[test]
    fn test_deregister_purges_data_and_clamps_cursor() {
        let mut wizard = three_step_controller();
        wizard.finish_step("three", values(&[("c", json!(3))]));
        wizard.go_next();
        wizard.go_next();
        assert_eq!(wizard.current(), 2);

        // Removing the active last step clamps the cursor into bounds.
        assert!(wizard.deregister_step("three"));
        assert_eq!(wizard.current(), 1);
        assert!(!wizard.has_step_data("three"));

        // Re-registering the same name starts with no prior data.
        wizard.register_step("three", StepConfig::new("Three", 2));
        assert!(!wizard.has_step_data("three"));
    }

    #[test]
    fn test_deregister_other_step_leaves_entries_intact() {
        let mut wizard = three_step_controller();
        wizard.finish_step("one", values(&[("a", json!(1))]));
        wizard.go_next();
        wizard.finish_step("two", values(&[("b", json!(2))]));

        wizard.deregister_step("one");
        assert_eq!(wizard.step_values("two").unwrap()["b"], json!(2));
        assert_eq!(wizard.step_names(), vec!["two", "three"]);
    }

    #[test]
    fn test_hosted_mode_request_then_apply() {
        let mut wizard = WizardController::new(CursorMode::Hosted);
        wizard.register_step("a", StepConfig::new("A", 0));
        wizard.register_step("b", StepConfig::new("B", 1));

        // The request does not move the cursor...
        let requested = wizard.go_next();
        assert_eq!(requested, Some(1));
        assert_eq!(wizard.current(), 0);

        // ...the host applies it.
        wizard.set_current(1);
        assert_eq!(wizard.current(), 1);
        assert!(wizard.is_last_step());
    }

    #[tokio::test]
    async fn test_run_finisher_maps_results() {
        let accept: Finisher = Arc::new(|_| Box::pin(async { Ok(true) }));
        let decline: Finisher = Arc::new(|_| Box::pin(async { Ok(false) }));
        let fail: Finisher =
            Arc::new(|_| Box::pin(async { Err(anyhow::anyhow!("disk full")) }));

        assert_eq!(
            run_finisher(accept, FieldValues::new()).await,
            SubmitSettlement::Accepted
        );
        assert_eq!(
            run_finisher(decline, FieldValues::new()).await,
            SubmitSettlement::Declined
        );
        match run_finisher(fail, FieldValues::new()).await {
            SubmitSettlement::Failed(message) => assert!(message.contains("disk full")),
            other => panic!("unexpected settlement: {other:?}"),
        }
    }
}
