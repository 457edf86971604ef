//! Application state management
//!
//! This module contains the running application and is split into:
//! - `handlers.rs` - keyboard input handlers
//! - `messages.rs` - submission settlement messages

mod handlers;
mod messages;

pub use messages::AppMessage;

use std::path::PathBuf;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::constants::SPINNER_TICK_MS;
use crate::definition::{DefinitionError, WizardDefinition};
use crate::form::FieldForm;
use crate::wizard::{
    run_finisher, CursorMode, FieldValues, Finisher, SubmitSettlement, WizardController,
};

/// Application mode/screen
#[derive(Debug, Clone)]
pub enum AppMode {
    /// The wizard itself
    Wizard,
    /// Submission accepted
    Complete {
        output: Option<PathBuf>,
        value_count: usize,
    },
}

/// Main application state
pub struct App {
    pub mode: AppMode,
    pub controller: WizardController,
    pub forms: Vec<FieldForm>,
    pub wizard_title: String,
    pub output_path: PathBuf,
    pub should_quit: bool,
    pub show_exit_confirm: bool,
    pub spinner_state: usize,
    pub last_tick: Instant,
    /// Submission failure surfaced on the last step
    pub error: Option<String>,
    /// Payload of the in-flight submission, kept for the completion screen
    pending_payload: Option<FieldValues>,
    msg_tx: Option<mpsc::Sender<AppMessage>>,
}

impl App {
    /// Build the wizard from a definition: one form per step, steps
    /// registered in declared order, finisher installed on the controller.
    pub fn new(
        definition: &WizardDefinition,
        output_path: PathBuf,
        finisher: Finisher,
    ) -> Result<Self, DefinitionError> {
        let forms = definition.build_forms()?;
        let mut controller = WizardController::new(CursorMode::Owned);
        for (name, config) in definition.step_configs() {
            controller.register_step(&name, config);
        }
        controller.set_finisher(finisher);

        Ok(Self {
            mode: AppMode::Wizard,
            controller,
            forms,
            wizard_title: definition.wizard.title.clone(),
            output_path,
            should_quit: false,
            show_exit_confirm: false,
            spinner_state: 0,
            last_tick: Instant::now(),
            error: None,
            pending_payload: None,
            msg_tx: None,
        })
    }

    pub fn set_message_sender(&mut self, tx: mpsc::Sender<AppMessage>) {
        self.msg_tx = Some(tx);
    }

    /// Called on each tick to update animations
    pub fn tick(&mut self) {
        if self.last_tick.elapsed().as_millis() >= SPINNER_TICK_MS {
            self.spinner_state = (self.spinner_state + 1) % 10;
            self.last_tick = Instant::now();
        }
    }

    /// Index into `forms` of the active step's form. Forms are looked up by
    /// step name so dynamic unmounts cannot desynchronize the two lists.
    pub fn active_form_index(&self) -> Option<usize> {
        let entry = self.controller.current_step()?;
        self.forms.iter().position(|f| f.name() == entry.name)
    }

    pub fn active_form(&self) -> Option<&FieldForm> {
        self.active_form_index().map(|i| &self.forms[i])
    }

    /// Run the finisher as a task and report its settlement back through the
    /// message channel. A panicking finisher is contained at the task
    /// boundary and settles as a failure, so the submitting flag always
    /// clears.
    pub(crate) fn start_submission(&mut self, payload: FieldValues) {
        let Some(finisher) = self.controller.finisher() else {
            return;
        };
        let Some(tx) = self.msg_tx.clone() else {
            return;
        };
        self.pending_payload = Some(payload.clone());

        tokio::spawn(async move {
            let handle = tokio::spawn(run_finisher(finisher, payload));
            let settlement = match handle.await {
                Ok(settlement) => settlement,
                Err(e) => SubmitSettlement::Failed(format!("finisher panicked: {e}")),
            };
            let _ = tx.send(AppMessage::SubmitSettled(settlement)).await;
        });
    }

    pub(crate) fn take_pending_payload(&mut self) -> Option<FieldValues> {
        self.pending_payload.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn accepting_app() -> App {
        let definition = WizardDefinition::sample();
        let finisher: Finisher = Arc::new(|_| Box::pin(async { Ok(true) }));
        App::new(&definition, PathBuf::from("out.json"), finisher).unwrap()
    }

    #[test]
    fn test_app_builds_forms_aligned_with_registry() {
        let app = accepting_app();
        assert_eq!(app.forms.len(), app.controller.step_count());
        for (form, entry) in app.forms.iter().zip(app.controller.step_entries()) {
            assert_eq!(form.name(), entry.name);
        }
        assert_eq!(app.active_form().unwrap().name(), "project");
    }

    #[test]
    fn test_active_form_follows_cursor() {
        let mut app = accepting_app();
        app.controller.go_next();
        assert_eq!(app.active_form().unwrap().name(), "build");
    }
}
