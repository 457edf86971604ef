//! Submission settlement messages delivered through the app channel

use super::{App, AppMode};
use crate::form::StepForm;
use crate::wizard::SubmitSettlement;

/// Messages produced by background tasks
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// The in-flight submission settled
    SubmitSettled(SubmitSettlement),
}

impl App {
    /// Apply a message from the background tasks
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::SubmitSettled(settlement) => self.apply_settlement(settlement),
        }
    }

    fn apply_settlement(&mut self, settlement: SubmitSettlement) {
        let failure = match &settlement {
            SubmitSettlement::Accepted => None,
            SubmitSettlement::Declined => Some(
                "The submission was not accepted. Check the entries and try again.".to_string(),
            ),
            SubmitSettlement::Failed(message) => Some(message.clone()),
        };
        let accepted = self.controller.complete_submission(settlement);

        if accepted {
            // Clear every sub-form's input fields and show the summary.
            for form in &mut self.forms {
                form.reset_fields();
            }
            let value_count = self
                .take_pending_payload()
                .map(|payload| payload.len())
                .unwrap_or(0);
            self.error = None;
            self.mode = AppMode::Complete {
                output: Some(self.output_path.clone()),
                value_count,
            };
            return;
        }

        // Stay on the last step with all data intact and surface the reason.
        self.take_pending_payload();
        self.error = failure;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::WizardDefinition;
    use crate::wizard::{FieldValues, Finisher};
    use crossterm::event::KeyCode;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn ready_to_submit_app(finisher: Finisher) -> App {
        let definition = WizardDefinition::sample();
        let mut app = App::new(&definition, PathBuf::from("out.json"), finisher).unwrap();
        // Walk all three steps to the submission point.
        for c in "demo-project".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        app
    }

    #[tokio::test]
    async fn test_accepted_submission_resets_everything() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut app = ready_to_submit_app(Arc::new(|_| Box::pin(async { Ok(true) })));
        app.set_message_sender(tx);

        app.handle_key(KeyCode::Enter);
        assert!(app.controller.is_submitting());

        let msg = rx.recv().await.expect("settlement message");
        app.handle_message(msg);

        assert!(matches!(app.mode, AppMode::Complete { .. }));
        assert!(!app.controller.is_submitting());
        assert_eq!(app.controller.current(), 0);
        assert!(!app.controller.has_step_data("project"));
        assert!(app.forms.iter().all(|f| f.fields().iter().all(|x| x.input.is_empty())));
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_last_step_and_data() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut app = ready_to_submit_app(Arc::new(|_| {
            Box::pin(async { Err(anyhow::anyhow!("disk full")) })
        }));
        app.set_message_sender(tx);

        app.handle_key(KeyCode::Enter);
        let msg = rx.recv().await.expect("settlement message");
        app.handle_message(msg);

        assert!(matches!(app.mode, AppMode::Wizard));
        assert!(!app.controller.is_submitting());
        assert_eq!(app.controller.current(), 2);
        assert!(app.controller.has_step_data("project"));
        assert!(app.error.as_deref().unwrap_or("").contains("disk full"));
    }

    #[tokio::test]
    async fn test_panicking_finisher_still_settles() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut app = ready_to_submit_app(Arc::new(|_: FieldValues| {
            Box::pin(async { panic!("finisher blew up") })
        }));
        app.set_message_sender(tx);

        app.handle_key(KeyCode::Enter);
        let msg = rx.recv().await.expect("settlement message");
        app.handle_message(msg);

        assert!(!app.controller.is_submitting());
        assert_eq!(app.controller.current(), 2);
        assert!(app.error.is_some());
    }

    #[tokio::test]
    async fn test_second_enter_during_submission_is_ignored() {
        let (tx, mut rx) = mpsc::channel(4);
        // A finisher that waits until told, keeping the submission in flight.
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let release_rx = std::sync::Mutex::new(Some(release_rx));
        let finisher: Finisher = Arc::new(move |_| {
            let rx = release_rx.lock().unwrap().take();
            Box::pin(async move {
                if let Some(rx) = rx {
                    let _ = rx.await;
                }
                Ok(true)
            })
        });

        let mut app = ready_to_submit_app(finisher);
        app.set_message_sender(tx);

        app.handle_key(KeyCode::Enter);
        assert!(app.controller.is_submitting());

        // Re-entrant submit and navigation are both dead while in flight.
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.controller.current(), 2);
        assert!(app.controller.is_submitting());

        release_tx.send(()).unwrap();
        let msg = rx.recv().await.expect("settlement message");
        app.handle_message(msg);
        assert!(matches!(app.mode, AppMode::Complete { .. }));
    }
}
