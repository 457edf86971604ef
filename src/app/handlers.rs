//! Keyboard input handlers for the application

use crossterm::event::KeyCode;

use super::{App, AppMode};
use crate::form::{FieldKind, StepForm};
use crate::wizard::FinishDisposition;

impl App {
    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) {
        // Handle exit confirmation dialog
        if self.show_exit_confirm {
            match key {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.should_quit = true;
                }
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.show_exit_confirm = false;
                }
                _ => {}
            }
            return;
        }

        match self.mode {
            AppMode::Wizard => self.handle_wizard_key(key),
            AppMode::Complete { .. } => match key {
                KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    // The controller reset on acceptance; just re-enter.
                    self.mode = AppMode::Wizard;
                }
                _ => {}
            },
        }

        // Uncontrolled-cursor change notification for the host log.
        if let Some(index) = self.controller.take_cursor_change() {
            tracing::debug!(step = index, "active step changed");
        }
    }

    fn handle_wizard_key(&mut self, key: KeyCode) {
        // All navigation and input is disabled while a submission is
        // outstanding.
        if self.controller.is_submitting() {
            return;
        }

        match key {
            KeyCode::Esc => {
                self.error = None;
                if self.controller.current() == 0 {
                    self.show_exit_confirm = true;
                } else {
                    self.controller.go_previous();
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                if let Some(i) = self.active_form_index() {
                    self.forms[i].focus_next();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(i) = self.active_form_index() {
                    self.forms[i].focus_previous();
                }
            }
            KeyCode::Enter => {
                self.error = None;
                self.finish_active_step();
            }
            KeyCode::Backspace => {
                if let Some(i) = self.active_form_index() {
                    self.forms[i].backspace();
                }
            }
            KeyCode::Char(' ') if self.active_field_is_flag() => {
                if let Some(i) = self.active_form_index() {
                    self.forms[i].toggle_flag();
                }
            }
            KeyCode::Char(c) => {
                if let Some(i) = self.active_form_index() {
                    self.forms[i].input_char(c);
                }
            }
            _ => {}
        }
    }

    /// The shared submit affordance: validate the active step's form and
    /// report its values through the single finish contract.
    fn finish_active_step(&mut self) {
        let Some(index) = self.active_form_index() else {
            return;
        };
        let name = self.forms[index].name().to_string();
        let finished = self.forms[index].try_finish();

        match finished {
            // Validation failures stay inline in the form.
            Err(_) => {}
            Ok(values) => match self.controller.finish_step(&name, values) {
                FinishDisposition::Stored => {
                    // Per-step advancement; a no-op at the boundary.
                    self.controller.go_next();
                }
                FinishDisposition::Submit(payload) => {
                    self.start_submission(payload);
                }
                FinishDisposition::Busy => {}
            },
        }
    }

    fn active_field_is_flag(&self) -> bool {
        self.active_form()
            .and_then(|form| form.active_field())
            .map(|field| field.spec.kind == FieldKind::Flag)
            .unwrap_or(false)
    }
}
