//! Per-step forms: the collaborator that owns field-level validation
//!
//! The wizard core never sees individual fields. Each step mounts a form
//! implementing [`StepForm`]; when the step's own validation passes, the
//! form's `try_finish` produces the values reported to the controller.

mod fields;

pub use fields::{validate_input, FieldKind, FieldSpec, FieldState};

use thiserror::Error;

use crate::wizard::FieldValues;

/// Step-local validation failure. Consumed entirely by the form layer and
/// the host UI; it never reaches the wizard core.
#[derive(Debug, Clone, Error)]
pub enum FormError {
    #[error("{field}: {message}")]
    Invalid { field: String, message: String },
}

/// The external form collaborator contract.
pub trait StepForm {
    fn name(&self) -> &str;

    fn title(&self) -> &str;

    /// Run the step's own validation and produce its values.
    fn try_finish(&mut self) -> Result<FieldValues, FormError>;

    /// Programmatic reset of every input field.
    fn reset_fields(&mut self);
}

/// A form over a flat list of declarative fields.
#[derive(Debug, Clone)]
pub struct FieldForm {
    name: String,
    title: String,
    fields: Vec<FieldState>,
    active: usize,
}

impl FieldForm {
    pub fn new(name: &str, title: &str, specs: Vec<FieldSpec>) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            fields: specs.into_iter().map(FieldState::new).collect(),
            active: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_field(&self) -> Option<&FieldState> {
        self.fields.get(self.active)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.active = (self.active + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.active = self.active.checked_sub(1).unwrap_or(self.fields.len() - 1);
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.active) {
            field.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.active) {
            field.pop_char();
        }
    }

    pub fn toggle_flag(&mut self) {
        if let Some(field) = self.fields.get_mut(self.active) {
            field.toggle();
        }
    }
}

impl StepForm for FieldForm {
    fn name(&self) -> &str {
        FieldForm::name(self)
    }

    fn title(&self) -> &str {
        FieldForm::title(self)
    }

    /// Validates every field, marks failures inline, and moves focus to the
    /// first offending field. Succeeds only when the whole step is clean.
    fn try_finish(&mut self) -> Result<FieldValues, FormError> {
        let mut first_invalid: Option<usize> = None;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.error = field.validate();
            if field.error.is_some() && first_invalid.is_none() {
                first_invalid = Some(i);
            }
        }

        if let Some(i) = first_invalid {
            self.active = i;
            let field = &self.fields[i];
            return Err(FormError::Invalid {
                field: field.spec.label.clone(),
                message: field.error.clone().unwrap_or_default(),
            });
        }

        let mut values = FieldValues::new();
        for field in &self.fields {
            if let Some(value) = field.value() {
                values.insert(field.spec.key.clone(), value);
            }
        }
        Ok(values)
    }

    fn reset_fields(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_form() -> FieldForm {
        FieldForm::new(
            "account",
            "Account",
            vec![
                FieldSpec::text("name", "Name").required(),
                FieldSpec::text("qty", "Quantity").kind(FieldKind::Number),
                FieldSpec::text("news", "Newsletter").kind(FieldKind::Flag),
            ],
        )
    }

    #[test]
    fn test_try_finish_blocks_on_invalid_field() {
        let mut form = sample_form();
        // Name is required and empty; quantity deliberately broken.
        form.focus_next();
        for c in "9.9.9".chars() {
            form.input_char(c);
        }

        let err = form.try_finish().unwrap_err();
        assert!(matches!(err, FormError::Invalid { ref field, .. } if field == "Name"));
        // Focus lands on the first offender and both errors are marked.
        assert_eq!(form.active(), 0);
        assert!(form.fields()[0].error.is_some());
        assert!(form.fields()[1].error.is_some());
    }

    #[test]
    fn test_try_finish_collects_typed_values() {
        let mut form = sample_form();
        for c in "ada".chars() {
            form.input_char(c);
        }
        form.focus_next();
        for c in "3".chars() {
            form.input_char(c);
        }
        form.focus_next();
        form.toggle_flag();

        let values = form.try_finish().unwrap();
        assert_eq!(values["name"], json!("ada"));
        assert_eq!(values["qty"], json!(3));
        assert_eq!(values["news"], json!(true));
    }

    #[test]
    fn test_optional_empty_fields_are_omitted() {
        let mut form = sample_form();
        for c in "ada".chars() {
            form.input_char(c);
        }

        let values = form.try_finish().unwrap();
        assert!(values.contains_key("name"));
        assert!(!values.contains_key("qty"));
        // Flags always carry a value.
        assert_eq!(values["news"], json!(false));
    }

    #[test]
    fn test_reset_fields() {
        let mut form = sample_form();
        for c in "ada".chars() {
            form.input_char(c);
        }
        form.focus_next();
        form.focus_next();
        form.toggle_flag();

        form.reset_fields();
        assert_eq!(form.active(), 0);
        assert!(form.fields().iter().all(|f| f.input.is_empty() && !f.flag));
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = sample_form();
        form.focus_previous();
        assert_eq!(form.active(), 2);
        form.focus_next();
        assert_eq!(form.active(), 0);
    }
}
