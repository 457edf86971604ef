//! Field specs, field state, and per-field validation

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::MAX_INPUT_LENGTH;

/// What kind of value a field collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text
    #[default]
    Text,
    /// Numeric input, emitted as a JSON number
    Number,
    /// Yes/no toggle, emitted as a JSON boolean
    Flag,
}

/// Declarative description of one form field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    /// Compiled at definition load; matched against the whole input
    pub pattern: Option<Regex>,
    pub placeholder: Option<String>,
    /// Masked while rendering (passwords, tokens)
    pub secret: bool,
}

impl FieldSpec {
    pub fn text(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
            required: false,
            min_len: None,
            max_len: None,
            pattern: None,
            placeholder: None,
            secret: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Live state of one field while the wizard runs
#[derive(Debug, Clone)]
pub struct FieldState {
    pub spec: FieldSpec,
    /// Input buffer for text and number fields
    pub input: String,
    /// Value for flag fields
    pub flag: bool,
    pub error: Option<String>,
}

impl FieldState {
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            input: String::new(),
            flag: false,
            error: None,
        }
    }

    /// Append a character, filtered by field kind and capped in length.
    pub fn push_char(&mut self, c: char) {
        let accepted = match self.spec.kind {
            FieldKind::Text => !c.is_control(),
            FieldKind::Number => c.is_ascii_digit() || matches!(c, '.' | '-' | '+'),
            FieldKind::Flag => false,
        };
        if accepted && self.input.len() < MAX_INPUT_LENGTH {
            self.input.push(c);
            self.error = None;
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        self.error = None;
    }

    pub fn toggle(&mut self) {
        if self.spec.kind == FieldKind::Flag {
            self.flag = !self.flag;
            self.error = None;
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.flag = false;
        self.error = None;
    }

    /// Run this field's validation, returning the failure message if any.
    pub fn validate(&self) -> Option<String> {
        validate_input(&self.spec, &self.input)
    }

    /// The field's typed value, or None when an optional field is empty.
    pub fn value(&self) -> Option<Value> {
        match self.spec.kind {
            FieldKind::Flag => Some(Value::Bool(self.flag)),
            FieldKind::Text => {
                if self.input.is_empty() {
                    None
                } else {
                    Some(Value::String(self.input.clone()))
                }
            }
            FieldKind::Number => {
                if self.input.is_empty() {
                    return None;
                }
                if let Ok(n) = self.input.parse::<i64>() {
                    return Some(Value::from(n));
                }
                self.input
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
            }
        }
    }
}

/// Validate an input buffer against a field spec
pub fn validate_input(spec: &FieldSpec, input: &str) -> Option<String> {
    if spec.kind == FieldKind::Flag {
        return None;
    }
    if input.is_empty() {
        if spec.required {
            return Some(format!("{} is required", spec.label));
        }
        return None;
    }
    if let Some(min) = spec.min_len {
        if input.len() < min {
            return Some(format!("{} must be at least {} characters", spec.label, min));
        }
    }
    if let Some(max) = spec.max_len {
        if input.len() > max {
            return Some(format!("{} must be at most {} characters", spec.label, max));
        }
    }
    if spec.kind == FieldKind::Number && input.parse::<f64>().is_err() {
        return Some(format!("{} must be a number", spec.label));
    }
    if let Some(pattern) = &spec.pattern {
        if !pattern.is_match(input) {
            return Some(format!("{} has an invalid format", spec.label));
        }
    }
    None
}
