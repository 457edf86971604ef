//! Wizard definition files
//!
//! A wizard is declared in TOML: a `[wizard]` table plus ordered `[[step]]`
//! tables, each with its `[[step.field]]` entries. Loading compiles field
//! patterns and validates the document; an embedded sample definition backs
//! the no-arguments demo run.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::{FieldForm, FieldKind, FieldSpec};
use crate::wizard::StepConfig;

/// Embedded demo wizard used when no definition file is given
const SAMPLE_TOML: &str = r#"
[wizard]
title = "Project Setup"

[[step]]
name = "project"
title = "Project"

[[step.field]]
key = "name"
label = "Project name"
required = true
min_len = 2
max_len = 40
pattern = "^[a-z][a-z0-9-]*$"

[[step.field]]
key = "description"
label = "Description"
placeholder = "One line about the project"

[[step]]
name = "build"
title = "Build"

[[step.field]]
key = "parallel_jobs"
label = "Parallel jobs"
kind = "number"

[[step.field]]
key = "release"
label = "Release build"
kind = "flag"

[[step]]
name = "publish"
title = "Publish"

[[step.field]]
key = "registry_token"
label = "Registry token"
secret = true

[[step.field]]
key = "publish_now"
label = "Publish after setup"
kind = "flag"
"#;

/// Errors raised while loading or validating a definition
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("wizard definition has no steps")]
    NoSteps,

    #[error("step {index} has an empty name")]
    UnnamedStep { index: usize },

    #[error("step `{step}`: field {index} has an empty key")]
    UnkeyedField { step: String, index: usize },

    #[error("step `{step}` field `{key}`: invalid pattern: {source}")]
    BadPattern {
        step: String,
        key: String,
        #[source]
        source: Box<regex::Error>,
    },
}

/// The whole wizard document
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WizardDefinition {
    pub wizard: WizardMeta,

    #[serde(rename = "step")]
    pub steps: Vec<StepDefinition>,
}

/// The `[wizard]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardMeta {
    pub title: String,

    /// Where the merged submission payload is written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Default for WizardMeta {
    fn default() -> Self {
        Self {
            title: "Wizard".to_string(),
            output: None,
        }
    }
}

/// One `[[step]]` table
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StepDefinition {
    pub name: String,
    pub title: String,

    #[serde(rename = "field")]
    pub fields: Vec<FieldDefinition>,
}

impl StepDefinition {
    /// Title shown in the indicator; the name doubles as the title when the
    /// definition omits one.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

/// One `[[step.field]]` table
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FieldDefinition {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub secret: bool,
}

impl WizardDefinition {
    /// Load and validate a definition file.
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let content = std::fs::read_to_string(path).map_err(|source| DefinitionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let definition: WizardDefinition =
            toml::from_str(&content).map_err(|source| DefinitionError::Parse {
                path: path.to_path_buf(),
                source: Box::new(source),
            })?;
        definition.validate()?;
        Ok(definition)
    }

    /// The embedded demo definition.
    pub fn sample() -> Self {
        // Safe: the embedded sample is covered by tests.
        toml::from_str(SAMPLE_TOML).expect("embedded sample definition parses")
    }

    pub fn sample_toml() -> &'static str {
        SAMPLE_TOML
    }

    /// Structural validation: at least one step, named steps, keyed fields,
    /// compilable patterns. Duplicate step names are tolerated - the last
    /// registration's config wins downstream - but worth a warning.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.steps.is_empty() {
            return Err(DefinitionError::NoSteps);
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.name.is_empty() {
                return Err(DefinitionError::UnnamedStep { index });
            }
            if self.steps[..index].iter().any(|s| s.name == step.name) {
                tracing::warn!(step = %step.name, "duplicate step name in definition, last one wins");
            }
            for (field_index, field) in step.fields.iter().enumerate() {
                if field.key.is_empty() {
                    return Err(DefinitionError::UnkeyedField {
                        step: step.name.clone(),
                        index: field_index,
                    });
                }
                if let Some(pattern) = &field.pattern {
                    Regex::new(pattern).map_err(|source| DefinitionError::BadPattern {
                        step: step.name.clone(),
                        key: field.key.clone(),
                        source: Box::new(source),
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Compile one step's field specs.
    pub fn field_specs(step: &StepDefinition) -> Result<Vec<FieldSpec>, DefinitionError> {
        step.fields
            .iter()
            .map(|field| {
                let pattern = match &field.pattern {
                    Some(p) => {
                        Some(Regex::new(p).map_err(|source| DefinitionError::BadPattern {
                            step: step.name.clone(),
                            key: field.key.clone(),
                            source: Box::new(source),
                        })?)
                    }
                    None => None,
                };
                Ok(FieldSpec {
                    key: field.key.clone(),
                    label: if field.label.is_empty() {
                        field.key.clone()
                    } else {
                        field.label.clone()
                    },
                    kind: field.kind,
                    required: field.required,
                    min_len: field.min_len,
                    max_len: field.max_len,
                    pattern,
                    placeholder: field.placeholder.clone(),
                    secret: field.secret,
                })
            })
            .collect()
    }

    /// Build the per-step forms in declared order.
    pub fn build_forms(&self) -> Result<Vec<FieldForm>, DefinitionError> {
        self.steps
            .iter()
            .map(|step| {
                let specs = Self::field_specs(step)?;
                Ok(FieldForm::new(&step.name, step.display_title(), specs))
            })
            .collect()
    }

    /// Step configs carrying the declared order.
    pub fn step_configs(&self) -> Vec<(String, StepConfig)> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| (step.name.clone(), StepConfig::new(step.display_title(), i)))
            .collect()
    }

    /// Human-readable outline, used by the `check` subcommand.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{}: {} step{}",
            self.wizard.title,
            self.steps.len(),
            if self.steps.len() == 1 { "" } else { "s" }
        )];
        for (i, step) in self.steps.iter().enumerate() {
            lines.push(format!("  {}. {} ({})", i + 1, step.display_title(), step.name));
            for field in &step.fields {
                let mut notes = Vec::new();
                if field.required {
                    notes.push("required".to_string());
                }
                if field.kind != FieldKind::Text {
                    notes.push(format!("{:?}", field.kind).to_lowercase());
                }
                if field.secret {
                    notes.push("secret".to_string());
                }
                let suffix = if notes.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", notes.join(", "))
                };
                lines.push(format!("     - {}{}", field.key, suffix));
            }
        }
        lines
    }
}
