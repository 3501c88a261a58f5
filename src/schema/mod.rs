use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

pub mod defaults;
pub mod field;

pub use defaults::{CLUSTER_ANNOTATION_FIELD, URGENCY_OPTIONS, default_schema, session_schema};
pub use field::{
    AnnotationField, AnnotationValue, DisplayKind, FieldConfig, FieldRule, FieldSpec, ValueType,
};

/// Predicate over raw reviewer input, attached to a field at registration.
pub trait Validator: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
    fn accepts(&self, raw: &str) -> bool;
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("annotation field already registered: {0}")]
    DuplicateField(String),
    #[error("annotation field not found: {0}")]
    NotFound(String),
    #[error("field {field} has options but value type {value_type}; choice fields must be strings")]
    OptionsRequireString { field: String, value_type: ValueType },
    #[error("field {0} has an empty options list")]
    EmptyOptions(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    WrongType { expected: ValueType },
    NotAnOption { options: Vec<String> },
    Validator { name: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::WrongType { expected } => write!(f, "value is not a valid {expected}"),
            Rejection::NotAnOption { options } => {
                write!(f, "value must be one of: {}", options.join(" | "))
            }
            Rejection::Validator { name } => write!(f, "value rejected by {name} validator"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    fields: Vec<AnnotationField>,
    index: HashMap<String, usize>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: FieldSpec) -> Result<&AnnotationField, SchemaError> {
        if self.index.contains_key(&spec.name) {
            return Err(SchemaError::DuplicateField(spec.name));
        }
        let field = spec.into_field()?;
        tracing::debug!(
            field = %field.name,
            value_type = %field.value_type,
            rule = ?field.rule,
            "registered annotation field"
        );
        let idx = self.fields.len();
        self.index.insert(field.name.clone(), idx);
        self.fields.push(field);
        Ok(&self.fields[idx])
    }

    pub fn get(&self, name: &str) -> Result<&AnnotationField, SchemaError> {
        self.index
            .get(name)
            .map(|&idx| &self.fields[idx])
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    pub fn fields(&self) -> &[AnnotationField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Choice and custom checks both have to pass when a field carries both.
    pub fn validate(
        &self,
        name: &str,
        raw: &str,
    ) -> Result<Result<AnnotationValue, Rejection>, SchemaError> {
        let field = self.get(name)?;
        Ok(check_field(field, raw))
    }
}

pub fn check_field(field: &AnnotationField, raw: &str) -> Result<AnnotationValue, Rejection> {
    let value = AnnotationValue::coerce(raw, field.value_type).ok_or(Rejection::WrongType {
        expected: field.value_type,
    })?;
    if let Some(options) = field.rule.options() {
        if !options.iter().any(|o| o == raw) {
            return Err(Rejection::NotAnOption {
                options: options.to_vec(),
            });
        }
    }
    if let Some(validator) = field.rule.validator() {
        if !validator.accepts(raw) {
            return Err(Rejection::Validator {
                name: validator.name().to_string(),
            });
        }
    }
    Ok(value)
}

#[cfg(test)]
#[path = "../../tests/src_inline/schema/tests.rs"]
mod tests;
