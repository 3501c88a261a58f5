use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::schema::{SchemaError, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Integer => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::Boolean => write!(f, "bool"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayKind {
    Text,
    TextArea,
    Number,
    RadioItems,
}

impl DisplayKind {
    pub fn default_for(value_type: ValueType, has_options: bool) -> Self {
        if has_options {
            return DisplayKind::RadioItems;
        }
        match value_type {
            ValueType::Integer | ValueType::Float => DisplayKind::Number,
            ValueType::Boolean => DisplayKind::RadioItems,
            ValueType::String => DisplayKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl AnnotationValue {
    pub fn coerce(raw: &str, value_type: ValueType) -> Option<Self> {
        match value_type {
            ValueType::String => Some(AnnotationValue::String(raw.to_string())),
            ValueType::Integer => raw.trim().parse().ok().map(AnnotationValue::Integer),
            ValueType::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(AnnotationValue::Float),
            ValueType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(AnnotationValue::Boolean(true)),
                "false" | "no" | "0" => Some(AnnotationValue::Boolean(false)),
                _ => None,
            },
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::Boolean(v) => write!(f, "{v}"),
            AnnotationValue::Integer(v) => write!(f, "{v}"),
            AnnotationValue::Float(v) => write!(f, "{v}"),
            AnnotationValue::String(v) => f.write_str(v),
        }
    }
}

/// How a field's values are checked, fixed when the field is registered.
#[derive(Clone)]
pub enum FieldRule {
    FreeForm,
    Choice(Vec<String>),
    Custom(Arc<dyn Validator>),
    ChoiceAndCustom {
        options: Vec<String>,
        validator: Arc<dyn Validator>,
    },
}

impl FieldRule {
    fn resolve(
        options: Option<Vec<String>>,
        validator: Option<Arc<dyn Validator>>,
    ) -> FieldRule {
        match (options, validator) {
            (None, None) => FieldRule::FreeForm,
            (Some(options), None) => FieldRule::Choice(options),
            (None, Some(validator)) => FieldRule::Custom(validator),
            (Some(options), Some(validator)) => FieldRule::ChoiceAndCustom { options, validator },
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldRule::Choice(options) | FieldRule::ChoiceAndCustom { options, .. } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn validator(&self) -> Option<&dyn Validator> {
        match self {
            FieldRule::Custom(validator) | FieldRule::ChoiceAndCustom { validator, .. } => {
                Some(validator.as_ref())
            }
            _ => None,
        }
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRule::FreeForm => f.write_str("FreeForm"),
            FieldRule::Choice(options) => f.debug_tuple("Choice").field(options).finish(),
            FieldRule::Custom(validator) => {
                f.debug_tuple("Custom").field(&validator.name()).finish()
            }
            FieldRule::ChoiceAndCustom { options, validator } => f
                .debug_struct("ChoiceAndCustom")
                .field("options", options)
                .field("validator", &validator.name())
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnnotationField {
    pub name: String,
    pub value_type: ValueType,
    pub rule: FieldRule,
    pub display: DisplayKind,
}

#[derive(Clone)]
pub struct FieldSpec {
    pub name: String,
    pub value_type: ValueType,
    pub options: Option<Vec<String>>,
    pub validator: Option<Arc<dyn Validator>>,
    pub display: Option<DisplayKind>,
}

impl FieldSpec {
    pub fn new(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            options: None,
            validator: None,
            display: None,
        }
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn display(mut self, display: DisplayKind) -> Self {
        self.display = Some(display);
        self
    }

    pub(crate) fn into_field(self) -> Result<AnnotationField, SchemaError> {
        if let Some(options) = &self.options {
            if self.value_type != ValueType::String {
                return Err(SchemaError::OptionsRequireString {
                    field: self.name,
                    value_type: self.value_type,
                });
            }
            if options.is_empty() {
                return Err(SchemaError::EmptyOptions(self.name));
            }
        }
        let display = self
            .display
            .unwrap_or_else(|| DisplayKind::default_for(self.value_type, self.options.is_some()));
        Ok(AnnotationField {
            name: self.name,
            value_type: self.value_type,
            rule: FieldRule::resolve(self.options, self.validator),
            display,
        })
    }
}

/// A field added on top of the defaults through the review config. Stored in
/// the session so the same schema can be rebuilt on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayKind>,
}

impl FieldConfig {
    pub fn to_spec(&self) -> FieldSpec {
        let mut spec = FieldSpec::new(&self.name, self.value_type);
        spec.options = self.options.clone();
        spec.display = self.display;
        spec
    }
}
